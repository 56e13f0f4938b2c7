//! Decoded field values and the conversions between them and struct fields.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

use crate::types::{CustomFieldValue, Record, Reference, Variant};

/// A field value in transit between a record and a wire document.
///
/// Extractors produce one of these for writing; the decoders produce one
/// for the setter to store.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Free text.
    Str(String),
    /// Boolean flag.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Decimal number.
    Decimal(f64),
    /// Calendar date.
    Date(NaiveDate),
    /// UTC timestamp.
    DateTime(DateTime<Utc>),
    /// Reference to another record.
    Reference(Reference),
    /// Ordered sub-records.
    Records(Vec<Record>),
    /// Custom field value.
    Custom(CustomFieldValue),
}

impl FieldValue {
    fn describe(&self) -> &'static str {
        match self {
            FieldValue::Str(_) => "string",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Int(_) => "integer",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Date(_) => "date",
            FieldValue::DateTime(_) => "timestamp",
            FieldValue::Reference(_) => "reference",
            FieldValue::Records(_) => "record list",
            FieldValue::Custom(_) => "custom value",
        }
    }
}

/// A value could not be stored in, or parsed for, a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueError {
    reason: String,
}

impl ValueError {
    /// Create a value error with a reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// A value of the wrong shape reached a setter.
    pub fn mismatch(expected: &str, found: &FieldValue) -> Self {
        Self::new(format!("expected {}, found {}", expected, found.describe()))
    }

    /// The rejection reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for ValueError {}

/// A Rust type that can live in a record field.
///
/// `to_value` returns `None` when the field is absent, which the encoders
/// turn into "omit this key".
pub trait FieldType: Sized {
    /// Extract the wire value, `None` meaning "not set".
    fn to_value(&self) -> Option<FieldValue>;

    /// Convert a decoded wire value into the field's type.
    fn from_value(value: FieldValue) -> Result<Self, ValueError>;
}

impl FieldType for String {
    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Str(self.clone()))
    }

    fn from_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::Str(s) => Ok(s),
            other => Err(ValueError::mismatch("string", &other)),
        }
    }
}

impl FieldType for bool {
    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Bool(*self))
    }

    fn from_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::Bool(b) => Ok(b),
            other => Err(ValueError::mismatch("boolean", &other)),
        }
    }
}

impl FieldType for i32 {
    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Int(i64::from(*self)))
    }

    fn from_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::Int(n) => i32::try_from(n)
                .map_err(|_| ValueError::new(format!("{} is out of range", n))),
            other => Err(ValueError::mismatch("integer", &other)),
        }
    }
}

impl FieldType for i64 {
    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Int(*self))
    }

    fn from_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::Int(n) => Ok(n),
            other => Err(ValueError::mismatch("integer", &other)),
        }
    }
}

impl FieldType for f64 {
    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Decimal(*self))
    }

    fn from_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::Decimal(d) => Ok(d),
            FieldValue::Int(n) => Ok(n as f64),
            other => Err(ValueError::mismatch("decimal", &other)),
        }
    }
}

impl FieldType for NaiveDate {
    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Date(*self))
    }

    fn from_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::Date(d) => Ok(d),
            FieldValue::DateTime(t) => Ok(t.date_naive()),
            other => Err(ValueError::mismatch("date", &other)),
        }
    }
}

impl FieldType for DateTime<Utc> {
    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::DateTime(*self))
    }

    fn from_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::DateTime(t) => Ok(t),
            other => Err(ValueError::mismatch("timestamp", &other)),
        }
    }
}

impl FieldType for Reference {
    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Reference(self.clone()))
    }

    fn from_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::Reference(r) => Ok(r),
            other => Err(ValueError::mismatch("reference", &other)),
        }
    }
}

impl FieldType for CustomFieldValue {
    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Custom(self.clone()))
    }

    fn from_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::Custom(v) => Ok(v),
            FieldValue::Str(s) => Ok(CustomFieldValue::Text(s)),
            other => Err(ValueError::mismatch("custom value", &other)),
        }
    }
}

impl<E> FieldType for Vec<E>
where
    E: Variant + Clone,
{
    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Records(
            self.iter().cloned().map(Variant::into_record).collect(),
        ))
    }

    fn from_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::Records(items) => items
                .into_iter()
                .map(|item| {
                    let kind = item.kind();
                    E::from_record(item).ok_or_else(|| {
                        ValueError::new(format!("expected {} items, found {}", E::KIND, kind))
                    })
                })
                .collect(),
            other => Err(ValueError::mismatch("record list", &other)),
        }
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn to_value(&self) -> Option<FieldValue> {
        self.as_ref().and_then(FieldType::to_value)
    }

    fn from_value(value: FieldValue) -> Result<Self, ValueError> {
        T::from_value(value).map(Some)
    }
}

/// Declares a string-valued enumeration usable as a record field.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// The wire token for this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::schema::ValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($token => Ok($name::$variant),)+
                    other => Err($crate::schema::ValueError::new(format!(
                        "unknown {} '{}'",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::schema::FieldType for $name {
            fn to_value(&self) -> Option<$crate::schema::FieldValue> {
                Some($crate::schema::FieldValue::Str(self.as_str().to_string()))
            }

            fn from_value(
                value: $crate::schema::FieldValue,
            ) -> Result<Self, $crate::schema::ValueError> {
                match value {
                    $crate::schema::FieldValue::Str(s) => s.parse(),
                    other => Err($crate::schema::ValueError::mismatch(stringify!($name), &other)),
                }
            }
        }
    };
}

/// Declares an integer-coded enumeration usable as a record field.
macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// The numeric wire code for this value.
            pub fn code(self) -> i64 {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl TryFrom<i64> for $name {
            type Error = $crate::schema::ValueError;

            fn try_from(code: i64) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)+
                    other => Err($crate::schema::ValueError::new(format!(
                        "unknown {} code {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl $crate::schema::FieldType for $name {
            fn to_value(&self) -> Option<$crate::schema::FieldValue> {
                Some($crate::schema::FieldValue::Int(self.code()))
            }

            fn from_value(
                value: $crate::schema::FieldValue,
            ) -> Result<Self, $crate::schema::ValueError> {
                match value {
                    $crate::schema::FieldValue::Int(code) => Self::try_from(code),
                    other => Err($crate::schema::ValueError::mismatch(stringify!($name), &other)),
                }
            }
        }
    };
}

pub(crate) use int_enum;
pub(crate) use string_enum;
