//! Field descriptors.

use std::fmt;

use super::value::{FieldValue, ValueError};
use crate::types::RecordKind;

/// Reads a field out of a record for encoding. `None` means "absent".
pub type Getter<T> = fn(&T) -> Option<FieldValue>;

/// Stores a decoded value into a record.
pub type Setter<T> = fn(&mut T, FieldValue) -> Result<(), ValueError>;

/// The semantic kind of a field's wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Str,
    /// `true` / `false`.
    Bool,
    /// Integer literal.
    Int,
    /// Decimal literal.
    Decimal,
    /// `YYYY-MM-DD`.
    Date,
    /// RFC 3339 timestamp.
    DateTime,
    /// Reference to another record (id, name).
    Ref,
    /// Sequence of sub-records under a wrapper key.
    Records { item: &'static str, kind: RecordKind },
    /// Custom field value: text, or a list of strings.
    Custom,
}

impl FieldKind {
    /// Returns true for single-valued kinds that render as plain text.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            FieldKind::Str
                | FieldKind::Bool
                | FieldKind::Int
                | FieldKind::Decimal
                | FieldKind::Date
                | FieldKind::DateTime
        )
    }
}

/// Where a field lives in the markup format.
///
/// The text format ignores placement: every field is a key of the record map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A child element of the record element.
    Element,
    /// An attribute of the record element.
    Attribute,
    /// The record element's own text content.
    Content,
}

/// Which directions a field participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Decoded and encoded.
    ReadWrite,
    /// Decoded only (identity, server-computed values).
    ReadOnly,
    /// Encoded only (passwords, upload tokens).
    WriteOnly,
}

/// How a field is encoded for create/update requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Under the field's own key, in its full form.
    Inline,
    /// A reference written as its id alone under another key.
    IdOnly(&'static str),
    /// A record list written as a list of item ids.
    IdList {
        key: &'static str,
        item: &'static str,
    },
    /// A record list written as a list of item names.
    Names {
        key: &'static str,
        item: &'static str,
    },
}

/// When a writable field is emitted.
pub enum WriteCondition<T> {
    /// Whenever the value is present.
    Always,
    /// Only for records that already exist on the server (non-zero id).
    Persisted,
    /// Only when the predicate holds for the record.
    When(fn(&T) -> bool),
}

impl<T> Clone for WriteCondition<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for WriteCondition<T> {}

impl<T> fmt::Debug for WriteCondition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteCondition::Always => f.write_str("Always"),
            WriteCondition::Persisted => f.write_str("Persisted"),
            WriteCondition::When(_) => f.write_str("When(..)"),
        }
    }
}

/// One field of an entity schema.
///
/// Built with [`FieldDef::new`] and refined with the const builder methods:
///
/// ```
/// use redmine_core::schema::{FieldDef, FieldKind, FieldType};
/// use redmine_core::Reference;
///
/// #[derive(Default)]
/// struct Row {
///     category: Option<Reference>,
/// }
///
/// const CATEGORY: FieldDef<Row> = FieldDef::<Row>::new(
///     "category",
///     FieldKind::Ref,
///     |row| row.category.to_value(),
///     |row, value| {
///         row.category = FieldType::from_value(value)?;
///         Ok(())
///     },
/// )
/// .id_only("category_id");
///
/// assert_eq!(CATEGORY.key, "category");
/// assert_eq!(CATEGORY.write_key(), "category_id");
/// ```
pub struct FieldDef<T> {
    /// Wire key the field is read from (and written to, unless the
    /// write policy names another key).
    pub key: &'static str,
    pub kind: FieldKind,
    pub placement: Placement,
    pub access: Access,
    pub write: WritePolicy,
    pub condition: WriteCondition<T>,
    get: Getter<T>,
    set: Setter<T>,
}

impl<T> FieldDef<T> {
    /// Creates a read/write element field with the inline write policy.
    #[must_use]
    pub const fn new(key: &'static str, kind: FieldKind, get: Getter<T>, set: Setter<T>) -> Self {
        Self {
            key,
            kind,
            placement: Placement::Element,
            access: Access::ReadWrite,
            write: WritePolicy::Inline,
            condition: WriteCondition::Always,
            get,
            set,
        }
    }

    /// Places the field in an attribute of the record element.
    #[must_use]
    pub const fn attribute(mut self) -> Self {
        self.placement = Placement::Attribute;
        self
    }

    /// Places the field in the record element's text content.
    #[must_use]
    pub const fn content(mut self) -> Self {
        self.placement = Placement::Content;
        self
    }

    /// Marks the field as decoded only.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.access = Access::ReadOnly;
        self
    }

    /// Marks the field as encoded only.
    #[must_use]
    pub const fn write_only(mut self) -> Self {
        self.access = Access::WriteOnly;
        self
    }

    /// Writes a reference as its id under `key`.
    #[must_use]
    pub const fn id_only(mut self, key: &'static str) -> Self {
        self.write = WritePolicy::IdOnly(key);
        self
    }

    /// Writes a record list as `<key><item>id</item>...</key>`.
    #[must_use]
    pub const fn id_list(mut self, key: &'static str, item: &'static str) -> Self {
        self.write = WritePolicy::IdList { key, item };
        self
    }

    /// Writes a record list as `<key><item>name</item>...</key>`.
    #[must_use]
    pub const fn names(mut self, key: &'static str, item: &'static str) -> Self {
        self.write = WritePolicy::Names { key, item };
        self
    }

    /// Writes the field only for records that already exist.
    #[must_use]
    pub const fn persisted_only(mut self) -> Self {
        self.condition = WriteCondition::Persisted;
        self
    }

    /// Writes the field only when `predicate` holds.
    #[must_use]
    pub const fn write_when(mut self, predicate: fn(&T) -> bool) -> Self {
        self.condition = WriteCondition::When(predicate);
        self
    }

    /// The key the field is written under.
    pub const fn write_key(&self) -> &'static str {
        match self.write {
            WritePolicy::Inline => self.key,
            WritePolicy::IdOnly(key)
            | WritePolicy::IdList { key, .. }
            | WritePolicy::Names { key, .. } => key,
        }
    }

    /// Returns true if decoders populate this field.
    pub fn reads(&self) -> bool {
        self.access != Access::WriteOnly
    }

    /// Returns true if encoders may emit this field.
    pub fn writes(&self) -> bool {
        self.access != Access::ReadOnly
    }

    /// Extracts the field's value from `record`.
    pub fn extract(&self, record: &T) -> Option<FieldValue> {
        (self.get)(record)
    }

    /// Stores a decoded value into `record`.
    pub fn assign(&self, record: &mut T, value: FieldValue) -> Result<(), ValueError> {
        (self.set)(record, value)
    }

    /// Evaluates the write condition for `record` whose identity is `id`.
    pub fn should_write(&self, record: &T, id: i32) -> bool {
        match self.condition {
            WriteCondition::Always => true,
            WriteCondition::Persisted => id != 0,
            WriteCondition::When(predicate) => predicate(record),
        }
    }
}

impl<T> fmt::Debug for FieldDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("placement", &self.placement)
            .field("access", &self.access)
            .field("write", &self.write)
            .field("condition", &self.condition)
            .finish()
    }
}

/// Builds a [`FieldDef`] bound to a struct member.
///
/// `field!(Issue, "subject", Str, subject)` reads and writes `issue.subject`
/// through its [`FieldType`](super::FieldType) impl.
macro_rules! field {
    ($ty:ty, $key:literal, $kind:ident, $member:ident) => {
        $crate::schema::FieldDef::<$ty>::new(
            $key,
            $crate::schema::FieldKind::$kind,
            |record| $crate::schema::FieldType::to_value(&record.$member),
            |record, value| {
                record.$member = $crate::schema::FieldType::from_value(value)?;
                Ok(())
            },
        )
    };
}

/// Builds a record-list [`FieldDef`]: wrapper key, item key, item type.
macro_rules! collection {
    ($ty:ty, $key:literal, $item:literal, $kind:ident, $member:ident) => {
        $crate::schema::FieldDef::<$ty>::new(
            $key,
            $crate::schema::FieldKind::Records {
                item: $item,
                kind: $crate::types::RecordKind::$kind,
            },
            |record| $crate::schema::FieldType::to_value(&record.$member),
            |record, value| {
                record.$member = $crate::schema::FieldType::from_value(value)?;
                Ok(())
            },
        )
    };
}

pub(crate) use collection;
pub(crate) use field;
