//! Custom field definitions and the values records carry for them.

use crate::schema::{collection, field, Entity, FieldDef};

/// The value of a custom field on a record.
///
/// Multi-valued fields carry a list; everything else is a single string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CustomFieldValue {
    Text(String),
    List(Vec<String>),
}

impl CustomFieldValue {
    /// Iterates the carried values; `Text` yields exactly one.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            CustomFieldValue::Text(value) => std::slice::from_ref(value),
            CustomFieldValue::List(values) => values,
        };
        values.iter().map(String::as_str)
    }
}

impl From<&str> for CustomFieldValue {
    fn from(value: &str) -> Self {
        CustomFieldValue::Text(value.to_string())
    }
}

impl From<Vec<String>> for CustomFieldValue {
    fn from(values: Vec<String>) -> Self {
        CustomFieldValue::List(values)
    }
}

/// A custom field value as carried by an issue, project, user, group,
/// version or time entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IssueCustomField {
    pub id: i32,
    pub name: Option<String>,
    pub multiple: bool,
    pub value: Option<CustomFieldValue>,
}

impl IssueCustomField {
    /// A single-valued custom field, ready to be written.
    pub fn text(id: i32, value: impl Into<String>) -> Self {
        Self {
            id,
            value: Some(CustomFieldValue::Text(value.into())),
            ..Default::default()
        }
    }

    /// A multi-valued custom field, ready to be written.
    pub fn list<I, S>(id: i32, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            multiple: true,
            value: Some(CustomFieldValue::List(
                values.into_iter().map(Into::into).collect(),
            )),
            ..Default::default()
        }
    }
}

impl Entity for IssueCustomField {
    const ROOT: &'static str = "custom_field";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(IssueCustomField, "id", Int, id).attribute(),
        field!(IssueCustomField, "name", Str, name).attribute(),
        field!(IssueCustomField, "multiple", Bool, multiple)
            .attribute()
            .read_only(),
        field!(IssueCustomField, "value", Custom, value),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A custom field definition, as listed by `/custom_fields`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomField {
    pub id: i32,
    pub name: Option<String>,
    pub customized_type: Option<String>,
    pub field_format: Option<String>,
    pub regexp: Option<String>,
    pub min_length: Option<i32>,
    pub max_length: Option<i32>,
    pub is_required: bool,
    pub is_filter: bool,
    pub searchable: bool,
    pub multiple: bool,
    pub default_value: Option<String>,
    pub visible: bool,
    pub possible_values: Option<Vec<CustomFieldPossibleValue>>,
    pub trackers: Option<Vec<TrackerCustomField>>,
    pub roles: Option<Vec<CustomFieldRole>>,
}

impl Entity for CustomField {
    const ROOT: &'static str = "custom_field";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(CustomField, "id", Int, id).read_only(),
        field!(CustomField, "name", Str, name).read_only(),
        field!(CustomField, "customized_type", Str, customized_type).read_only(),
        field!(CustomField, "field_format", Str, field_format).read_only(),
        field!(CustomField, "regexp", Str, regexp).read_only(),
        field!(CustomField, "min_length", Int, min_length).read_only(),
        field!(CustomField, "max_length", Int, max_length).read_only(),
        field!(CustomField, "is_required", Bool, is_required).read_only(),
        field!(CustomField, "is_filter", Bool, is_filter).read_only(),
        field!(CustomField, "searchable", Bool, searchable).read_only(),
        field!(CustomField, "multiple", Bool, multiple).read_only(),
        field!(CustomField, "default_value", Str, default_value).read_only(),
        field!(CustomField, "visible", Bool, visible).read_only(),
        collection!(
            CustomField,
            "possible_values",
            "possible_value",
            CustomFieldPossibleValue,
            possible_values
        )
        .read_only(),
        collection!(CustomField, "trackers", "tracker", TrackerCustomField, trackers).read_only(),
        collection!(CustomField, "roles", "role", CustomFieldRole, roles).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// One allowed value of a list-format custom field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomFieldPossibleValue {
    pub value: Option<String>,
    pub label: Option<String>,
}

impl Entity for CustomFieldPossibleValue {
    const ROOT: &'static str = "possible_value";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(CustomFieldPossibleValue, "value", Str, value).read_only(),
        field!(CustomFieldPossibleValue, "label", Str, label).read_only(),
    ];

    fn name(&self) -> Option<&str> {
        self.label.as_deref().or(self.value.as_deref())
    }
}

named_record! {
    /// A tracker a custom field is enabled for.
    TrackerCustomField, "tracker", read_only
}

named_record! {
    /// A role a custom field is visible to.
    CustomFieldRole, "role", read_only
}
