//! Error responses returned in place of a record.

use crate::schema::{field, Entity, FieldDef};

/// A validation message from the server (`<errors><error>...</error></errors>`).
///
/// Decoding one is a successful decode; it is up to the caller to treat the
/// message as a failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServerError {
    pub info: String,
}

impl ServerError {
    pub fn new(info: impl Into<String>) -> Self {
        Self { info: info.into() }
    }
}

impl Entity for ServerError {
    const ROOT: &'static str = "error";
    const FIELDS: &'static [FieldDef<Self>] = &[field!(ServerError, "info", Str, info).content()];

    fn name(&self) -> Option<&str> {
        Some(&self.info)
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.info.trim_end())
    }
}
