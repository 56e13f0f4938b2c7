//! Reference (id, name) pairs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A lightweight pointer to another record.
///
/// The server returns references with an id and, usually, a display name.
/// References built for writes often carry only the id; that is valid.
/// Two-level shapes (trackers, statuses) may carry an extra `label`.
///
/// # Example
///
/// ```
/// use redmine_core::Reference;
///
/// let project = Reference::new(1, "Redmine");
/// assert_eq!(project.id, 1);
/// assert_eq!(project.name.as_deref(), Some("Redmine"));
/// assert_eq!(Reference::with_id(1), Reference { id: 1, name: None, label: None });
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// Identity of the referenced record.
    pub id: i32,

    /// Display name, absent on some responses and on id-only writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Secondary name slot used by two-level reference shapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Reference {
    /// Create a reference with a resolved display name.
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            label: None,
        }
    }

    /// Create an id-only reference.
    pub fn with_id(id: i32) -> Self {
        Self {
            id,
            name: None,
            label: None,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "#{} {}", self.id, name),
            None => write!(f, "#{}", self.id),
        }
    }
}

impl From<i32> for Reference {
    fn from(id: i32) -> Self {
        Self::with_id(id)
    }
}
