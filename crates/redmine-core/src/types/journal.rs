//! Issue history: journals, their details, and repository changesets.

use chrono::{DateTime, Utc};

use super::Reference;
use crate::schema::{collection, field, Entity, FieldDef};

/// One entry of an issue's history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Journal {
    pub id: i32,
    pub user: Option<Reference>,
    pub notes: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
    pub private_notes: bool,
    pub details: Option<Vec<Detail>>,
}

impl Entity for Journal {
    const ROOT: &'static str = "journal";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(Journal, "id", Int, id).attribute().read_only(),
        field!(Journal, "user", Ref, user).read_only(),
        field!(Journal, "notes", Str, notes).read_only(),
        field!(Journal, "created_on", DateTime, created_on).read_only(),
        field!(Journal, "private_notes", Bool, private_notes).read_only(),
        collection!(Journal, "details", "detail", Detail, details).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }
}

/// A single attribute change recorded in a journal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Detail {
    /// `attr`, `cf`, `attachment` or `relation`.
    pub property: Option<String>,
    pub name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl Entity for Detail {
    const ROOT: &'static str = "detail";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(Detail, "property", Str, property).attribute().read_only(),
        field!(Detail, "name", Str, name).attribute().read_only(),
        field!(Detail, "old_value", Str, old_value).read_only(),
        field!(Detail, "new_value", Str, new_value).read_only(),
    ];

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A repository commit associated with an issue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub revision: Option<String>,
    pub user: Option<Reference>,
    pub comments: Option<String>,
    pub committed_on: Option<DateTime<Utc>>,
}

impl Entity for ChangeSet {
    const ROOT: &'static str = "changeset";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(ChangeSet, "revision", Str, revision).attribute().read_only(),
        field!(ChangeSet, "user", Ref, user).read_only(),
        field!(ChangeSet, "comments", Str, comments).read_only(),
        field!(ChangeSet, "committed_on", DateTime, committed_on).read_only(),
    ];
}
