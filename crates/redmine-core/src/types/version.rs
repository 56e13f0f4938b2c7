//! Versions (milestones).

use chrono::{DateTime, NaiveDate, Utc};

use super::{IssueCustomField, Reference};
use crate::schema::{collection, field, string_enum, Entity, FieldDef};

string_enum! {
    pub enum VersionStatus {
        Open => "open",
        Locked => "locked",
        Closed => "closed",
    }
}

string_enum! {
    /// Which projects besides the owner may use a version.
    pub enum VersionSharing {
        None => "none",
        Descendants => "descendants",
        Hierarchy => "hierarchy",
        Tree => "tree",
        System => "system",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Version {
    pub id: i32,
    pub project: Option<Reference>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<VersionStatus>,
    pub sharing: Option<VersionSharing>,
    pub due_date: Option<NaiveDate>,
    pub wiki_page_title: Option<String>,
    pub custom_fields: Option<Vec<IssueCustomField>>,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl Entity for Version {
    const ROOT: &'static str = "version";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(Version, "id", Int, id).read_only(),
        field!(Version, "project", Ref, project).read_only(),
        field!(Version, "name", Str, name),
        field!(Version, "status", Str, status),
        field!(Version, "sharing", Str, sharing),
        field!(Version, "description", Str, description),
        field!(Version, "due_date", Date, due_date),
        field!(Version, "wiki_page_title", Str, wiki_page_title),
        collection!(Version, "custom_fields", "custom_field", IssueCustomField, custom_fields),
        field!(Version, "created_on", DateTime, created_on).read_only(),
        field!(Version, "updated_on", DateTime, updated_on).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
