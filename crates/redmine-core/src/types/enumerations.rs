//! Server-defined lookup lists: statuses, trackers, priorities, activities
//! and saved queries. All read-only.

use super::Reference;
use crate::schema::{field, Entity, FieldDef};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IssueStatus {
    pub id: i32,
    pub name: Option<String>,
    pub is_default: bool,
    pub is_closed: bool,
}

impl Entity for IssueStatus {
    const ROOT: &'static str = "issue_status";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(IssueStatus, "id", Int, id).read_only(),
        field!(IssueStatus, "name", Str, name).read_only(),
        field!(IssueStatus, "is_default", Bool, is_default).read_only(),
        field!(IssueStatus, "is_closed", Bool, is_closed).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tracker {
    pub id: i32,
    pub name: Option<String>,
    pub default_status: Option<Reference>,
}

impl Entity for Tracker {
    const ROOT: &'static str = "tracker";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(Tracker, "id", Int, id).read_only(),
        field!(Tracker, "name", Str, name).read_only(),
        field!(Tracker, "default_status", Ref, default_status).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Declares one of the `/enumerations/*` lists; they share a shape.
macro_rules! enumeration {
    ($(#[$meta:meta])* $name:ident, $root:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq)]
        pub struct $name {
            pub id: i32,
            pub name: Option<String>,
            pub is_default: bool,
            pub active: bool,
        }

        impl Entity for $name {
            const ROOT: &'static str = $root;
            const FIELDS: &'static [FieldDef<Self>] = &[
                field!($name, "id", Int, id).read_only(),
                field!($name, "name", Str, name).read_only(),
                field!($name, "is_default", Bool, is_default).read_only(),
                field!($name, "active", Bool, active).read_only(),
            ];

            fn id(&self) -> i32 {
                self.id
            }

            fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }
        }
    };
}

enumeration! {
    /// An issue priority (`/enumerations/issue_priorities`).
    IssuePriority, "issue_priority"
}

enumeration! {
    /// A time tracking activity (`/enumerations/time_entry_activities`).
    TimeEntryActivity, "time_entry_activity"
}

/// A saved issue query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pub id: i32,
    pub name: Option<String>,
    pub is_public: bool,
    pub project_id: Option<i32>,
}

impl Entity for Query {
    const ROOT: &'static str = "query";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(Query, "id", Int, id).read_only(),
        field!(Query, "name", Str, name).read_only(),
        field!(Query, "is_public", Bool, is_public).read_only(),
        field!(Query, "project_id", Int, project_id).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
