//! Redmine record types.
//!
//! Each record is a plain struct with a hand-written [`Entity`] schema. The
//! closed set of records is mirrored by [`RecordKind`] (a type tag used to
//! look up converters) and [`Record`] (a sum type carrying any one record).

/// Declares a record that is nothing but an `id` and `name` pair carried in
/// attributes of its element, like `<tracker id="1" name="Bug"/>`.
macro_rules! named_record {
    ($(#[$meta:meta])* $name:ident, $root:literal $(, $access:ident)?) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq)]
        pub struct $name {
            pub id: i32,
            pub name: Option<String>,
        }

        impl $crate::schema::Entity for $name {
            const ROOT: &'static str = $root;
            const FIELDS: &'static [$crate::schema::FieldDef<Self>] = &[
                $crate::schema::field!($name, "id", Int, id).attribute()$(.$access())?,
                $crate::schema::field!($name, "name", Str, name).attribute()$(.$access())?,
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

mod attachment;
mod custom_field;
mod enumerations;
mod issue;
mod journal;
mod membership;
mod project;
mod reference;
mod server_error;
mod time_entry;
mod user;
mod version;
mod wiki;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};
use crate::schema::Entity;

pub use attachment::{Attachment, Upload};
pub use custom_field::{
    CustomField, CustomFieldPossibleValue, CustomFieldRole, CustomFieldValue, IssueCustomField,
    TrackerCustomField,
};
pub use enumerations::{IssuePriority, IssueStatus, Query, TimeEntryActivity, Tracker};
pub use issue::{Issue, IssueChild, IssueRelation, RelationType, Watcher};
pub use journal::{ChangeSet, Detail, Journal};
pub use membership::{Membership, MembershipRole, Permission, ProjectMembership, Role};
pub use project::{
    IssueCategory, News, Project, ProjectEnabledModule, ProjectIssueCategory, ProjectStatus,
    ProjectTracker,
};
pub use reference::Reference;
pub use server_error::ServerError;
pub use time_entry::TimeEntry;
pub use user::{Group, GroupUser, User, UserGroup, UserStatus};
pub use version::{Version, VersionSharing, VersionStatus};
pub use wiki::WikiPage;

/// Glue between a concrete record struct and the [`Record`] sum type.
///
/// Implemented for every record by the `records!` table below; schema code
/// only ever sees it through the [`Entity`] supertrait.
pub trait Variant: Sized {
    /// The type tag for this record.
    const KIND: RecordKind;

    /// Wrap this record in the sum type.
    fn into_record(self) -> Record;

    /// Unwrap a record of this type, or `None` for any other type.
    fn from_record(record: Record) -> Option<Self>;

    /// Borrow a record of this type out of the sum type.
    fn from_record_ref(record: &Record) -> Option<&Self>;
}

macro_rules! records {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Type tag identifying one record type.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum RecordKind {
            $($variant),+
        }

        impl RecordKind {
            /// Every record type, in declaration order.
            pub const ALL: &'static [RecordKind] = &[$(RecordKind::$variant),+];

            /// The snake_case name of this record type.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(RecordKind::$variant => $name),+
                }
            }
        }

        impl FromStr for RecordKind {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($name => Ok(RecordKind::$variant),)+
                    _ => Err(InvalidInputError::RecordKind {
                        value: s.to_string(),
                    }
                    .into()),
                }
            }
        }

        /// Any one decoded record.
        #[derive(Clone, Debug, PartialEq)]
        pub enum Record {
            $($variant($variant)),+
        }

        impl Record {
            /// The type tag of the carried record.
            pub fn kind(&self) -> RecordKind {
                match self {
                    $(Record::$variant(_) => RecordKind::$variant),+
                }
            }

            /// Identity of the carried record (`0` when not yet created).
            pub fn id(&self) -> i32 {
                match self {
                    $(Record::$variant(record) => Entity::id(record)),+
                }
            }

            /// Display name of the carried record, if the type has one.
            pub fn name(&self) -> Option<&str> {
                match self {
                    $(Record::$variant(record) => Entity::name(record)),+
                }
            }
        }

        $(
            impl Variant for $variant {
                const KIND: RecordKind = RecordKind::$variant;

                fn into_record(self) -> Record {
                    Record::$variant(self)
                }

                fn from_record(record: Record) -> Option<Self> {
                    match record {
                        Record::$variant(inner) => Some(inner),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn from_record_ref(record: &Record) -> Option<&Self> {
                    match record {
                        Record::$variant(inner) => Some(inner),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }

            impl From<$variant> for Record {
                fn from(record: $variant) -> Self {
                    Record::$variant(record)
                }
            }
        )+
    };
}

records! {
    Issue => "issue",
    Project => "project",
    User => "user",
    Group => "group",
    GroupUser => "group_user",
    UserGroup => "user_group",
    News => "news",
    Query => "query",
    Version => "version",
    Attachment => "attachment",
    IssueRelation => "issue_relation",
    TimeEntry => "time_entry",
    IssueStatus => "issue_status",
    Tracker => "tracker",
    TrackerCustomField => "tracker_custom_field",
    IssueCategory => "issue_category",
    Role => "role",
    ProjectMembership => "project_membership",
    ServerError => "error",
    IssueCustomField => "issue_custom_field",
    ProjectTracker => "project_tracker",
    Journal => "journal",
    TimeEntryActivity => "time_entry_activity",
    IssuePriority => "issue_priority",
    WikiPage => "wiki_page",
    Detail => "detail",
    ChangeSet => "changeset",
    Membership => "membership",
    MembershipRole => "membership_role",
    Permission => "permission",
    IssueChild => "issue_child",
    ProjectIssueCategory => "project_issue_category",
    Watcher => "watcher",
    Upload => "upload",
    ProjectEnabledModule => "project_enabled_module",
    CustomField => "custom_field",
    CustomFieldRole => "custom_field_role",
    CustomFieldPossibleValue => "custom_field_possible_value",
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for RecordKind {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RecordKind> for String {
    fn from(kind: RecordKind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_roundtrip() {
        for kind in RecordKind::ALL {
            assert_eq!(kind.as_str().parse::<RecordKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!("Issue".parse::<RecordKind>().unwrap(), RecordKind::Issue);
        assert_eq!("WIKI_PAGE".parse::<RecordKind>().unwrap(), RecordKind::WikiPage);
    }

    #[test]
    fn unknown_kind_fails() {
        let err = "sprocket".parse::<RecordKind>().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(InvalidInputError::RecordKind { .. })));
    }

    #[test]
    fn record_dispatch() {
        let record = Record::from(Watcher {
            id: 7,
            name: Some("Jane".to_string()),
        });
        assert_eq!(record.kind(), RecordKind::Watcher);
        assert_eq!(record.id(), 7);
        assert_eq!(record.name(), Some("Jane"));
        assert!(Watcher::from_record_ref(&record).is_some());
        assert!(Issue::from_record(record).is_none());
    }
}
