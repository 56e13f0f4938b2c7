//! Issues and the records that hang off them.

use chrono::{DateTime, NaiveDate, Utc};

use super::{Attachment, ChangeSet, IssueCustomField, Journal, Reference, Upload};
use crate::schema::{collection, field, string_enum, Entity, FieldDef};

/// An issue (ticket).
///
/// Every reference is written back as its id alone (`project_id`,
/// `status_id`, ...), even when the reference also carries a name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Issue {
    pub id: i32,
    pub project: Option<Reference>,
    pub tracker: Option<Reference>,
    pub status: Option<Reference>,
    pub priority: Option<Reference>,
    pub author: Option<Reference>,
    pub category: Option<Reference>,
    pub assigned_to: Option<Reference>,
    pub parent: Option<Reference>,
    pub fixed_version: Option<Reference>,
    pub release: Option<Reference>,
    pub subject: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    /// Only sent when updating an existing issue.
    pub private_notes: bool,
    pub is_private: bool,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub done_ratio: Option<i32>,
    pub estimated_hours: Option<f64>,
    pub spent_hours: Option<f64>,
    pub story_points: Option<f64>,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
    pub closed_on: Option<DateTime<Utc>>,
    pub custom_fields: Option<Vec<IssueCustomField>>,
    pub uploads: Option<Vec<Upload>>,
    pub watchers: Option<Vec<Watcher>>,
    pub journals: Option<Vec<Journal>>,
    pub changesets: Option<Vec<ChangeSet>>,
    pub attachments: Option<Vec<Attachment>>,
    pub relations: Option<Vec<IssueRelation>>,
    pub children: Option<Vec<IssueChild>>,
}

impl Entity for Issue {
    const ROOT: &'static str = "issue";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(Issue, "id", Int, id).read_only(),
        field!(Issue, "subject", Str, subject),
        field!(Issue, "notes", Str, notes),
        field!(Issue, "private_notes", Bool, private_notes).persisted_only(),
        field!(Issue, "description", Str, description),
        field!(Issue, "is_private", Bool, is_private),
        field!(Issue, "project", Ref, project).id_only("project_id"),
        field!(Issue, "priority", Ref, priority).id_only("priority_id"),
        field!(Issue, "status", Ref, status).id_only("status_id"),
        field!(Issue, "category", Ref, category).id_only("category_id"),
        field!(Issue, "tracker", Ref, tracker).id_only("tracker_id"),
        field!(Issue, "assigned_to", Ref, assigned_to).id_only("assigned_to_id"),
        field!(Issue, "parent", Ref, parent).id_only("parent_issue_id"),
        field!(Issue, "fixed_version", Ref, fixed_version).id_only("fixed_version_id"),
        field!(Issue, "estimated_hours", Decimal, estimated_hours),
        field!(Issue, "done_ratio", Int, done_ratio),
        field!(Issue, "start_date", Date, start_date),
        field!(Issue, "due_date", Date, due_date),
        collection!(Issue, "uploads", "upload", Upload, uploads).write_only(),
        collection!(Issue, "custom_fields", "custom_field", IssueCustomField, custom_fields),
        collection!(Issue, "watchers", "user", Watcher, watchers)
            .id_list("watcher_user_ids", "watcher_user_id"),
        field!(Issue, "release", Ref, release).id_only("release_id"),
        field!(Issue, "story_points", Decimal, story_points),
        field!(Issue, "author", Ref, author).read_only(),
        field!(Issue, "spent_hours", Decimal, spent_hours).read_only(),
        field!(Issue, "created_on", DateTime, created_on).read_only(),
        field!(Issue, "updated_on", DateTime, updated_on).read_only(),
        field!(Issue, "closed_on", DateTime, closed_on).read_only(),
        collection!(Issue, "journals", "journal", Journal, journals).read_only(),
        collection!(Issue, "changesets", "changeset", ChangeSet, changesets).read_only(),
        collection!(Issue, "attachments", "attachment", Attachment, attachments).read_only(),
        collection!(Issue, "relations", "relation", IssueRelation, relations).read_only(),
        collection!(Issue, "children", "issue", IssueChild, children).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.subject)
    }
}

/// A sub-issue as listed under its parent's `children`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IssueChild {
    pub id: i32,
    pub tracker: Option<Reference>,
    pub subject: Option<String>,
    pub children: Option<Vec<IssueChild>>,
}

impl Entity for IssueChild {
    const ROOT: &'static str = "issue";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(IssueChild, "id", Int, id).attribute().read_only(),
        field!(IssueChild, "tracker", Ref, tracker).read_only(),
        field!(IssueChild, "subject", Str, subject).read_only(),
        collection!(IssueChild, "children", "issue", IssueChild, children).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.subject.as_deref()
    }
}

string_enum! {
    /// How two issues are related.
    pub enum RelationType {
        Relates => "relates",
        Duplicates => "duplicates",
        Duplicated => "duplicated",
        Blocks => "blocks",
        Blocked => "blocked",
        Precedes => "precedes",
        Follows => "follows",
        CopiedTo => "copied_to",
        CopiedFrom => "copied_from",
    }
}

impl RelationType {
    /// Returns true for the relation types that carry a delay in days.
    pub fn is_scheduling(self) -> bool {
        matches!(self, RelationType::Precedes | RelationType::Follows)
    }
}

/// A relation between two issues.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IssueRelation {
    pub id: i32,
    pub issue_id: i32,
    pub issue_to_id: i32,
    pub relation_type: Option<RelationType>,
    /// Days between the two issues; only meaningful for precedes/follows.
    pub delay: Option<i32>,
}

impl Entity for IssueRelation {
    const ROOT: &'static str = "relation";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(IssueRelation, "id", Int, id).read_only(),
        field!(IssueRelation, "issue_id", Int, issue_id).read_only(),
        field!(IssueRelation, "issue_to_id", Int, issue_to_id),
        field!(IssueRelation, "relation_type", Str, relation_type),
        field!(IssueRelation, "delay", Int, delay).write_when(|relation| {
            relation
                .relation_type
                .is_some_and(RelationType::is_scheduling)
        }),
    ];

    fn id(&self) -> i32 {
        self.id
    }
}

named_record! {
    /// A user watching an issue.
    Watcher, "user"
}
