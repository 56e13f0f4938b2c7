//! Time entries.

use chrono::{DateTime, NaiveDate, Utc};

use super::{IssueCustomField, Reference};
use crate::schema::{collection, field, Entity, FieldDef};

/// Time logged against an issue or a project.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeEntry {
    pub id: i32,
    pub issue: Option<Reference>,
    pub project: Option<Reference>,
    pub spent_on: Option<NaiveDate>,
    pub hours: Option<f64>,
    pub activity: Option<Reference>,
    pub comments: Option<String>,
    pub user: Option<Reference>,
    pub custom_fields: Option<Vec<IssueCustomField>>,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl Entity for TimeEntry {
    const ROOT: &'static str = "time_entry";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(TimeEntry, "id", Int, id).read_only(),
        field!(TimeEntry, "issue", Ref, issue).id_only("issue_id"),
        field!(TimeEntry, "project", Ref, project).id_only("project_id"),
        field!(TimeEntry, "spent_on", Date, spent_on),
        field!(TimeEntry, "hours", Decimal, hours),
        field!(TimeEntry, "activity", Ref, activity).id_only("activity_id"),
        field!(TimeEntry, "comments", Str, comments),
        field!(TimeEntry, "user", Ref, user).id_only("user_id"),
        collection!(TimeEntry, "custom_fields", "custom_field", IssueCustomField, custom_fields),
        field!(TimeEntry, "created_on", DateTime, created_on).read_only(),
        field!(TimeEntry, "updated_on", DateTime, updated_on).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }
}
