//! Projects and the records scoped to them.

use chrono::{DateTime, Utc};

use super::{IssueCustomField, Reference};
use crate::schema::{collection, field, int_enum, Entity, FieldDef};

int_enum! {
    /// Lifecycle state of a project.
    pub enum ProjectStatus {
        Active = 1,
        Closed = 5,
        Archived = 9,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Project {
    pub id: i32,
    pub name: Option<String>,
    pub identifier: Option<String>,
    pub description: Option<String>,
    pub parent: Option<Reference>,
    pub homepage: Option<String>,
    pub is_public: Option<bool>,
    pub inherit_members: Option<bool>,
    pub status: Option<ProjectStatus>,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
    pub trackers: Option<Vec<ProjectTracker>>,
    pub enabled_modules: Option<Vec<ProjectEnabledModule>>,
    pub custom_fields: Option<Vec<IssueCustomField>>,
    pub issue_categories: Option<Vec<ProjectIssueCategory>>,
}

impl Entity for Project {
    const ROOT: &'static str = "project";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(Project, "id", Int, id).read_only(),
        field!(Project, "name", Str, name),
        field!(Project, "identifier", Str, identifier),
        field!(Project, "description", Str, description),
        field!(Project, "parent", Ref, parent).id_only("parent_id"),
        field!(Project, "homepage", Str, homepage),
        field!(Project, "is_public", Bool, is_public),
        field!(Project, "inherit_members", Bool, inherit_members),
        collection!(Project, "trackers", "tracker", ProjectTracker, trackers)
            .id_list("tracker_ids", "tracker_id"),
        collection!(
            Project,
            "enabled_modules",
            "enabled_module",
            ProjectEnabledModule,
            enabled_modules
        )
        .names("enabled_module_names", "enabled_module_name"),
        collection!(Project, "custom_fields", "custom_field", IssueCustomField, custom_fields),
        field!(Project, "status", Int, status).read_only(),
        field!(Project, "created_on", DateTime, created_on).read_only(),
        field!(Project, "updated_on", DateTime, updated_on).read_only(),
        collection!(
            Project,
            "issue_categories",
            "issue_category",
            ProjectIssueCategory,
            issue_categories
        )
        .read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

named_record! {
    /// A tracker enabled on a project.
    ProjectTracker, "tracker"
}

named_record! {
    /// A module (`issue_tracking`, `wiki`, ...) enabled on a project.
    ProjectEnabledModule, "enabled_module"
}

named_record! {
    /// An issue category as listed inside a project.
    ProjectIssueCategory, "issue_category"
}

/// An issue category, as managed through `/projects/:id/issue_categories`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IssueCategory {
    pub id: i32,
    pub project: Option<Reference>,
    pub name: Option<String>,
    pub assigned_to: Option<Reference>,
}

impl Entity for IssueCategory {
    const ROOT: &'static str = "issue_category";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(IssueCategory, "id", Int, id).read_only(),
        field!(IssueCategory, "project", Ref, project).read_only(),
        field!(IssueCategory, "name", Str, name),
        field!(IssueCategory, "assigned_to", Ref, assigned_to).id_only("assigned_to_id"),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A news item posted in a project.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct News {
    pub id: i32,
    pub project: Option<Reference>,
    pub author: Option<Reference>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
}

impl Entity for News {
    const ROOT: &'static str = "news";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(News, "id", Int, id).read_only(),
        field!(News, "project", Ref, project).read_only(),
        field!(News, "author", Ref, author).read_only(),
        field!(News, "title", Str, title).read_only(),
        field!(News, "summary", Str, summary).read_only(),
        field!(News, "description", Str, description).read_only(),
        field!(News, "created_on", DateTime, created_on).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.title.as_deref()
    }
}
