//! Attachments and upload tokens.

use chrono::{DateTime, Utc};

use super::Reference;
use crate::schema::{field, Entity, FieldDef};

/// A file attached to an issue, wiki page or project.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attachment {
    pub id: i32,
    pub filename: Option<String>,
    pub filesize: Option<i64>,
    pub content_type: Option<String>,
    pub description: Option<String>,
    pub content_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub author: Option<Reference>,
    pub created_on: Option<DateTime<Utc>>,
}

impl Entity for Attachment {
    const ROOT: &'static str = "attachment";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(Attachment, "id", Int, id).read_only(),
        field!(Attachment, "filename", Str, filename),
        field!(Attachment, "filesize", Int, filesize).read_only(),
        field!(Attachment, "content_type", Str, content_type).read_only(),
        field!(Attachment, "description", Str, description),
        field!(Attachment, "content_url", Str, content_url).read_only(),
        field!(Attachment, "thumbnail_url", Str, thumbnail_url).read_only(),
        field!(Attachment, "author", Ref, author).read_only(),
        field!(Attachment, "created_on", DateTime, created_on).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}

/// A previously uploaded file, referenced by token when creating an issue or
/// updating a wiki page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Upload {
    pub token: Option<String>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub description: Option<String>,
}

impl Entity for Upload {
    const ROOT: &'static str = "upload";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(Upload, "token", Str, token),
        field!(Upload, "filename", Str, filename),
        field!(Upload, "content_type", Str, content_type),
        field!(Upload, "description", Str, description),
    ];

    fn name(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}
