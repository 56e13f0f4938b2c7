//! Wiki pages.

use chrono::{DateTime, Utc};

use super::{Attachment, Reference, Upload};
use crate::schema::{collection, field, Entity, FieldDef};

/// A wiki page. Pages are addressed by title, not id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WikiPage {
    pub title: Option<String>,
    pub text: Option<String>,
    pub comments: Option<String>,
    /// Page revision; sent back on update to detect conflicting edits.
    pub version: Option<i32>,
    pub author: Option<Reference>,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
    pub attachments: Option<Vec<Attachment>>,
    pub uploads: Option<Vec<Upload>>,
}

impl Entity for WikiPage {
    const ROOT: &'static str = "wiki_page";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(WikiPage, "title", Str, title).read_only(),
        field!(WikiPage, "text", Str, text),
        field!(WikiPage, "comments", Str, comments),
        field!(WikiPage, "version", Int, version),
        collection!(WikiPage, "uploads", "upload", Upload, uploads).write_only(),
        field!(WikiPage, "author", Ref, author).read_only(),
        field!(WikiPage, "created_on", DateTime, created_on).read_only(),
        field!(WikiPage, "updated_on", DateTime, updated_on).read_only(),
        collection!(WikiPage, "attachments", "attachment", Attachment, attachments).read_only(),
    ];

    fn name(&self) -> Option<&str> {
        self.title.as_deref()
    }
}
