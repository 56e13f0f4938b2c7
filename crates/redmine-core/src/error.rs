//! Error types for redmine-core.
//!
//! Codec failures are split by cause: a type nobody registered, a document
//! that is not a well-formed tree, a field whose content cannot be coerced to
//! its declared kind, and a schema table that breaks its own invariants.
//! A server-side error response is *not* one of these; it decodes
//! successfully into a [`ServerError`](crate::ServerError) record.

use std::fmt;
use thiserror::Error;

use crate::codec::Format;
use crate::types::RecordKind;

/// The unified error type for codec operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No converter is registered for the requested record type.
    #[error("no converter registered for record type '{kind}'")]
    UnknownType { kind: RecordKind },

    /// The input could not be parsed as a document tree at all.
    #[error("malformed document: {0}")]
    MalformedDocument(#[from] MalformedDocumentError),

    /// A present field could not be coerced to its declared kind.
    #[error("field decode error: {0}")]
    FieldDecode(#[from] FieldDecodeError),

    /// A schema table violates its invariants.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// Input validation errors (unknown format or record type names).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// The wire input is not a parseable tree, or its top-level shape is wrong.
#[derive(Debug)]
pub struct MalformedDocumentError {
    /// Wire format the document was read as.
    pub format: Format,
    /// Parser or shape diagnostic.
    pub message: String,
}

impl MalformedDocumentError {
    /// Create a new malformed document error.
    pub fn new(format: Format, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}

impl fmt::Display for MalformedDocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} document: {}", self.format, self.message)
    }
}

impl std::error::Error for MalformedDocumentError {}

/// A field was present but its content does not fit the declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecodeError {
    /// Record type being decoded.
    pub record: RecordKind,
    /// Wire key of the offending field.
    pub field: String,
    /// Why the content was rejected.
    pub reason: String,
}

impl FieldDecodeError {
    /// Create a new field decode error.
    pub fn new(record: RecordKind, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            record,
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.record, self.field, self.reason)
    }
}

impl std::error::Error for FieldDecodeError {}

/// Schema table errors, reported when a registry is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two readable descriptors share a wire key.
    #[error("{record}: duplicate read key '{key}'")]
    DuplicateReadKey { record: RecordKind, key: &'static str },

    /// Two writable descriptors share a wire key.
    #[error("{record}: duplicate write key '{key}'")]
    DuplicateWriteKey { record: RecordKind, key: &'static str },

    /// A write policy was attached to a field kind it cannot encode.
    #[error("{record}: write policy of '{key}' does not fit its kind")]
    PolicyMismatch { record: RecordKind, key: &'static str },

    /// More than one descriptor reads the element's text content.
    #[error("{record}: more than one content field")]
    DuplicateContent { record: RecordKind },

    /// The same record type was registered twice.
    #[error("converter for '{kind}' registered twice")]
    DuplicateConverter { kind: RecordKind },

    /// An extractor produced a value that does not match the field kind.
    #[error("{record}: value of '{key}' does not match its kind")]
    ValueMismatch { record: RecordKind, key: &'static str },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Unknown wire format name or MIME type.
    #[error("unknown format '{value}'")]
    Format { value: String },

    /// Unknown record type name.
    #[error("unknown record type '{value}'")]
    RecordKind { value: String },
}
