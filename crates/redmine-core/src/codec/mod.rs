//! Wire codecs.
//!
//! [`Codec`] is the entry point: it pairs a [`Registry`] with a [`Format`]
//! and turns records into request bodies and response bodies into records.

mod collection;
mod json;
pub(crate) mod plan;
mod reference;
mod scalar;
pub mod xml;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::Result;
use crate::error::{Error, InvalidInputError};
use crate::registry::{Converter, Registry};
use crate::schema::Entity;
use crate::types::{Record, RecordKind};
use plan::{Mode, Plan};

pub(crate) use json::read_record as read_json_record;
pub(crate) use xml::read_record as read_xml_record;

/// A wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Xml,
    Json,
}

impl Format {
    /// The MIME type request and response bodies are sent as.
    pub fn mime_type(self) -> &'static str {
        match self {
            Format::Xml => "application/xml",
            Format::Json => "application/json",
        }
    }

    /// The path suffix the REST API uses (`/issues.json`).
    pub fn extension(self) -> &'static str {
        match self {
            Format::Xml => "xml",
            Format::Json => "json",
        }
    }

    /// Resolves a `Content-Type` value, ignoring parameters such as `charset`.
    pub fn from_mime(mime: &str) -> Result<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/xml" | "text/xml" => Ok(Format::Xml),
            "application/json" => Ok(Format::Json),
            _ => Err(InvalidInputError::Format {
                value: mime.to_string(),
            }
            .into()),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(Format::Xml),
            "json" => Ok(Format::Json),
            _ => Err(InvalidInputError::Format {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// A decoded list response.
#[derive(Clone, Debug, PartialEq)]
pub struct ListEnvelope<T> {
    /// Items in document order.
    pub items: Vec<T>,
    /// Total matching records on the server; `0` when not reported.
    pub total_count: u32,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    /// Root key the list was read from.
    pub root: String,
}

impl<T> ListEnvelope<T> {
    /// An envelope with no items and no paging information.
    pub fn empty(root: &str) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            offset: None,
            limit: None,
            root: root.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Converts the items, dropping those `f` rejects. Paging fields are kept.
    pub fn filter_map<U>(self, f: impl FnMut(T) -> Option<U>) -> ListEnvelope<U> {
        ListEnvelope {
            items: self.items.into_iter().filter_map(f).collect(),
            total_count: self.total_count,
            offset: self.offset,
            limit: self.limit,
            root: self.root,
        }
    }
}

impl<T> IntoIterator for ListEnvelope<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Encodes and decodes records in one wire format.
///
/// # Example
///
/// ```
/// use redmine_core::{Codec, Format, Registry, TimeEntry};
///
/// let codec = Codec::new(Registry::global(), Format::Xml);
/// let entry = codec
///     .deserialize::<TimeEntry>("<time_entry><id>4</id><hours>1.5</hours></time_entry>")
///     .unwrap()
///     .unwrap();
/// assert_eq!(entry.hours, Some(1.5));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Codec<'r> {
    registry: &'r Registry,
    format: Format,
}

impl<'r> Codec<'r> {
    pub fn new(registry: &'r Registry, format: Format) -> Self {
        Self { registry, format }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    /// Encodes a record as a create/update request body.
    ///
    /// Read-only fields are left out, references are written by id where the
    /// schema says so, and absent optional fields are omitted.
    #[instrument(skip(self, record), fields(format = %self.format, kind = %T::KIND))]
    pub fn serialize<T: Entity>(&self, record: &T) -> Result<String> {
        let converter = self.registry.converter(T::KIND)?;
        let plan = plan::build(self.registry, record, Mode::Write)?;
        self.render(converter, &plan, true, false)
    }

    /// Like [`serialize`](Self::serialize), without the markup declaration.
    #[instrument(skip(self, record), fields(format = %self.format, kind = %T::KIND))]
    pub fn serialize_fragment<T: Entity>(&self, record: &T) -> Result<String> {
        let converter = self.registry.converter(T::KIND)?;
        let plan = plan::build(self.registry, record, Mode::Write)?;
        self.render(converter, &plan, false, false)
    }

    /// Encodes a record of any registered type as a request body.
    #[instrument(skip(self, record), fields(format = %self.format, kind = %record.kind()))]
    pub fn serialize_record(&self, record: &Record) -> Result<String> {
        let converter = self.registry.converter(record.kind())?;
        let plan = converter.plan(self.registry, record, Mode::Write)?;
        self.render(converter, &plan, true, false)
    }

    /// Encodes every readable field of a record, read-only ones included,
    /// under its read key. JSON output is pretty-printed.
    #[instrument(skip(self, record), fields(format = %self.format, kind = %record.kind()))]
    pub fn dump(&self, record: &Record) -> Result<String> {
        let converter = self.registry.converter(record.kind())?;
        let plan = converter.plan(self.registry, record, Mode::Dump)?;
        self.render(converter, &plan, true, true)
    }

    fn render(
        &self,
        converter: &Converter,
        plan: &Plan,
        declaration: bool,
        pretty: bool,
    ) -> Result<String> {
        match self.format {
            Format::Xml => Ok(xml::encode(converter.root(), plan, declaration)),
            Format::Json => json::encode(converter.root(), plan, pretty),
        }
    }

    // ========================================================================
    // Decoding
    // ========================================================================

    /// Decodes a single record response.
    ///
    /// Returns `Ok(None)` for an empty body or when the document holds no
    /// record under the type's root key.
    pub fn deserialize<T: Entity>(&self, document: &str) -> Result<Option<T>> {
        let record = self.deserialize_kind(document, T::KIND, None)?;
        Ok(record.and_then(T::from_record))
    }

    /// Decodes a single record of type `kind`, read from `root` (defaults to
    /// the type's own root key).
    #[instrument(skip(self, document), fields(format = %self.format, %kind))]
    pub fn deserialize_kind(
        &self,
        document: &str,
        kind: RecordKind,
        root: Option<&str>,
    ) -> Result<Option<Record>> {
        let converter = self.registry.converter(kind)?;
        if document.trim().is_empty() {
            debug!("empty document");
            return Ok(None);
        }
        let root = root.unwrap_or(converter.root());
        match self.format {
            Format::Xml => xml::decode(self.registry, converter, document, root),
            Format::Json => json::decode(self.registry, converter, document, root),
        }
    }

    /// Decodes a list response whose items sit under `root` (`"issues"`).
    ///
    /// Any item that fails to decode fails the whole list.
    pub fn deserialize_list<T: Entity>(&self, document: &str, root: &str) -> Result<ListEnvelope<T>> {
        let envelope = self.deserialize_list_kind(document, T::KIND, root)?;
        Ok(envelope.filter_map(T::from_record))
    }

    /// Decodes a list response of records of type `kind`.
    #[instrument(skip(self, document), fields(format = %self.format, %kind))]
    pub fn deserialize_list_kind(
        &self,
        document: &str,
        kind: RecordKind,
        root: &str,
    ) -> Result<ListEnvelope<Record>> {
        let converter = self.registry.converter(kind)?;
        if document.trim().is_empty() {
            debug!("empty document");
            return Ok(ListEnvelope::empty(root));
        }
        let envelope = match self.format {
            Format::Xml => xml::decode_list(self.registry, converter, document, root)?,
            Format::Json => json::decode_list(self.registry, converter, document, root)?,
        };
        debug!(
            items = envelope.items.len(),
            total_count = envelope.total_count,
            "decoded list"
        );
        Ok(envelope)
    }
}
