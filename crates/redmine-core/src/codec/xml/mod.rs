//! The markup (XML) format.

mod reader;
mod writer;

use roxmltree::{Document, Node};
use tracing::debug;

use super::plan::Plan;
use super::{Format, ListEnvelope};
use crate::Result;
use crate::error::MalformedDocumentError;
use crate::registry::{Converter, Registry};
use crate::types::Record;

pub(crate) use reader::read_record;
pub use writer::XmlWriter;

fn parse(document: &str) -> Result<Document<'_>> {
    Document::parse(document)
        .map_err(|err| MalformedDocumentError::new(Format::Xml, err.to_string()).into())
}

/// Decodes a document whose root element is one record.
///
/// A root element with another name yields `None`.
pub(crate) fn decode(
    registry: &Registry,
    converter: &Converter,
    document: &str,
    root: &str,
) -> Result<Option<Record>> {
    let doc = parse(document)?;
    let element = doc.root_element();
    let name = element.tag_name().name();
    if !name.eq_ignore_ascii_case(root) {
        debug!(expected = root, found = name, "root element does not match");
        return Ok(None);
    }
    converter.read_xml(registry, element).map(Some)
}

/// Decodes `<issues total_count="2" offset="0" limit="25"><issue>..</issue>..</issues>`.
///
/// Children named after the item root, in any case, are decoded in order; a
/// root element with another name yields an empty envelope.
pub(crate) fn decode_list(
    registry: &Registry,
    converter: &Converter,
    document: &str,
    root: &str,
) -> Result<ListEnvelope<Record>> {
    let doc = parse(document)?;
    let element = doc.root_element();
    let name = element.tag_name().name();
    if !name.eq_ignore_ascii_case(root) {
        debug!(expected = root, found = name, "list root element does not match");
        return Ok(ListEnvelope::empty(root));
    }

    let items = element
        .children()
        .filter(Node::is_element)
        .filter(|child| child.tag_name().name().eq_ignore_ascii_case(converter.root()))
        .map(|child| converter.read_xml(registry, child))
        .collect::<Result<Vec<_>>>()?;

    Ok(ListEnvelope {
        items,
        total_count: count_attribute(element, "total_count")?.unwrap_or(0),
        offset: count_attribute(element, "offset")?,
        limit: count_attribute(element, "limit")?,
        root: root.to_string(),
    })
}

/// Renders a record plan as a document rooted at `root`.
pub(crate) fn encode(root: &str, plan: &Plan, declaration: bool) -> String {
    let mut writer = if declaration {
        XmlWriter::with_declaration()
    } else {
        XmlWriter::new()
    };
    writer::write_record(&mut writer, root, plan);
    writer.finish()
}

fn count_attribute(element: Node<'_, '_>, name: &str) -> Result<Option<u32>> {
    let Some(text) = element.attribute(name).map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    text.parse().map(Some).map_err(|_| {
        MalformedDocumentError::new(
            Format::Xml,
            format!("{} '{}' is not a count", name, text),
        )
        .into()
    })
}
