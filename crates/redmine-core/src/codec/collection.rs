//! Sequences of sub-records under a wrapper key.
//!
//! Each item is decoded by its own converter, looked up in the registry.
//! Order is preserved and nothing is deduplicated.

use roxmltree::Node;
use serde_json::Value;
use tracing::trace;

use crate::Result;
use crate::registry::Registry;
use crate::types::{Record, RecordKind};

/// Decodes the `item` children of a wrapper element.
pub(crate) fn read_xml(
    registry: &Registry,
    wrapper: Node<'_, '_>,
    item: &str,
    kind: RecordKind,
) -> Result<Vec<Record>> {
    let converter = registry.converter(kind)?;
    let mut records = Vec::new();
    for child in wrapper.children().filter(Node::is_element) {
        let name = child.tag_name().name();
        if name != item {
            trace!(%kind, name, "skipping foreign collection item");
            continue;
        }
        records.push(converter.read_xml(registry, child)?);
    }
    Ok(records)
}

/// Decodes an array of items. Nested arrays are flattened in source order.
pub(crate) fn read_json(registry: &Registry, items: &[Value], kind: RecordKind) -> Result<Vec<Record>> {
    let converter = registry.converter(kind)?;
    let mut flat = Vec::with_capacity(items.len());
    flatten(items, &mut flat);
    flat.into_iter()
        .map(|item| converter.read_json(registry, item))
        .collect()
}

/// Collects the non-array leaves of `items`, depth first.
pub(crate) fn flatten<'v>(items: &'v [Value], out: &mut Vec<&'v Value>) {
    for item in items {
        match item {
            Value::Array(nested) => flatten(nested, out),
            other => out.push(other),
        }
    }
}

/// Joins the fragments of an error list, each followed by one space.
///
/// `["bad id", ["missing name"]]` becomes `"bad id missing name "`. A
/// fragment that is not text contributes only its separator.
pub(crate) fn join_fragments(items: &[Value]) -> String {
    let mut leaves = Vec::new();
    flatten(items, &mut leaves);
    let mut joined = String::new();
    for leaf in leaves {
        match leaf {
            Value::String(fragment) => joined.push_str(fragment),
            other => trace!(?other, "non-text error fragment"),
        }
        joined.push(' ');
    }
    joined
}
