//! Markup decoding: walks a record element against its entity schema.

use roxmltree::Node;
use tracing::trace;

use crate::codec::{collection, reference, scalar};
use crate::Result;
use crate::error::FieldDecodeError;
use crate::registry::Registry;
use crate::schema::{Entity, FieldDef, FieldKind, FieldValue, Placement, ValueError};
use crate::types::CustomFieldValue;

/// Decodes one record from its element.
///
/// Scalar fields are read from same-named attributes first (item shapes such
/// as `<relation id="1" issue_to_id="2"/>` carry everything there), then from
/// child elements. Unknown children and empty leaf elements are skipped.
pub(crate) fn read_record<T: Entity>(registry: &Registry, node: Node<'_, '_>) -> Result<T> {
    let mut record = T::default();

    for field in T::FIELDS.iter().filter(|field| field.reads()) {
        match field.placement {
            Placement::Content => {
                let text = text_of(node);
                if !text.is_empty() {
                    let value = scalar::parse_text(field.kind, &text);
                    store(field, &mut record, value)?;
                }
            }
            Placement::Attribute | Placement::Element if field.kind.is_scalar() => {
                if let Some(text) = node.attribute(field.key).filter(|text| !text.is_empty()) {
                    let value = scalar::parse_text(field.kind, text);
                    store(field, &mut record, value)?;
                }
            }
            _ => {}
        }
    }

    for child in node.children().filter(Node::is_element) {
        let key = child.tag_name().name();
        let Some(field) = T::FIELDS
            .iter()
            .find(|field| field.reads() && field.placement == Placement::Element && field.key == key)
        else {
            trace!(record = %T::KIND, key, "skipping unknown element");
            continue;
        };
        if is_empty_leaf(child) {
            trace!(record = %T::KIND, key, "skipping empty element");
            continue;
        }

        let value = match field.kind {
            FieldKind::Ref => reference::from_xml(child).map(FieldValue::Reference),
            FieldKind::Records { item, kind } => {
                let items = collection::read_xml(registry, child, item, kind)?;
                Ok(FieldValue::Records(items))
            }
            FieldKind::Custom => Ok(FieldValue::Custom(custom_value(child))),
            kind => scalar::parse_text(kind, &text_of(child)),
        };
        store(field, &mut record, value)?;
    }

    Ok(record)
}

fn store<T: Entity>(
    field: &FieldDef<T>,
    record: &mut T,
    value: std::result::Result<FieldValue, ValueError>,
) -> Result<()> {
    value
        .and_then(|value| field.assign(record, value))
        .map_err(|err| FieldDecodeError::new(T::KIND, field.key, err.reason()).into())
}

/// `<value type="array"><value>a</value>...</value>` is a list; anything
/// else is single text.
fn custom_value(node: Node<'_, '_>) -> CustomFieldValue {
    if node.attribute("type") == Some("array") {
        CustomFieldValue::List(
            node.children()
                .filter(Node::is_element)
                .map(text_of)
                .collect(),
        )
    } else {
        CustomFieldValue::Text(text_of(node))
    }
}

/// Concatenated text children of `node`.
fn text_of(node: Node<'_, '_>) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|child| child.text())
        .collect()
}

/// A leaf element with no attributes and only whitespace: `<notes/>`,
/// `<due_date></due_date>`.
fn is_empty_leaf(node: Node<'_, '_>) -> bool {
    node.attributes().next().is_none()
        && !node.children().any(|child| child.is_element())
        && text_of(node).trim().is_empty()
}
