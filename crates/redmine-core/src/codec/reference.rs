//! The reference shape: `<project id="1" name="Redmine"/>` in markup,
//! `{"id": 1, "name": "Redmine"}` in the text format.
//!
//! Id-only writes (`project_id`) never reach this module; the write plan
//! turns them into plain integers.

use roxmltree::Node;
use serde_json::{Map, Value};

use super::xml::XmlWriter;
use crate::schema::ValueError;
use crate::types::Reference;

pub(crate) fn from_xml(node: Node<'_, '_>) -> Result<Reference, ValueError> {
    let id = node
        .attribute("id")
        .ok_or_else(|| ValueError::new("reference without an id"))?;
    Ok(Reference {
        id: parse_id(id.trim())?,
        name: node.attribute("name").map(str::to_string),
        label: node.attribute("label").map(str::to_string),
    })
}

pub(crate) fn from_json(value: &Value) -> Result<Reference, ValueError> {
    let map = value
        .as_object()
        .ok_or_else(|| ValueError::new("reference is not an object"))?;
    let id = match map.get("id") {
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| ValueError::new(format!("reference id {} is out of range", n)))?,
        Some(Value::String(s)) => parse_id(s.trim())?,
        _ => return Err(ValueError::new("reference without an id")),
    };
    Ok(Reference {
        id,
        name: string_member(map, "name"),
        label: string_member(map, "label"),
    })
}

pub(crate) fn write_xml(writer: &mut XmlWriter, key: &str, reference: &Reference) {
    writer.start_element(key);
    writer.attribute("id", &reference.id.to_string());
    if let Some(name) = &reference.name {
        writer.attribute("name", name);
    }
    if let Some(label) = &reference.label {
        writer.attribute("label", label);
    }
    writer.end_element();
}

pub(crate) fn to_json(reference: &Reference) -> Value {
    let mut map = Map::new();
    map.insert("id".to_string(), Value::from(reference.id));
    if let Some(name) = &reference.name {
        map.insert("name".to_string(), Value::String(name.clone()));
    }
    if let Some(label) = &reference.label {
        map.insert("label".to_string(), Value::String(label.clone()));
    }
    Value::Object(map)
}

fn parse_id(text: &str) -> Result<i32, ValueError> {
    text.parse()
        .map_err(|_| ValueError::new(format!("reference id '{}' is not an integer", text)))
}

fn string_member(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
