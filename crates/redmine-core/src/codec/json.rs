//! The text (JSON) format.

use serde_json::{Map, Value};
use tracing::trace;

use super::plan::{Out, Plan};
use super::{collection, reference, scalar, Format, ListEnvelope};
use crate::Result;
use crate::error::{FieldDecodeError, MalformedDocumentError};
use crate::registry::{Converter, Registry};
use crate::schema::{Entity, FieldKind, FieldValue, Placement};
use crate::types::{CustomFieldValue, Record, RecordKind, ServerError, Variant};

fn parse_object(document: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(document)
        .map_err(|err| MalformedDocumentError::new(Format::Json, err.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(MalformedDocumentError::new(Format::Json, "document is not an object").into()),
    }
}

/// Decodes `{"<root>": {...}}`. A missing or null root key yields `None`.
pub(crate) fn decode(
    registry: &Registry,
    converter: &Converter,
    document: &str,
    root: &str,
) -> Result<Option<Record>> {
    let map = parse_object(document)?;
    match map.get(&root.to_lowercase()) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => converter.read_json(registry, value).map(Some),
    }
}

/// Decodes `{"<root>": [...], "total_count": n, "offset": n, "limit": n}`.
///
/// An error list always collapses into exactly one [`ServerError`] whose
/// message joins every fragment, even when there are none.
pub(crate) fn decode_list(
    registry: &Registry,
    converter: &Converter,
    document: &str,
    root: &str,
) -> Result<ListEnvelope<Record>> {
    let map = parse_object(document)?;
    let mut envelope = ListEnvelope::empty(root);
    envelope.total_count = count(&map, "total_count")?.unwrap_or(0);
    envelope.offset = count(&map, "offset")?;
    envelope.limit = count(&map, "limit")?;

    let items = match map.get(&root.to_lowercase()) {
        None | Some(Value::Null) => return Ok(envelope),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(MalformedDocumentError::new(
                Format::Json,
                format!("'{}' is not an array", root),
            )
            .into());
        }
    };

    envelope.items = if converter.kind() == RecordKind::ServerError {
        let info = collection::join_fragments(items);
        vec![ServerError { info }.into_record()]
    } else {
        collection::read_json(registry, items, converter.kind())?
    };
    Ok(envelope)
}

fn count(map: &Map<String, Value>, key: &str) -> Result<Option<u32>> {
    let invalid = || MalformedDocumentError::new(Format::Json, format!("'{}' is not a count", key));
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| invalid().into()),
        Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| invalid().into()),
        Some(_) => Err(invalid().into()),
    }
}

/// Decodes one record from its value.
///
/// A bare string is accepted for records whose only readable field is their
/// text content, like permissions in `"permissions": ["add_issues"]`.
pub(crate) fn read_record<T: Entity>(registry: &Registry, value: &Value) -> Result<T> {
    let mut record = T::default();

    let map = match value {
        Value::Object(map) => map,
        Value::String(text) => {
            let Some(field) = T::FIELDS
                .iter()
                .find(|field| field.reads() && field.placement == Placement::Content)
            else {
                return Err(FieldDecodeError::new(T::KIND, T::ROOT, "expected an object").into());
            };
            field
                .assign(&mut record, FieldValue::Str(text.clone()))
                .map_err(|err| FieldDecodeError::new(T::KIND, field.key, err.reason()))?;
            return Ok(record);
        }
        _ => return Err(FieldDecodeError::new(T::KIND, T::ROOT, "expected an object").into()),
    };

    for field in T::FIELDS.iter().filter(|field| field.reads()) {
        let value = match map.get(field.key) {
            None | Some(Value::Null) => continue,
            Some(value) => value,
        };
        let decode_error = |reason: &str| FieldDecodeError::new(T::KIND, field.key, reason);

        let decoded = match field.kind {
            FieldKind::Ref => reference::from_json(value)
                .map(FieldValue::Reference)
                .map_err(|err| decode_error(err.reason()))?,
            FieldKind::Records { kind, .. } => {
                let Value::Array(items) = value else {
                    return Err(decode_error("expected an array").into());
                };
                FieldValue::Records(collection::read_json(registry, items, kind)?)
            }
            FieldKind::Custom => FieldValue::Custom(custom_value(value)),
            kind => scalar::parse_json(kind, value).map_err(|err| decode_error(err.reason()))?,
        };
        field
            .assign(&mut record, decoded)
            .map_err(|err| decode_error(err.reason()))?;
    }

    for key in map.keys() {
        if !T::FIELDS.iter().any(|field| field.key == key.as_str()) {
            trace!(record = %T::KIND, key = key.as_str(), "skipping unknown key");
        }
    }

    Ok(record)
}

fn custom_value(value: &Value) -> CustomFieldValue {
    match value {
        Value::Array(values) => CustomFieldValue::List(values.iter().map(plain_text).collect()),
        other => CustomFieldValue::Text(plain_text(other)),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders a record plan as a value.
pub(crate) fn plan_to_value(plan: &Plan) -> Value {
    if let Some(content) = plan.bare_content() {
        return content.to_json();
    }
    let mut map = Map::new();
    for emitted in &plan.fields {
        let value = match &emitted.value {
            Out::Scalar(scalar) => scalar.to_json(),
            Out::Reference(r) => reference::to_json(r),
            Out::Records { items, .. } => Value::Array(items.iter().map(plan_to_value).collect()),
            Out::List { values, .. } => Value::Array(values.iter().map(|v| v.to_json()).collect()),
        };
        map.insert(emitted.key.to_string(), value);
    }
    Value::Object(map)
}

/// Renders a record plan as `{"<root>": {...}}`.
pub(crate) fn encode(root: &str, plan: &Plan, pretty: bool) -> Result<String> {
    let mut document = Map::new();
    document.insert(root.to_string(), plan_to_value(plan));
    let document = Value::Object(document);
    let text = if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    };
    text.map_err(|err| MalformedDocumentError::new(Format::Json, err.to_string()).into())
}
