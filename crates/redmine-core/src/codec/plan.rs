//! The write plan: which fields a record emits, under which keys, in which
//! shape. Both renderers consume the same plan, so the markup and text
//! formats can never disagree on what gets written.

use super::scalar::Scalar;
use crate::Result;
use crate::error::SchemaError;
use crate::registry::Registry;
use crate::schema::{Entity, FieldDef, FieldKind, FieldValue, Placement, WritePolicy};
use crate::types::{CustomFieldValue, Record, RecordKind, Reference};

/// What a plan is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Create/update request body: writable fields, write keys and policies.
    Write,
    /// Full dump: every readable field, inline, under its read key.
    Dump,
}

/// The ordered fields one record emits.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Plan {
    pub(crate) fields: Vec<Emitted>,
}

impl Plan {
    pub(crate) fn placed(&self, placement: Placement) -> impl Iterator<Item = &Emitted> {
        self.fields
            .iter()
            .filter(move |emitted| emitted.placement == placement)
    }

    /// The text content, when it is the only thing the record emits.
    pub(crate) fn bare_content(&self) -> Option<&Scalar> {
        match self.fields.as_slice() {
            [
                Emitted {
                    placement: Placement::Content,
                    value: Out::Scalar(scalar),
                    ..
                },
            ] => Some(scalar),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Emitted {
    pub(crate) key: &'static str,
    pub(crate) placement: Placement,
    pub(crate) value: Out,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Out {
    Scalar(Scalar),
    Reference(Reference),
    /// Sub-records, each rendered under `item`.
    Records {
        item: &'static str,
        items: Vec<Plan>,
    },
    /// Plain values, each rendered under `item`.
    List {
        item: &'static str,
        values: Vec<Scalar>,
    },
}

/// Builds the plan for `record`.
///
/// Nested records are planned through their own converters, in the same mode.
pub(crate) fn build<T: Entity>(registry: &Registry, record: &T, mode: Mode) -> Result<Plan> {
    let id = record.id();
    let mut fields = Vec::new();

    for field in T::FIELDS {
        let included = match mode {
            Mode::Write => field.writes() && field.should_write(record, id),
            Mode::Dump => field.reads(),
        };
        if !included {
            continue;
        }
        let Some(value) = field.extract(record) else {
            continue;
        };

        let policy = match mode {
            Mode::Write => field.write,
            Mode::Dump => WritePolicy::Inline,
        };
        let key = match mode {
            Mode::Write => field.write_key(),
            Mode::Dump => field.key,
        };
        let value = emit(registry, field, policy, value, mode)?;
        fields.push(Emitted {
            key,
            placement: field.placement,
            value,
        });
    }

    Ok(Plan { fields })
}

fn emit<T: Entity>(
    registry: &Registry,
    field: &FieldDef<T>,
    policy: WritePolicy,
    value: FieldValue,
    mode: Mode,
) -> Result<Out> {
    let mismatch = || SchemaError::ValueMismatch {
        record: T::KIND,
        key: field.key,
    };

    let out = match (policy, value) {
        (WritePolicy::IdOnly(_), FieldValue::Reference(r)) => {
            Out::Scalar(Scalar::Int(i64::from(r.id)))
        }
        (WritePolicy::IdList { item, .. }, FieldValue::Records(items)) => Out::List {
            item,
            values: items
                .iter()
                .map(|record| Scalar::Int(i64::from(record.id())))
                .collect(),
        },
        (WritePolicy::Names { item, .. }, FieldValue::Records(items)) => Out::List {
            item,
            values: items
                .iter()
                .filter_map(Record::name)
                .map(|name| Scalar::Str(name.to_string()))
                .collect(),
        },
        (WritePolicy::Inline, FieldValue::Reference(r)) => Out::Reference(r),
        (WritePolicy::Inline, FieldValue::Records(items)) => {
            let FieldKind::Records { item, kind } = field.kind else {
                return Err(mismatch().into());
            };
            Out::Records {
                item,
                items: plan_items(registry, kind, &items, mode)?,
            }
        }
        (WritePolicy::Inline, FieldValue::Custom(CustomFieldValue::Text(text))) => {
            Out::Scalar(Scalar::Str(text))
        }
        (WritePolicy::Inline, FieldValue::Custom(CustomFieldValue::List(values))) => Out::List {
            item: "value",
            values: values.into_iter().map(Scalar::Str).collect(),
        },
        (WritePolicy::Inline, value) => {
            Out::Scalar(Scalar::from_value(value).ok_or_else(mismatch)?)
        }
        _ => return Err(mismatch().into()),
    };
    Ok(out)
}

fn plan_items(
    registry: &Registry,
    kind: RecordKind,
    items: &[Record],
    mode: Mode,
) -> Result<Vec<Plan>> {
    let converter = registry.converter(kind)?;
    items
        .iter()
        .map(|item| converter.plan(registry, item, mode))
        .collect()
}
