//! Entity schemas and field descriptors.
//!
//! A schema is the ordered table of [`FieldDef`]s an [`Entity`] declares.
//! The order is the encode order; decoding matches wire keys against the
//! table and does not depend on it.

mod field;
mod value;

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::types::Variant;

pub use field::{Access, FieldDef, FieldKind, Getter, Placement, Setter, WriteCondition, WritePolicy};
pub use value::{FieldType, FieldValue, ValueError};

pub(crate) use field::{collection, field};
pub(crate) use value::{int_enum, string_enum};

/// A record type with a declarative wire schema.
pub trait Entity: Variant + Clone + Default + std::fmt::Debug + 'static {
    /// Element name (markup) and root key (text format) of one record.
    const ROOT: &'static str;

    /// Field descriptors, in encode order.
    const FIELDS: &'static [FieldDef<Self>];

    /// Identity of the record; `0` means "not yet created".
    fn id(&self) -> i32 {
        0
    }

    /// Display name, for types that have one.
    fn name(&self) -> Option<&str> {
        None
    }
}

/// Checks the invariants of `T`'s schema table.
///
/// - readable wire keys are unique, and so are writable ones;
/// - id-only policies sit on references, id/name list policies on record lists;
/// - at most one field reads the element's text content.
pub fn validate<T: Entity>() -> Result<(), SchemaError> {
    let record = T::KIND;
    let mut read_keys = HashSet::new();
    let mut write_keys = HashSet::new();
    let mut content = false;

    for field in T::FIELDS {
        if field.reads() && !read_keys.insert(field.key) {
            return Err(SchemaError::DuplicateReadKey {
                record,
                key: field.key,
            });
        }
        if field.writes() && !write_keys.insert(field.write_key()) {
            return Err(SchemaError::DuplicateWriteKey {
                record,
                key: field.write_key(),
            });
        }

        let fits = match field.write {
            WritePolicy::Inline => true,
            WritePolicy::IdOnly(_) => field.kind == FieldKind::Ref,
            WritePolicy::IdList { .. } | WritePolicy::Names { .. } => {
                matches!(field.kind, FieldKind::Records { .. })
            }
        };
        let placed = match field.placement {
            Placement::Element => true,
            Placement::Attribute | Placement::Content => field.kind.is_scalar(),
        };
        if !fits || !placed {
            return Err(SchemaError::PolicyMismatch {
                record,
                key: field.key,
            });
        }

        if field.placement == Placement::Content {
            if content {
                return Err(SchemaError::DuplicateContent { record });
            }
            content = true;
        }
    }

    Ok(())
}

/// Copies into a fresh record only the fields that survive an encode/decode
/// cycle: read and written, under the same key, with their write condition met.
///
/// Nested records are copied whole.
pub fn writable_projection<T: Entity>(record: &T) -> T {
    let mut projected = T::default();
    let id = record.id();
    for field in T::FIELDS {
        let survives = field.access == Access::ReadWrite
            && field.write == WritePolicy::Inline
            && field.should_write(record, id);
        if !survives {
            continue;
        }
        if let Some(value) = field.extract(record) {
            // Extracted values always fit their own setter.
            let _ = field.assign(&mut projected, value);
        }
    }
    projected
}
