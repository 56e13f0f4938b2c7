//! The converter registry: record type tag to codec entry points.
//!
//! A [`Registry`] is built once through [`RegistryBuilder`], which validates
//! every registered schema, and is read-only afterwards.

use roxmltree::Node;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

use crate::codec::plan::{self, Mode, Plan};
use crate::codec::{read_json_record, read_xml_record};
use crate::Result;
use crate::error::{Error, SchemaError};
use crate::schema::{self, Entity};
use crate::types::*;

type ReadXml = fn(&Registry, Node<'_, '_>) -> Result<Record>;
type ReadJson = fn(&Registry, &Value) -> Result<Record>;
type BuildPlan = fn(&Registry, &Record, Mode) -> Result<Plan>;

/// Codec entry points for one record type.
#[derive(Clone, Copy)]
pub struct Converter {
    kind: RecordKind,
    root: &'static str,
    validate: fn() -> std::result::Result<(), SchemaError>,
    read_xml: ReadXml,
    read_json: ReadJson,
    plan: BuildPlan,
}

impl Converter {
    /// The converter for `T`, driven by its schema table.
    pub fn of<T: Entity>() -> Self {
        Self {
            kind: T::KIND,
            root: T::ROOT,
            validate: schema::validate::<T>,
            read_xml: read_xml::<T>,
            read_json: read_json::<T>,
            plan: build_plan::<T>,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Element name / root key of one record.
    pub fn root(&self) -> &'static str {
        self.root
    }

    pub fn validate(&self) -> std::result::Result<(), SchemaError> {
        (self.validate)()
    }

    pub(crate) fn read_xml(&self, registry: &Registry, node: Node<'_, '_>) -> Result<Record> {
        (self.read_xml)(registry, node)
    }

    pub(crate) fn read_json(&self, registry: &Registry, value: &Value) -> Result<Record> {
        (self.read_json)(registry, value)
    }

    pub(crate) fn plan(&self, registry: &Registry, record: &Record, mode: Mode) -> Result<Plan> {
        (self.plan)(registry, record, mode)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("kind", &self.kind)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

fn read_xml<T: Entity>(registry: &Registry, node: Node<'_, '_>) -> Result<Record> {
    read_xml_record::<T>(registry, node).map(Variant::into_record)
}

fn read_json<T: Entity>(registry: &Registry, value: &Value) -> Result<Record> {
    read_json_record::<T>(registry, value).map(Variant::into_record)
}

fn build_plan<T: Entity>(registry: &Registry, record: &Record, mode: Mode) -> Result<Plan> {
    let record = T::from_record_ref(record).ok_or(SchemaError::ValueMismatch {
        record: T::KIND,
        key: T::ROOT,
    })?;
    plan::build(registry, record, mode)
}

/// Immutable mapping from record type to converter.
#[derive(Debug)]
pub struct Registry {
    converters: HashMap<RecordKind, Converter>,
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(|| {
    RegistryBuilder::new()
        .with_defaults()
        .build()
        .expect("built-in schemas are valid")
});

impl Registry {
    /// Creates a registry builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The process-wide registry holding every built-in record type.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Looks up the converter for `kind`.
    pub fn converter(&self, kind: RecordKind) -> Result<&Converter> {
        self.converters
            .get(&kind)
            .ok_or(Error::UnknownType { kind })
    }

    pub fn contains(&self, kind: RecordKind) -> bool {
        self.converters.contains_key(&kind)
    }

    /// Registered record types, in declaration order.
    pub fn kinds(&self) -> Vec<RecordKind> {
        let mut kinds: Vec<_> = self.converters.keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

/// Builder for [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    converters: Vec<Converter>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the schema-driven converter for `T`.
    #[must_use]
    pub fn register<T: Entity>(self) -> Self {
        self.converter(Converter::of::<T>())
    }

    /// Registers a converter.
    #[must_use]
    pub fn converter(mut self, converter: Converter) -> Self {
        self.converters.push(converter);
        self
    }

    /// Registers every built-in record type.
    #[must_use]
    pub fn with_defaults(self) -> Self {
        self.register::<Issue>()
            .register::<Project>()
            .register::<User>()
            .register::<Group>()
            .register::<GroupUser>()
            .register::<UserGroup>()
            .register::<News>()
            .register::<Query>()
            .register::<Version>()
            .register::<Attachment>()
            .register::<IssueRelation>()
            .register::<TimeEntry>()
            .register::<IssueStatus>()
            .register::<Tracker>()
            .register::<TrackerCustomField>()
            .register::<IssueCategory>()
            .register::<Role>()
            .register::<ProjectMembership>()
            .register::<ServerError>()
            .register::<IssueCustomField>()
            .register::<ProjectTracker>()
            .register::<Journal>()
            .register::<TimeEntryActivity>()
            .register::<IssuePriority>()
            .register::<WikiPage>()
            .register::<Detail>()
            .register::<ChangeSet>()
            .register::<Membership>()
            .register::<MembershipRole>()
            .register::<Permission>()
            .register::<IssueChild>()
            .register::<ProjectIssueCategory>()
            .register::<Watcher>()
            .register::<Upload>()
            .register::<ProjectEnabledModule>()
            .register::<CustomField>()
            .register::<CustomFieldRole>()
            .register::<CustomFieldPossibleValue>()
    }

    /// Validates every schema and builds the registry.
    ///
    /// Fails on the first invalid schema or on a type registered twice.
    pub fn build(self) -> Result<Registry> {
        let mut converters = HashMap::with_capacity(self.converters.len());
        for converter in self.converters {
            converter.validate()?;
            if converters.insert(converter.kind, converter).is_some() {
                return Err(SchemaError::DuplicateConverter {
                    kind: converter.kind,
                }
                .into());
            }
        }
        debug!(converters = converters.len(), "built codec registry");
        Ok(Registry { converters })
    }
}
