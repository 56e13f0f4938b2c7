//! redmine-core - Entity schemas and wire codecs for the Redmine REST API.
//!
//! Every record type the API exchanges (issues, projects, users, wiki pages,
//! time entries, ...) is a plain Rust struct implementing [`Entity`]. Its
//! [`Entity::FIELDS`] table declares, field by field, how the record reads
//! from and writes to the two wire formats. One generic engine per format
//! walks those tables; there is no per-type serialization code.
//!
//! # Example
//!
//! ```
//! use redmine_core::{Codec, Format, Issue, Reference, Registry};
//!
//! # fn example() -> Result<(), redmine_core::Error> {
//! let codec = Codec::new(Registry::global(), Format::Json);
//!
//! let issue = Issue {
//!     subject: "Crash on save".to_string(),
//!     project: Some(Reference::new(1, "Redmine")),
//!     ..Default::default()
//! };
//! let body = codec.serialize(&issue)?;
//! assert!(body.contains(r#""project_id":1"#));
//!
//! let page = codec.deserialize_list::<Issue>(
//!     r#"{"issues":[{"id":1},{"id":2}],"total_count":2}"#,
//!     "issues",
//! )?;
//! assert_eq!(page.total_count, 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod codec;
pub mod error;
pub mod registry;
pub mod schema;
pub mod types;

pub use codec::{Codec, Format, ListEnvelope};
pub use error::Error;
pub use registry::{Converter, Registry, RegistryBuilder};
pub use schema::{Entity, FieldDef, FieldKind, FieldValue};
pub use types::*;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
