//! # fhir-schema
//!
//! Schema registry, type dispatcher, and the built-in catalog.
//!
//! Schemas are ordered attribute lists keyed by a type tag. The dispatcher is
//! a flat, append-only map from kind tag to validator kind, assembled once at
//! startup from four partitions (primitives, composite datatypes, backbone
//! elements, resources) and immutable afterwards.

pub mod catalog;
pub mod consistency;
pub mod dispatcher;
pub mod invariants;
pub mod registry;

pub use catalog::{Catalog, default_catalog};
pub use consistency::assert_schema_matches_model;
pub use dispatcher::{Primitive, TypeDispatcher, TypeDispatcherBuilder, ValidatorKind};
pub use invariants::{InvariantFn, InvariantRegistry};
pub use registry::SchemaRegistry;

use thiserror::Error;

/// Errors that can occur when assembling or consulting schemas.
///
/// These are developer-time configuration failures. Data conformance
/// problems are never errors; they are collected as issues.
#[derive(Error, Debug)]
pub enum Error {
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    #[error("schema already registered: {0}")]
    DuplicateSchema(String),

    #[error("duplicate field '{field}' in schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    #[error("validator already registered for kind: {0}")]
    DuplicateKind(String),

    #[error(
        "schema for '{type_name}' drifted from model: missing in schema [{missing_in_schema}], missing in model [{missing_in_model}]"
    )]
    ModelDrift {
        type_name: String,
        missing_in_schema: String,
        missing_in_model: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
