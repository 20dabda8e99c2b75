#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # fhir-defs
//!
//! Leaf data types for the conformance engine.
//!
//! This crate defines the declarative attribute model that schemas are built
//! from, the issue record that validation accumulates, and the two low-level
//! conventions shared by every validator: the dotted/indexed location path
//! and the "absent or empty" presence semantics over JSON values.

/// Declarative description of one schema field.
pub mod attribute;
/// Conformance issue records and their severity/code taxonomy.
pub mod issue;
/// Location path construction (`Parent.field[2].child`).
pub mod path;
/// Presence semantics for JSON values.
pub mod value;

pub use attribute::{AttributeDefinition, ReferenceTargets};
pub use issue::{Issue, IssueCode, IssueLocation, Severity};
pub use value::{is_present, present_fields};
