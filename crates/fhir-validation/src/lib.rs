#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # fhir-validation
//!
//! Conformance validation of JSON resources against registered schemas.
//!
//! The engine is fully synchronous and never throws for data problems: every
//! reachable field is checked in one pass and every violation is appended to
//! a caller-owned issue accumulator. Even a broken schema wiring entry only
//! produces a fatal-severity issue, so validating a batch of documents can
//! never be aborted by one bad schema.
//!
//! ## Example Usage
//!
//! ```rust
//! use fhir_validation::conformance;
//! use serde_json::json;
//!
//! let patient = json!({
//!     "resourceType": "Patient",
//!     "gender": "female",
//!     "birthDate": "1974-12-25"
//! });
//!
//! let result = conformance(&patient, "Patient").unwrap();
//! assert!(result.is_valid);
//! ```

pub mod checks;
pub mod conformance;
pub mod reference;
pub mod reporter;
pub mod structural;

// Re-export main types
pub use checks::{check_array_shape, check_enum, check_primitive};
pub use conformance::{ConformanceEngine, ConformanceResult};
pub use reference::check_reference;
pub use reporter::ConformanceReporter;
pub use structural::StructuralValidator;

use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors at the validation facade.
///
/// These cover configuration problems only (unknown type tag, broken
/// registration); conformance problems are always collected as issues.
#[derive(Error, Debug)]
pub enum Error {
    #[error("schema error: {0}")]
    Schema(#[from] fhir_schema::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

static DEFAULT_ENGINE: OnceLock<ConformanceEngine> = OnceLock::new();

/// Validate a value against a named schema using the built-in catalog.
///
/// The default engine is assembled on first use and shared for the life of
/// the process; concurrent callers need no locking.
///
/// # Errors
///
/// Returns an error when `type_name` is not a registered schema.
pub fn conformance(value: &Value, type_name: &str) -> Result<ConformanceResult> {
    let engine = DEFAULT_ENGINE.get_or_init(|| {
        ConformanceEngine::with_default_catalog()
            .expect("built-in catalog registration is consistent")
    });
    engine.conformance(value, type_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convenience_conformance() {
        let patient = json!({"resourceType": "Patient", "gender": "male"});
        let result = conformance(&patient, "Patient").unwrap();
        assert!(result.is_valid);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_convenience_conformance_unknown_type() {
        let err = conformance(&json!({}), "NotAType").unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(fhir_schema::Error::SchemaNotFound(_))
        ));
    }
}
