//! Schema/model drift guard
//!
//! The concrete model types that feed instances into the engine are written
//! by hand, as are the schema tables. This check runs once, when a model type
//! is introduced, and fails loudly on any mismatch between the two field
//! sets. A failure here is a build-time defect, never a data issue.

use fhir_defs::AttributeDefinition;
use std::collections::HashSet;

/// Assert that a schema's field names match a model's field names exactly.
///
/// # Errors
///
/// Returns `Error::ModelDrift` listing the fields missing on each side when
/// the two sets differ in either direction.
pub fn assert_schema_matches_model(
    type_name: &str,
    definitions: &[AttributeDefinition],
    model_fields: &[&str],
) -> crate::Result<()> {
    let schema_fields: HashSet<&str> = definitions.iter().map(|d| d.name.as_str()).collect();
    let model_fields: HashSet<&str> = model_fields.iter().copied().collect();

    let mut missing_in_schema: Vec<&str> =
        model_fields.difference(&schema_fields).copied().collect();
    let mut missing_in_model: Vec<&str> =
        schema_fields.difference(&model_fields).copied().collect();

    if missing_in_schema.is_empty() && missing_in_model.is_empty() {
        return Ok(());
    }

    missing_in_schema.sort_unstable();
    missing_in_model.sort_unstable();
    Err(crate::Error::ModelDrift {
        type_name: type_name.to_string(),
        missing_in_schema: missing_in_schema.join(", "),
        missing_in_model: missing_in_model.join(", "),
    })
}
