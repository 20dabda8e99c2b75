//! Conformance entry point
//!
//! The façade external collaborators call: resolve the schema, run the
//! structural validator, then the invariant hooks, and hand back one
//! aggregate result. Invariants always run, whatever the structural outcome,
//! so a single call surfaces every problem at once.

use crate::structural::StructuralValidator;
use fhir_defs::{Issue, Severity};
use fhir_schema::{Catalog, SchemaRegistry, default_catalog};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Aggregate outcome of one conformance check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConformanceResult {
    /// True exactly when no issue was collected.
    pub is_valid: bool,
    /// Every issue found, in deterministic order.
    pub issues: Vec<Issue>,
}

impl ConformanceResult {
    /// Whether any issue indicates broken schema wiring rather than bad data.
    #[must_use]
    pub fn has_fatal(&self) -> bool {
        self.issues.iter().any(|issue| issue.severity == Severity::Fatal)
    }

    /// Issues of error severity or worse.
    #[must_use]
    pub fn errors(&self) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity <= Severity::Error)
            .collect()
    }
}

/// Conformance engine over a finalized catalog.
///
/// Holds no mutable state; concurrent `conformance` calls are safe without
/// locking, each owning its own accumulator.
pub struct ConformanceEngine {
    catalog: Catalog,
}

impl ConformanceEngine {
    /// Create an engine over an already assembled catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Create an engine over the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error when the built-in catalog fails to assemble, which
    /// indicates a defect in the catalog tables themselves.
    pub fn with_default_catalog() -> crate::Result<Self> {
        Ok(Self::new(default_catalog()?))
    }

    /// The engine's schema registry, for listing registered types.
    #[must_use]
    pub fn registry(&self) -> &SchemaRegistry {
        &self.catalog.registry
    }

    /// Validate a value against the named schema.
    ///
    /// # Errors
    ///
    /// Returns an error when `type_name` is not a registered schema. Every
    /// other problem, including broken wiring for nested kinds, is reported
    /// as a collected issue.
    pub fn conformance(&self, value: &Value, type_name: &str) -> crate::Result<ConformanceResult> {
        let schema = self.catalog.registry.lookup(type_name)?;

        let mut issues: Vec<Issue> = Vec::new();
        StructuralValidator::new(&self.catalog.registry, &self.catalog.dispatcher)
            .validate(value, schema, type_name, &mut issues);

        for hook in self.catalog.invariants.hooks_for(type_name) {
            hook(value, type_name, &mut issues);
        }

        tracing::debug!(type_name, issues = issues.len(), "conformance check complete");
        Ok(ConformanceResult {
            is_valid: issues.is_empty(),
            issues,
        })
    }
}
