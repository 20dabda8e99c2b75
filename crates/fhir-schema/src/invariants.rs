//! Invariant hooks
//!
//! Cross-field business rules that cannot be expressed through a single
//! attribute definition. Hooks run after structural validation, always, and
//! append `invariant`-coded issues into the same accumulator — they never
//! throw or short-circuit.

use fhir_defs::Issue;
use serde_json::Value;
use std::collections::HashMap;

/// One business-rule predicate: inspects the raw instance and appends issues
/// at paths rooted in the supplied location.
pub type InvariantFn = fn(&Value, &str, &mut Vec<Issue>);

/// Per-type registry of invariant hooks.
#[derive(Default)]
pub struct InvariantRegistry {
    hooks: HashMap<String, Vec<InvariantFn>>,
}

impl InvariantRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook for a type tag. A type may carry any number of hooks;
    /// they run in registration order.
    pub fn register(&mut self, type_name: impl Into<String>, hook: InvariantFn) {
        self.hooks.entry(type_name.into()).or_default().push(hook);
    }

    /// Hooks registered for a type tag; empty when there are none.
    #[must_use]
    pub fn hooks_for(&self, type_name: &str) -> &[InvariantFn] {
        self.hooks.get(type_name).map_or(&[], Vec::as_slice)
    }
}
