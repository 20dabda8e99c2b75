//! Attribute definitions

use serde::{Deserialize, Serialize};

/// Allowed target types for a reference-valued field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceTargets {
    /// Any target type is acceptable.
    Any,
    /// Only the listed target types are acceptable.
    Only(Vec<String>),
}

impl ReferenceTargets {
    /// Check whether a target type satisfies this constraint.
    #[must_use]
    pub fn allows(&self, target_type: &str) -> bool {
        match self {
            ReferenceTargets::Any => true,
            ReferenceTargets::Only(types) => types.iter().any(|t| t == target_type),
        }
    }

    /// Human-readable rendering of the allow-list for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            ReferenceTargets::Any => "Any".to_string(),
            ReferenceTargets::Only(types) => types.join(", "),
        }
    }
}

/// Declarative description of one schema field.
///
/// A schema is an ordered list of these, registered once per type tag at
/// startup and never mutated afterwards. The `kind` string is what the type
/// dispatcher routes on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Field name as it appears in the instance.
    pub name: String,
    /// Kind tag: primitive, composite datatype, backbone, or resource name.
    pub kind: String,
    /// Whether the field holds a list of values.
    pub is_array: bool,
    /// Whether the field must be present.
    pub is_required: bool,
    /// Closed set of allowed values, when the field is enum-constrained.
    pub enum_values: Option<Vec<String>>,
    /// Allowed reference target types, when the field is a reference.
    pub reference_targets: Option<ReferenceTargets>,
}

impl AttributeDefinition {
    /// Create a scalar, optional, unconstrained definition.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            is_array: false,
            is_required: false,
            enum_values: None,
            reference_targets: None,
        }
    }

    /// Mark the field as a list.
    #[must_use]
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Mark the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Constrain the field to a closed value set.
    #[must_use]
    pub fn allowed(mut self, values: Vec<impl Into<String>>) -> Self {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Constrain a reference field to the listed target types.
    #[must_use]
    pub fn targets(mut self, types: Vec<impl Into<String>>) -> Self {
        self.reference_targets = Some(ReferenceTargets::Only(
            types.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Allow a reference field to point at any target type.
    #[must_use]
    pub fn any_target(mut self) -> Self {
        self.reference_targets = Some(ReferenceTargets::Any);
        self
    }
}
