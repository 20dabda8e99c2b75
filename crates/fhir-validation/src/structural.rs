//! Structural validator
//!
//! Checks one instance against one schema: unknown fields, missing required
//! fields, then per-field shape checks with recursion into nested structures
//! via the type dispatcher. All checks are additive; the validator never
//! stops early and never throws for data problems.

use crate::checks::{check_array_shape, check_enum, check_primitive};
use crate::reference::check_reference;
use fhir_defs::{AttributeDefinition, Issue, path, present_fields};
use fhir_schema::{SchemaRegistry, TypeDispatcher, ValidatorKind};
use serde_json::Value;
use std::collections::HashSet;

/// Field names excluded from the unknown-field check. These slots are
/// intentionally unvalidated at this schema layer.
const PASSTHROUGH_FIELDS: &[&str] = &["resourceType", "contained"];

/// Recursive schema-driven validator.
///
/// Borrows the registry and dispatcher, both finalized before any validation
/// call, so one validator can serve any number of concurrent checks.
pub struct StructuralValidator<'a> {
    registry: &'a SchemaRegistry,
    dispatcher: &'a TypeDispatcher,
}

impl<'a> StructuralValidator<'a> {
    /// Create a validator over finalized schema tables.
    #[must_use]
    pub fn new(registry: &'a SchemaRegistry, dispatcher: &'a TypeDispatcher) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// Validate one instance against one schema, appending issues at `path`.
    pub fn validate(
        &self,
        instance: &Value,
        schema: &[AttributeDefinition],
        path: &str,
        issues: &mut Vec<Issue>,
    ) {
        let Some(object) = instance.as_object() else {
            issues.push(Issue::invalid(path, "expected an object").with_value(instance.clone()));
            return;
        };
        let present = present_fields(object);

        let known: HashSet<&str> = schema.iter().map(|d| d.name.as_str()).collect();
        let unknown: Vec<&str> = present
            .keys()
            .map(String::as_str)
            .filter(|name| !known.contains(name) && !PASSTHROUGH_FIELDS.contains(name))
            .collect();
        if !unknown.is_empty() {
            issues.push(Issue::invalid(
                path,
                format!("unknown field(s): {}", unknown.join(", ")),
            ));
        }

        for definition in schema {
            if definition.is_required && !present.contains_key(&definition.name) {
                issues.push(Issue::required(
                    path::child(path, &definition.name),
                    format!("required field '{}' is missing", definition.name),
                ));
            }
        }

        for definition in schema {
            if let Some(value) = present.get(&definition.name) {
                self.check_field(value, definition, &path::child(path, &definition.name), issues);
            }
        }
    }

    fn check_field(
        &self,
        value: &Value,
        definition: &AttributeDefinition,
        field_path: &str,
        issues: &mut Vec<Issue>,
    ) {
        if definition.kind == "Reference" {
            if let Some(items) = value.as_array() {
                for (index, item) in items.iter().enumerate() {
                    check_reference(
                        item,
                        definition.reference_targets.as_ref(),
                        &path::indexed(field_path, index),
                        issues,
                    );
                }
            } else {
                check_reference(value, definition.reference_targets.as_ref(), field_path, issues);
            }
        }

        if let Some(allowed) = &definition.enum_values {
            if !definition.is_array {
                check_enum(value, allowed, field_path, issues);
            }
        }

        check_array_shape(value, definition, field_path, issues);

        match self.dispatcher.resolve(&definition.kind) {
            Some(ValidatorKind::Primitive(shape)) => {
                if let Some(items) = value.as_array() {
                    for (index, item) in items.iter().enumerate() {
                        check_primitive(item, shape, &path::indexed(field_path, index), issues);
                    }
                } else {
                    check_primitive(value, shape, field_path, issues);
                }
            }
            Some(
                ValidatorKind::Complex | ValidatorKind::Backbone | ValidatorKind::Resource,
            ) => match self.registry.lookup(&definition.kind) {
                Ok(schema) => {
                    if let Some(items) = value.as_array() {
                        for (index, item) in items.iter().enumerate() {
                            self.validate(item, schema, &path::indexed(field_path, index), issues);
                        }
                    } else {
                        self.validate(value, schema, field_path, issues);
                    }
                }
                Err(_) => {
                    issues.push(Issue::exception(
                        field_path,
                        format!("no schema registered for kind '{}'", definition.kind),
                    ));
                }
            },
            None => {
                issues.push(Issue::exception(
                    field_path,
                    format!("no validator registered for kind '{}'", definition.kind),
                ));
            }
        }
    }
}
