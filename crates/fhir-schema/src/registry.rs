//! Schema registry

use fhir_defs::AttributeDefinition;
use std::collections::{HashMap, HashSet};

/// Registry of named schemas.
///
/// Populated at process start and read-only afterwards; shared freely across
/// concurrent validations.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Vec<AttributeDefinition>>,
}

impl SchemaRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an ordered attribute list under a type tag.
    ///
    /// # Errors
    ///
    /// Returns an error when the type tag is already registered or when the
    /// attribute list contains a duplicate field name.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        definitions: Vec<AttributeDefinition>,
    ) -> crate::Result<()> {
        let type_name = type_name.into();
        if self.schemas.contains_key(&type_name) {
            return Err(crate::Error::DuplicateSchema(type_name));
        }

        let mut seen = HashSet::new();
        for definition in &definitions {
            if !seen.insert(definition.name.as_str()) {
                return Err(crate::Error::DuplicateField {
                    schema: type_name,
                    field: definition.name.clone(),
                });
            }
        }

        tracing::trace!(schema = %type_name, fields = definitions.len(), "registered schema");
        self.schemas.insert(type_name, definitions);
        Ok(())
    }

    /// Look up a schema by type tag.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaNotFound` when the tag is unregistered.
    pub fn lookup(&self, type_name: &str) -> crate::Result<&[AttributeDefinition]> {
        self.schemas
            .get(type_name)
            .map(Vec::as_slice)
            .ok_or_else(|| crate::Error::SchemaNotFound(type_name.to_string()))
    }

    /// Check whether a type tag is registered.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.schemas.contains_key(type_name)
    }

    /// All registered type tags, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
