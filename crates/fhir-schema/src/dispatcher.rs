//! Type dispatcher
//!
//! One flat map from kind tag to the validator responsible for it. Dispatch
//! is a pure O(1) lookup with no fallback or inheritance search: a kind with
//! no registered validator is a configuration defect, not a data error.

use std::collections::HashMap;

/// Primitive value shapes the engine can check directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Boolean,
    Integer,
    PositiveInt,
    UnsignedInt,
    Decimal,
    String,
    Code,
    Id,
    Uri,
    Url,
    Canonical,
    Oid,
    Uuid,
    Markdown,
    Base64Binary,
    Date,
    DateTime,
    Instant,
    Time,
    Xhtml,
}

/// Which validator a kind tag routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorKind {
    /// Scalar value checked in place.
    Primitive(Primitive),
    /// Composite datatype with its own registered schema.
    Complex,
    /// Nested structural element specific to one parent schema.
    Backbone,
    /// Top-level resource.
    Resource,
}

/// Immutable kind-tag dispatch table.
#[derive(Debug, Default)]
pub struct TypeDispatcher {
    validators: HashMap<String, ValidatorKind>,
}

impl TypeDispatcher {
    /// Resolve the validator for a kind tag.
    #[must_use]
    pub fn resolve(&self, kind: &str) -> Option<ValidatorKind> {
        self.validators.get(kind).copied()
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether no kinds are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

/// Append-only builder assembling the dispatch table at startup.
#[derive(Debug, Default)]
pub struct TypeDispatcherBuilder {
    validators: HashMap<String, ValidatorKind>,
}

impl TypeDispatcherBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, kind: impl Into<String>, validator: ValidatorKind) -> crate::Result<()> {
        let kind = kind.into();
        if self.validators.contains_key(&kind) {
            return Err(crate::Error::DuplicateKind(kind));
        }
        self.validators.insert(kind, validator);
        Ok(())
    }

    /// Register a primitive kind.
    ///
    /// # Errors
    ///
    /// Returns an error when the kind is already registered.
    pub fn primitive(&mut self, kind: impl Into<String>, shape: Primitive) -> crate::Result<()> {
        self.insert(kind, ValidatorKind::Primitive(shape))
    }

    /// Register a composite datatype kind.
    ///
    /// # Errors
    ///
    /// Returns an error when the kind is already registered.
    pub fn complex(&mut self, kind: impl Into<String>) -> crate::Result<()> {
        self.insert(kind, ValidatorKind::Complex)
    }

    /// Register a backbone element kind.
    ///
    /// # Errors
    ///
    /// Returns an error when the kind is already registered.
    pub fn backbone(&mut self, kind: impl Into<String>) -> crate::Result<()> {
        self.insert(kind, ValidatorKind::Backbone)
    }

    /// Register a resource kind.
    ///
    /// # Errors
    ///
    /// Returns an error when the kind is already registered.
    pub fn resource(&mut self, kind: impl Into<String>) -> crate::Result<()> {
        self.insert(kind, ValidatorKind::Resource)
    }

    /// Finalize the table.
    #[must_use]
    pub fn build(self) -> TypeDispatcher {
        TypeDispatcher {
            validators: self.validators,
        }
    }
}
