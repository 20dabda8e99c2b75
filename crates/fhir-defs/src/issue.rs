//! Issue records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a conformance issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The validator itself could not do its job (broken schema wiring).
    Fatal,
    /// The instance does not conform.
    Error,
    /// Suspicious but not a conformance failure.
    Warning,
    /// Informational only.
    Information,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Severity::Fatal => "fatal",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Information => "information",
        };
        f.write_str(text)
    }
}

/// Machine-readable issue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    /// A required field is absent.
    Required,
    /// Structural problem: unknown field, wrong shape, bad reference type.
    Invalid,
    /// Value not in the field's closed value set.
    CodeInvalid,
    /// Schema wiring defect surfaced during validation.
    Exception,
    /// Cross-field business rule violated.
    Invariant,
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IssueCode::Required => "required",
            IssueCode::Invalid => "invalid",
            IssueCode::CodeInvalid => "code-invalid",
            IssueCode::Exception => "exception",
            IssueCode::Invariant => "invariant",
        };
        f.write_str(text)
    }
}

/// Where in the instance an issue was found.
///
/// The path follows the dotted/indexed convention (`Patient.contact[1].name`)
/// and is serialized under the wire name `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueLocation {
    /// Dotted/indexed location path.
    #[serde(rename = "text")]
    pub path: String,
    /// Offending value, when it helps diagnosis.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<serde_json::Value>,
}

/// One reported conformance problem.
///
/// Issues are created transiently during a single validation call and pushed
/// into a caller-owned accumulator; the engine never reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub code: IssueCode,
    pub diagnostics: String,
    pub location: IssueLocation,
}

impl Issue {
    /// Create an issue at the given location path.
    pub fn new(
        severity: Severity,
        code: IssueCode,
        diagnostics: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            diagnostics: diagnostics.into(),
            location: IssueLocation {
                path: path.into(),
                value: None,
            },
        }
    }

    /// Attach the offending value.
    #[must_use]
    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.location.value = Some(value);
        self
    }

    /// Missing required field.
    pub fn required(path: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        Self::new(Severity::Error, IssueCode::Required, diagnostics, path)
    }

    /// Structural conformance problem.
    pub fn invalid(path: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        Self::new(Severity::Error, IssueCode::Invalid, diagnostics, path)
    }

    /// Value outside a closed value set.
    pub fn code_invalid(path: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        Self::new(Severity::Error, IssueCode::CodeInvalid, diagnostics, path)
    }

    /// Schema wiring defect. Tagged fatal so callers can tell "your document
    /// is invalid" from "the validator is broken".
    pub fn exception(path: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, IssueCode::Exception, diagnostics, path)
    }

    /// Business-rule violation.
    pub fn invariant(path: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        Self::new(Severity::Error, IssueCode::Invariant, diagnostics, path)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity, self.code, self.location.path, self.diagnostics
        )
    }
}
