//! Conformance reporting
//!
//! Renders a conformance result for humans (one line per issue plus a
//! summary) or as pretty JSON in the external issue wire shape.

use crate::conformance::ConformanceResult;
use std::fmt::Write as _;

/// Renders conformance results.
#[derive(Debug, Default)]
pub struct ConformanceReporter;

impl ConformanceReporter {
    /// Create a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Human-readable rendering, one line per issue.
    #[must_use]
    pub fn format_text(&self, result: &ConformanceResult) -> String {
        if result.issues.is_empty() {
            return "no conformance issues found\n".to_string();
        }
        let mut out = String::new();
        for issue in &result.issues {
            let _ = writeln!(out, "{issue}");
        }
        let _ = writeln!(out, "{} issue(s) found", result.issues.len());
        out
    }

    /// Pretty JSON rendering in the external wire shape.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn format_json(&self, result: &ConformanceResult) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }
}
