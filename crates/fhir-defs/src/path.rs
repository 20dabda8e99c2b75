//! Location path construction
//!
//! Issue locations use a dotted/indexed convention: `Patient.contact[1].name`.
//! Consumers parse these strings, so the format is a wire contract.

/// Append a field name to a parent path.
#[must_use]
pub fn child(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

/// Append an array index to a path.
#[must_use]
pub fn indexed(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}
