//! Reference checking
//!
//! A reference pointer is a `Type/id` string naming another document. The
//! engine checks the type segment against the field's allow-list and never
//! dereferences the pointer.

use fhir_defs::{Issue, ReferenceTargets};
use serde_json::Value;

/// Check a reference value's target type against an allow-list.
///
/// No issue is raised when there is no allow-list, no `reference` string, or
/// no `/id` segment to split on — the lenient handling of malformed pointers
/// is long-standing behavior that downstream consumers rely on.
pub fn check_reference(
    value: &Value,
    targets: Option<&ReferenceTargets>,
    path: &str,
    issues: &mut Vec<Issue>,
) {
    let Some(targets) = targets else {
        return;
    };
    let Some(pointer) = value.get("reference").and_then(Value::as_str) else {
        return;
    };
    let Some((target_type, _id)) = pointer.split_once('/') else {
        return;
    };
    if !targets.allows(target_type) {
        issues.push(Issue::invalid(
            path,
            format!(
                "reference to '{target_type}' is not allowed here; allowed types: [{}]",
                targets.describe()
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn only(types: &[&str]) -> ReferenceTargets {
        ReferenceTargets::Only(types.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_allowed_target_passes() {
        let mut issues = Vec::new();
        check_reference(
            &json!({"reference": "Patient/123"}),
            Some(&only(&["Patient"])),
            "Observation.subject",
            &mut issues,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_disallowed_target_flagged() {
        let mut issues = Vec::new();
        check_reference(
            &json!({"reference": "Observation/123"}),
            Some(&only(&["Patient"])),
            "Observation.subject",
            &mut issues,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].diagnostics.contains("Observation"));
        assert!(issues[0].diagnostics.contains("Patient"));
        assert_eq!(issues[0].location.path, "Observation.subject");
    }

    #[test]
    fn test_any_always_passes() {
        let mut issues = Vec::new();
        check_reference(
            &json!({"reference": "Whatever/1"}),
            Some(&ReferenceTargets::Any),
            "p",
            &mut issues,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_no_allow_list_passes() {
        let mut issues = Vec::new();
        check_reference(&json!({"reference": "Observation/123"}), None, "p", &mut issues);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_missing_pointer_passes() {
        let mut issues = Vec::new();
        check_reference(&json!({"display": "Peter"}), Some(&only(&["Patient"])), "p", &mut issues);
        check_reference(&json!({"reference": 5}), Some(&only(&["Patient"])), "p", &mut issues);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_missing_id_segment_tolerated() {
        let mut issues = Vec::new();
        check_reference(
            &json!({"reference": "Patient"}),
            Some(&only(&["Patient"])),
            "p",
            &mut issues,
        );
        check_reference(
            &json!({"reference": "Observation"}),
            Some(&only(&["Patient"])),
            "p",
            &mut issues,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_splits_on_first_slash() {
        let mut issues = Vec::new();
        check_reference(
            &json!({"reference": "Patient/123/_history/2"}),
            Some(&only(&["Patient"])),
            "p",
            &mut issues,
        );
        assert!(issues.is_empty());
    }
}
