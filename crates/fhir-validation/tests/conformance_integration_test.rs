//! Integration tests for fhir-validation
//!
//! End-to-end conformance scenarios against the built-in catalog plus
//! engines assembled over hand-built catalogs.

use fhir_defs::{AttributeDefinition, IssueCode, Severity};
use fhir_schema::{
    Catalog, InvariantRegistry, Primitive, SchemaRegistry, TypeDispatcherBuilder,
};
use fhir_validation::{ConformanceEngine, ConformanceReporter, conformance};
use serde_json::json;

fn default_engine() -> ConformanceEngine {
    ConformanceEngine::with_default_catalog().expect("default catalog assembles")
}

/// A minimal hand-built catalog with one type "X" requiring `status`.
fn minimal_engine() -> ConformanceEngine {
    let mut registry = SchemaRegistry::new();
    let mut builder = TypeDispatcherBuilder::new();
    builder.primitive("code", Primitive::Code).unwrap();
    builder.primitive("integer", Primitive::Integer).unwrap();
    builder.resource("X").unwrap();
    registry
        .register("X", vec![
            AttributeDefinition::new("status", "code").required(),
            AttributeDefinition::new("a", "integer"),
        ])
        .unwrap();
    ConformanceEngine::new(Catalog {
        registry,
        dispatcher: builder.build(),
        invariants: InvariantRegistry::new(),
    })
}

#[test]
fn test_scenario_missing_required_status() {
    let result = minimal_engine().conformance(&json!({}), "X").unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].code, IssueCode::Required);
    assert_eq!(result.issues[0].location.path, "X.status");
}

#[test]
fn test_scenario_unknown_field() {
    let result = minimal_engine()
        .conformance(&json!({"status": "ok", "a": 1, "foo": 2}), "X")
        .unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].code, IssueCode::Invalid);
    assert!(result.issues[0].diagnostics.contains("foo"));
}

#[test]
fn test_scenario_enum_violation() {
    let result = default_engine()
        .conformance(&json!({"gender": "x"}), "Patient")
        .unwrap();
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].code, IssueCode::CodeInvalid);
    assert_eq!(result.issues[0].location.path, "Patient.gender");
    for member in ["male", "female", "other", "unknown"] {
        assert!(result.issues[0].diagnostics.contains(member));
    }
}

#[test]
fn test_scenario_nested_contact_invariant() {
    let patient = json!({
        "resourceType": "Patient",
        "contact": [
            {"name": {"family": "du Marché"}},
            {"gender": "female"}
        ]
    });
    let result = default_engine().conformance(&patient, "Patient").unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].location.path, "Patient.contact[1]");
    assert_eq!(result.issues[0].code, IssueCode::Invariant);
}

#[test]
fn test_scenario_order_detail_invariant() {
    let request = json!({
        "resourceType": "ServiceRequest",
        "status": "active",
        "intent": "order",
        "subject": {"reference": "Patient/123"},
        "orderDetail": [{"text": "with clips"}]
    });
    let result = default_engine().conformance(&request, "ServiceRequest").unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].code, IssueCode::Invariant);
    assert_eq!(result.issues[0].location.path, "ServiceRequest.orderDetail");
}

#[test]
fn test_reference_target_matrix() {
    let engine = default_engine();
    let base = |subject: serde_json::Value| {
        json!({
            "resourceType": "Observation",
            "status": "final",
            "code": {"text": "BP"},
            "subject": subject
        })
    };

    // Allowed target type
    let result = engine
        .conformance(&base(json!({"reference": "Patient/123"})), "Observation")
        .unwrap();
    assert!(result.is_valid, "unexpected issues: {:?}", result.issues);

    // Disallowed target type
    let result = engine
        .conformance(&base(json!({"reference": "Observation/123"})), "Observation")
        .unwrap();
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].code, IssueCode::Invalid);
    assert_eq!(result.issues[0].location.path, "Observation.subject");
    assert!(result.issues[0].diagnostics.contains("Observation"));
    assert!(result.issues[0].diagnostics.contains("Patient"));

    // No id segment: documented leniency
    let result = engine
        .conformance(&base(json!({"reference": "Observation"})), "Observation")
        .unwrap();
    assert!(result.is_valid);
}

#[test]
fn test_reference_any_wildcard() {
    let request = json!({
        "resourceType": "ServiceRequest",
        "status": "active",
        "intent": "order",
        "subject": {"reference": "Patient/123"},
        "performer": [{"reference": "CareTeam/7"}, {"reference": "HealthcareService/2"}]
    });
    let result = default_engine().conformance(&request, "ServiceRequest").unwrap();
    assert!(result.is_valid, "unexpected issues: {:?}", result.issues);
}

#[test]
fn test_idempotence_including_order() {
    let engine = default_engine();
    let patient = json!({
        "resourceType": "Patient",
        "gender": "x",
        "birthDate": "not-a-date",
        "mystery": true,
        "contact": [{"gender": "male"}]
    });
    let first = engine.conformance(&patient, "Patient").unwrap();
    let second = engine.conformance(&patient, "Patient").unwrap();
    assert!(!first.is_valid);
    assert_eq!(first, second);
}

#[test]
fn test_broken_wiring_survives_batch() {
    let mut registry = SchemaRegistry::new();
    let mut builder = TypeDispatcherBuilder::new();
    builder.primitive("string", Primitive::String).unwrap();
    builder.resource("Doc").unwrap();
    registry
        .register("Doc", vec![
            AttributeDefinition::new("title", "string"),
            AttributeDefinition::new("widget", "Widget"),
        ])
        .unwrap();
    let engine = ConformanceEngine::new(Catalog {
        registry,
        dispatcher: builder.build(),
        invariants: InvariantRegistry::new(),
    });

    // A whole batch validates without a panic; the broken entry surfaces as a
    // fatal issue on the documents that touch it.
    let batch = vec![
        json!({"title": "fine"}),
        json!({"title": "broken", "widget": {"x": 1}}),
        json!({"title": "also fine"}),
    ];
    let results: Vec<_> = batch
        .iter()
        .map(|doc| engine.conformance(doc, "Doc").unwrap())
        .collect();

    assert!(results[0].is_valid);
    assert!(results[1].has_fatal());
    assert_eq!(results[1].issues[0].severity, Severity::Fatal);
    assert_eq!(results[1].issues[0].code, IssueCode::Exception);
    assert!(results[2].is_valid);
}

#[test]
fn test_deep_recursion_with_indexed_paths() {
    let patient = json!({
        "resourceType": "Patient",
        "name": [
            {"family": "Chalmers"},
            {"use": "not-a-use"}
        ]
    });
    let result = default_engine().conformance(&patient, "Patient").unwrap();
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].location.path, "Patient.name[1].use");
    assert_eq!(result.issues[0].code, IssueCode::CodeInvalid);
}

#[test]
fn test_full_patient_round() {
    let patient = json!({
        "resourceType": "Patient",
        "id": "example",
        "identifier": [{"system": "urn:oid:1.2.36.146.595.217.0.1", "value": "12345"}],
        "active": true,
        "name": [{"use": "official", "family": "Chalmers", "given": ["Peter", "James"]}],
        "telecom": [{"system": "phone", "value": "(03) 5555 6473", "use": "work", "rank": 1}],
        "gender": "male",
        "birthDate": "1974-12-25",
        "deceasedBoolean": false,
        "address": [{"use": "home", "line": ["534 Erewhon St"], "city": "PleasantVille"}],
        "contact": [{
            "relationship": [{"coding": [{"system": "http://terminology.hl7.org/CodeSystem/v2-0131", "code": "N"}]}],
            "name": {"family": "du Marché", "given": ["Bénédicte"]},
            "telecom": [{"system": "phone", "value": "+33 (237) 998327"}],
            "gender": "female",
            "period": {"start": "2012"}
        }],
        "communication": [{"language": {"text": "English"}, "preferred": true}],
        "managingOrganization": {"reference": "Organization/1"}
    });
    let result = default_engine().conformance(&patient, "Patient").unwrap();
    assert!(result.is_valid, "unexpected issues: {:?}", result.issues);
}

#[test]
fn test_convenience_function_matches_engine() {
    let patient = json!({"resourceType": "Patient", "gender": "x"});
    let from_free_fn = conformance(&patient, "Patient").unwrap();
    let from_engine = default_engine().conformance(&patient, "Patient").unwrap();
    assert_eq!(from_free_fn, from_engine);
}

#[test]
fn test_reporter_round() {
    let result = default_engine()
        .conformance(&json!({"gender": "x", "foo": 1}), "Patient")
        .unwrap();
    let reporter = ConformanceReporter::new();

    let text = reporter.format_text(&result);
    assert!(text.contains("Patient.gender"));
    assert!(text.contains("foo"));
    assert!(text.contains("issue(s) found"));

    let json_report = reporter.format_json(&result).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json_report).unwrap();
    assert_eq!(value["isValid"], false);
    assert_eq!(value["issues"].as_array().unwrap().len(), 2);
}
