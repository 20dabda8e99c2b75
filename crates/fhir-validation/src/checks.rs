//! Field-shape checks
//!
//! Independent, additive checks for a single present field: enum membership,
//! declared array-ness, and primitive value format. Each appends at most one
//! issue and never inspects other fields.

use fhir_defs::{AttributeDefinition, Issue};
use fhir_schema::Primitive;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}(-\d{2}(-\d{2})?)?$").expect("valid date pattern"));

static DATE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}(-\d{2}(-\d{2}(T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2}))?)?)?$")
        .expect("valid dateTime pattern")
});

static INSTANT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})$")
        .expect("valid instant pattern")
});

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}(\.\d+)?$").expect("valid time pattern"));

static BASE64_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/=\s]+$").expect("valid base64 pattern"));

static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-.]{1,64}$").expect("valid id pattern"));

static OID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^urn:oid:[0-2](\.(0|[1-9][0-9]*))+$").expect("valid oid pattern")
});

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^urn:uuid:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("valid uuid pattern")
});

/// Check a scalar value against a closed value set.
///
/// Only called for non-array enum fields; a value outside the set (or one
/// that is not a string at all) yields one `code-invalid` issue whose
/// diagnostics name the full allowed set.
pub fn check_enum(value: &Value, allowed: &[String], path: &str, issues: &mut Vec<Issue>) {
    let matches = value.as_str().is_some_and(|v| allowed.iter().any(|a| a == v));
    if !matches {
        issues.push(
            Issue::code_invalid(
                path,
                format!("value is not in the allowed set [{}]", allowed.join(", ")),
            )
            .with_value(value.clone()),
        );
    }
}

/// Check that a field declared as an array actually holds one.
pub fn check_array_shape(
    value: &Value,
    definition: &AttributeDefinition,
    path: &str,
    issues: &mut Vec<Issue>,
) {
    if definition.is_array && !value.is_array() {
        issues.push(
            Issue::invalid(path, format!("expected an array for field '{}'", definition.name))
                .with_value(value.clone()),
        );
    }
}

/// Check a primitive value's JSON shape and string format.
pub fn check_primitive(value: &Value, shape: Primitive, path: &str, issues: &mut Vec<Issue>) {
    let problem = match shape {
        Primitive::Boolean => (!value.is_boolean()).then_some("expected a boolean"),
        Primitive::Integer => value.as_i64().is_none().then_some("expected an integer"),
        Primitive::PositiveInt => value
            .as_u64()
            .is_none_or(|n| n == 0)
            .then_some("expected a positive integer"),
        Primitive::UnsignedInt => value
            .as_u64()
            .is_none()
            .then_some("expected a non-negative integer"),
        Primitive::Decimal => (!value.is_number()).then_some("expected a number"),
        Primitive::String
        | Primitive::Code
        | Primitive::Uri
        | Primitive::Url
        | Primitive::Canonical
        | Primitive::Markdown
        | Primitive::Xhtml => (!value.is_string()).then_some("expected a string"),
        Primitive::Id => string_format(value, &ID_RE, "expected an id (letters, digits, '-', '.')"),
        Primitive::Oid => string_format(value, &OID_RE, "expected an oid (urn:oid:...)"),
        Primitive::Uuid => string_format(value, &UUID_RE, "expected a uuid (urn:uuid:...)"),
        Primitive::Base64Binary => string_format(value, &BASE64_RE, "expected base64 content"),
        Primitive::Date => string_format(value, &DATE_RE, "expected a date (YYYY, YYYY-MM or YYYY-MM-DD)"),
        Primitive::DateTime => string_format(value, &DATE_TIME_RE, "expected a dateTime"),
        Primitive::Instant => string_format(value, &INSTANT_RE, "expected an instant with timezone"),
        Primitive::Time => string_format(value, &TIME_RE, "expected a time (hh:mm:ss)"),
    };

    if let Some(diagnostics) = problem {
        issues.push(Issue::invalid(path, diagnostics).with_value(value.clone()));
    }
}

fn string_format<'a>(value: &Value, pattern: &Regex, diagnostics: &'a str) -> Option<&'a str> {
    match value.as_str() {
        Some(text) if pattern.is_match(text) => None,
        _ => Some(diagnostics),
    }
}
