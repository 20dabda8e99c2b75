//! Built-in catalog
//!
//! Registers the primitive, datatype, backbone, and resource partitions plus
//! the per-resource invariant hooks. Datatype, backbone, and resource helpers
//! insert into the registry and the dispatcher in one step, so the two tables
//! cannot drift apart.

use crate::dispatcher::{Primitive, TypeDispatcher, TypeDispatcherBuilder};
use crate::invariants::InvariantRegistry;
use crate::registry::SchemaRegistry;
use fhir_defs::{AttributeDefinition, Issue, is_present, path};
use serde_json::Value;

/// The finalized schema tables a conformance engine runs against.
pub struct Catalog {
    pub registry: SchemaRegistry,
    pub dispatcher: TypeDispatcher,
    pub invariants: InvariantRegistry,
}

/// Assemble the default catalog.
///
/// # Errors
///
/// Returns an error when the built-in tables are internally inconsistent
/// (duplicate type tags or field names); this indicates a defect in this
/// module, not in any input.
pub fn default_catalog() -> crate::Result<Catalog> {
    let mut registry = SchemaRegistry::new();
    let mut builder = TypeDispatcherBuilder::new();
    let mut invariants = InvariantRegistry::new();

    register_primitives(&mut builder)?;
    register_datatypes(&mut registry, &mut builder)?;
    register_backbones(&mut registry, &mut builder)?;
    register_resources(&mut registry, &mut builder)?;

    invariants.register("Patient", patient_contact_has_details);
    invariants.register("ServiceRequest", order_detail_requires_code);
    invariants.register("Observation", data_absent_reason_requires_no_value);

    let dispatcher = builder.build();
    tracing::debug!(
        kinds = dispatcher.len(),
        schemas = registry.type_names().len(),
        "assembled default catalog"
    );
    Ok(Catalog {
        registry,
        dispatcher,
        invariants,
    })
}

fn register_primitives(builder: &mut TypeDispatcherBuilder) -> crate::Result<()> {
    builder.primitive("boolean", Primitive::Boolean)?;
    builder.primitive("integer", Primitive::Integer)?;
    builder.primitive("positiveInt", Primitive::PositiveInt)?;
    builder.primitive("unsignedInt", Primitive::UnsignedInt)?;
    builder.primitive("decimal", Primitive::Decimal)?;
    builder.primitive("string", Primitive::String)?;
    builder.primitive("code", Primitive::Code)?;
    builder.primitive("id", Primitive::Id)?;
    builder.primitive("uri", Primitive::Uri)?;
    builder.primitive("url", Primitive::Url)?;
    builder.primitive("canonical", Primitive::Canonical)?;
    builder.primitive("oid", Primitive::Oid)?;
    builder.primitive("uuid", Primitive::Uuid)?;
    builder.primitive("markdown", Primitive::Markdown)?;
    builder.primitive("base64Binary", Primitive::Base64Binary)?;
    builder.primitive("date", Primitive::Date)?;
    builder.primitive("dateTime", Primitive::DateTime)?;
    builder.primitive("instant", Primitive::Instant)?;
    builder.primitive("time", Primitive::Time)?;
    builder.primitive("xhtml", Primitive::Xhtml)?;
    Ok(())
}

fn datatype(
    registry: &mut SchemaRegistry,
    builder: &mut TypeDispatcherBuilder,
    name: &str,
    definitions: Vec<AttributeDefinition>,
) -> crate::Result<()> {
    builder.complex(name)?;
    registry.register(name, definitions)
}

fn backbone(
    registry: &mut SchemaRegistry,
    builder: &mut TypeDispatcherBuilder,
    name: &str,
    definitions: Vec<AttributeDefinition>,
) -> crate::Result<()> {
    builder.backbone(name)?;
    registry.register(name, definitions)
}

fn resource(
    registry: &mut SchemaRegistry,
    builder: &mut TypeDispatcherBuilder,
    name: &str,
    definitions: Vec<AttributeDefinition>,
) -> crate::Result<()> {
    builder.resource(name)?;
    registry.register(name, definitions)
}

#[allow(clippy::too_many_lines)]
fn register_datatypes(
    registry: &mut SchemaRegistry,
    builder: &mut TypeDispatcherBuilder,
) -> crate::Result<()> {
    datatype(registry, builder, "Period", vec![
        AttributeDefinition::new("start", "dateTime"),
        AttributeDefinition::new("end", "dateTime"),
    ])?;

    datatype(registry, builder, "Coding", vec![
        AttributeDefinition::new("system", "uri"),
        AttributeDefinition::new("version", "string"),
        AttributeDefinition::new("code", "code"),
        AttributeDefinition::new("display", "string"),
        AttributeDefinition::new("userSelected", "boolean"),
    ])?;

    datatype(registry, builder, "CodeableConcept", vec![
        AttributeDefinition::new("coding", "Coding").array(),
        AttributeDefinition::new("text", "string"),
    ])?;

    datatype(registry, builder, "Identifier", vec![
        AttributeDefinition::new("use", "code")
            .allowed(vec!["usual", "official", "temp", "secondary", "old"]),
        AttributeDefinition::new("type", "CodeableConcept"),
        AttributeDefinition::new("system", "uri"),
        AttributeDefinition::new("value", "string"),
        AttributeDefinition::new("period", "Period"),
        AttributeDefinition::new("assigner", "Reference").targets(vec!["Organization"]),
    ])?;

    datatype(registry, builder, "HumanName", vec![
        AttributeDefinition::new("use", "code").allowed(vec![
            "usual",
            "official",
            "temp",
            "nickname",
            "anonymous",
            "old",
            "maiden",
        ]),
        AttributeDefinition::new("text", "string"),
        AttributeDefinition::new("family", "string"),
        AttributeDefinition::new("given", "string").array(),
        AttributeDefinition::new("prefix", "string").array(),
        AttributeDefinition::new("suffix", "string").array(),
        AttributeDefinition::new("period", "Period"),
    ])?;

    datatype(registry, builder, "ContactPoint", vec![
        AttributeDefinition::new("system", "code")
            .allowed(vec!["phone", "fax", "email", "pager", "url", "sms", "other"]),
        AttributeDefinition::new("value", "string"),
        AttributeDefinition::new("use", "code")
            .allowed(vec!["home", "work", "temp", "old", "mobile"]),
        AttributeDefinition::new("rank", "positiveInt"),
        AttributeDefinition::new("period", "Period"),
    ])?;

    datatype(registry, builder, "Address", vec![
        AttributeDefinition::new("use", "code")
            .allowed(vec!["home", "work", "temp", "old", "billing"]),
        AttributeDefinition::new("type", "code").allowed(vec!["postal", "physical", "both"]),
        AttributeDefinition::new("text", "string"),
        AttributeDefinition::new("line", "string").array(),
        AttributeDefinition::new("city", "string"),
        AttributeDefinition::new("district", "string"),
        AttributeDefinition::new("state", "string"),
        AttributeDefinition::new("postalCode", "string"),
        AttributeDefinition::new("country", "string"),
        AttributeDefinition::new("period", "Period"),
    ])?;

    datatype(registry, builder, "Quantity", vec![
        AttributeDefinition::new("value", "decimal"),
        AttributeDefinition::new("comparator", "code").allowed(vec!["<", "<=", ">=", ">"]),
        AttributeDefinition::new("unit", "string"),
        AttributeDefinition::new("system", "uri"),
        AttributeDefinition::new("code", "code"),
    ])?;

    datatype(registry, builder, "Range", vec![
        AttributeDefinition::new("low", "Quantity"),
        AttributeDefinition::new("high", "Quantity"),
    ])?;

    datatype(registry, builder, "Annotation", vec![
        AttributeDefinition::new("authorReference", "Reference").targets(vec![
            "Practitioner",
            "Patient",
            "RelatedPerson",
            "Organization",
        ]),
        AttributeDefinition::new("authorString", "string"),
        AttributeDefinition::new("time", "dateTime"),
        AttributeDefinition::new("text", "markdown").required(),
    ])?;

    datatype(registry, builder, "Reference", vec![
        AttributeDefinition::new("reference", "string"),
        AttributeDefinition::new("type", "uri"),
        AttributeDefinition::new("identifier", "Identifier"),
        AttributeDefinition::new("display", "string"),
    ])?;

    Ok(())
}

fn register_backbones(
    registry: &mut SchemaRegistry,
    builder: &mut TypeDispatcherBuilder,
) -> crate::Result<()> {
    backbone(registry, builder, "PatientContact", vec![
        AttributeDefinition::new("relationship", "CodeableConcept").array(),
        AttributeDefinition::new("name", "HumanName"),
        AttributeDefinition::new("telecom", "ContactPoint").array(),
        AttributeDefinition::new("address", "Address"),
        AttributeDefinition::new("gender", "code")
            .allowed(vec!["male", "female", "other", "unknown"]),
        AttributeDefinition::new("organization", "Reference").targets(vec!["Organization"]),
        AttributeDefinition::new("period", "Period"),
    ])?;

    backbone(registry, builder, "PatientCommunication", vec![
        AttributeDefinition::new("language", "CodeableConcept").required(),
        AttributeDefinition::new("preferred", "boolean"),
    ])?;

    backbone(registry, builder, "PatientLink", vec![
        AttributeDefinition::new("other", "Reference")
            .targets(vec!["Patient", "RelatedPerson"])
            .required(),
        AttributeDefinition::new("type", "code")
            .allowed(vec!["replaced-by", "replaces", "refer", "seealso"])
            .required(),
    ])?;

    backbone(registry, builder, "ObservationReferenceRange", vec![
        AttributeDefinition::new("low", "Quantity"),
        AttributeDefinition::new("high", "Quantity"),
        AttributeDefinition::new("type", "CodeableConcept"),
        AttributeDefinition::new("appliesTo", "CodeableConcept").array(),
        AttributeDefinition::new("text", "string"),
    ])?;

    backbone(registry, builder, "ObservationComponent", vec![
        AttributeDefinition::new("code", "CodeableConcept").required(),
        AttributeDefinition::new("valueQuantity", "Quantity"),
        AttributeDefinition::new("valueCodeableConcept", "CodeableConcept"),
        AttributeDefinition::new("valueString", "string"),
        AttributeDefinition::new("valueBoolean", "boolean"),
        AttributeDefinition::new("dataAbsentReason", "CodeableConcept"),
        AttributeDefinition::new("interpretation", "CodeableConcept").array(),
        AttributeDefinition::new("referenceRange", "ObservationReferenceRange").array(),
    ])?;

    Ok(())
}

#[allow(clippy::too_many_lines)]
fn register_resources(
    registry: &mut SchemaRegistry,
    builder: &mut TypeDispatcherBuilder,
) -> crate::Result<()> {
    resource(registry, builder, "Patient", vec![
        AttributeDefinition::new("id", "id"),
        AttributeDefinition::new("identifier", "Identifier").array(),
        AttributeDefinition::new("active", "boolean"),
        AttributeDefinition::new("name", "HumanName").array(),
        AttributeDefinition::new("telecom", "ContactPoint").array(),
        AttributeDefinition::new("gender", "code")
            .allowed(vec!["male", "female", "other", "unknown"]),
        AttributeDefinition::new("birthDate", "date"),
        AttributeDefinition::new("deceasedBoolean", "boolean"),
        AttributeDefinition::new("deceasedDateTime", "dateTime"),
        AttributeDefinition::new("address", "Address").array(),
        AttributeDefinition::new("maritalStatus", "CodeableConcept"),
        AttributeDefinition::new("multipleBirthBoolean", "boolean"),
        AttributeDefinition::new("multipleBirthInteger", "integer"),
        AttributeDefinition::new("contact", "PatientContact").array(),
        AttributeDefinition::new("communication", "PatientCommunication").array(),
        AttributeDefinition::new("generalPractitioner", "Reference")
            .array()
            .targets(vec!["Organization", "Practitioner", "PractitionerRole"]),
        AttributeDefinition::new("managingOrganization", "Reference").targets(vec!["Organization"]),
        AttributeDefinition::new("link", "PatientLink").array(),
    ])?;

    resource(registry, builder, "Observation", vec![
        AttributeDefinition::new("id", "id"),
        AttributeDefinition::new("identifier", "Identifier").array(),
        AttributeDefinition::new("status", "code")
            .allowed(vec![
                "registered",
                "preliminary",
                "final",
                "amended",
                "corrected",
                "cancelled",
                "entered-in-error",
                "unknown",
            ])
            .required(),
        AttributeDefinition::new("category", "CodeableConcept").array(),
        AttributeDefinition::new("code", "CodeableConcept").required(),
        AttributeDefinition::new("subject", "Reference")
            .targets(vec!["Patient", "Group", "Device", "Location"]),
        AttributeDefinition::new("effectiveDateTime", "dateTime"),
        AttributeDefinition::new("effectivePeriod", "Period"),
        AttributeDefinition::new("issued", "instant"),
        AttributeDefinition::new("performer", "Reference").array().targets(vec![
            "Practitioner",
            "PractitionerRole",
            "Organization",
            "CareTeam",
            "Patient",
            "RelatedPerson",
        ]),
        AttributeDefinition::new("valueQuantity", "Quantity"),
        AttributeDefinition::new("valueCodeableConcept", "CodeableConcept"),
        AttributeDefinition::new("valueString", "string"),
        AttributeDefinition::new("valueBoolean", "boolean"),
        AttributeDefinition::new("dataAbsentReason", "CodeableConcept"),
        AttributeDefinition::new("interpretation", "CodeableConcept").array(),
        AttributeDefinition::new("note", "Annotation").array(),
        AttributeDefinition::new("referenceRange", "ObservationReferenceRange").array(),
        AttributeDefinition::new("component", "ObservationComponent").array(),
    ])?;

    resource(registry, builder, "ServiceRequest", vec![
        AttributeDefinition::new("id", "id"),
        AttributeDefinition::new("identifier", "Identifier").array(),
        AttributeDefinition::new("status", "code")
            .allowed(vec![
                "draft",
                "active",
                "on-hold",
                "revoked",
                "completed",
                "entered-in-error",
                "unknown",
            ])
            .required(),
        AttributeDefinition::new("intent", "code")
            .allowed(vec![
                "proposal",
                "plan",
                "directive",
                "order",
                "original-order",
                "reflex-order",
                "filler-order",
                "instance-order",
                "option",
            ])
            .required(),
        AttributeDefinition::new("category", "CodeableConcept").array(),
        AttributeDefinition::new("priority", "code")
            .allowed(vec!["routine", "urgent", "asap", "stat"]),
        AttributeDefinition::new("doNotPerform", "boolean"),
        AttributeDefinition::new("code", "CodeableConcept"),
        AttributeDefinition::new("orderDetail", "CodeableConcept").array(),
        AttributeDefinition::new("subject", "Reference")
            .targets(vec!["Patient", "Group", "Location", "Device"])
            .required(),
        AttributeDefinition::new("occurrenceDateTime", "dateTime"),
        AttributeDefinition::new("occurrencePeriod", "Period"),
        AttributeDefinition::new("authoredOn", "dateTime"),
        AttributeDefinition::new("requester", "Reference").targets(vec![
            "Practitioner",
            "PractitionerRole",
            "Organization",
            "Patient",
            "RelatedPerson",
            "Device",
        ]),
        AttributeDefinition::new("performer", "Reference").array().any_target(),
        AttributeDefinition::new("reasonCode", "CodeableConcept").array(),
        AttributeDefinition::new("note", "Annotation").array(),
    ])?;

    Ok(())
}

/// Patient: each contact must carry at least one way to reach somebody.
fn patient_contact_has_details(instance: &Value, path: &str, issues: &mut Vec<Issue>) {
    let Some(contacts) = instance.get("contact").and_then(Value::as_array) else {
        return;
    };
    for (index, contact) in contacts.iter().enumerate() {
        let has_detail = ["name", "organization", "telecom", "address"]
            .iter()
            .any(|field| contact.get(*field).is_some_and(is_present));
        if !has_detail {
            issues.push(Issue::invariant(
                path::indexed(&path::child(path, "contact"), index),
                "contact requires at least one of name, organization, telecom or address",
            ));
        }
    }
}

/// ServiceRequest: orderDetail is meaningless without a code to detail.
fn order_detail_requires_code(instance: &Value, path: &str, issues: &mut Vec<Issue>) {
    let order_detail = instance.get("orderDetail").is_some_and(is_present);
    let code = instance.get("code").is_some_and(is_present);
    if order_detail && !code {
        issues.push(Issue::invariant(
            path::child(path, "orderDetail"),
            "orderDetail is only allowed when code is present",
        ));
    }
}

/// Observation: dataAbsentReason contradicts a supplied value.
fn data_absent_reason_requires_no_value(instance: &Value, path: &str, issues: &mut Vec<Issue>) {
    let reason = instance.get("dataAbsentReason").is_some_and(is_present);
    let has_value = [
        "valueQuantity",
        "valueCodeableConcept",
        "valueString",
        "valueBoolean",
    ]
    .iter()
    .any(|field| instance.get(*field).is_some_and(is_present));
    if reason && has_value {
        issues.push(Issue::invariant(
            path::child(path, "dataAbsentReason"),
            "dataAbsentReason is only allowed when no value is present",
        ));
    }
}
