//! Request body validation against SCIM schemas.
//!
//! The dispatcher delegates validation to an [`AttributeValidator`]. The
//! default [`SchemaValidator`] walks the resource type's core schema and
//! extensions and produces the attribute set handed to the provider.

use super::types::{AttributeDefinition, AttributeType, Mutability, Schema};
use crate::error::{ValidationError, ValidationResult};
use crate::resource::ResourceAttributes;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::DateTime;
use serde_json::{Map, Value};

/// The schemas that apply to one resource type, resolved from the registry.
#[derive(Debug, Clone)]
pub struct ResourceSchemas<'a> {
    /// Core schema of the resource type
    pub core: &'a Schema,
    /// Extension schemas, each with its `required` flag
    pub extensions: Vec<ExtensionSchema<'a>>,
}

/// An extension schema attached to a resource type.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionSchema<'a> {
    pub schema: &'a Schema,
    pub required: bool,
}

/// Validation capability used by create and replace.
///
/// Implementations turn a raw request body into the attribute set passed to
/// the provider, or report why the body is unacceptable.
pub trait AttributeValidator: Send + Sync {
    fn validate(
        &self,
        body: &[u8],
        schemas: &ResourceSchemas<'_>,
    ) -> ValidationResult<ResourceAttributes>;
}

/// Schema-driven validator.
///
/// Attribute names match case-insensitively and come out under the schema's
/// spelling. Unknown attributes, `schemas`, and read-only attributes such as
/// `id` and `meta` are dropped. A `null` value counts as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn new() -> Self {
        Self
    }
}

impl AttributeValidator for SchemaValidator {
    fn validate(
        &self,
        body: &[u8],
        schemas: &ResourceSchemas<'_>,
    ) -> ValidationResult<ResourceAttributes> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            ValidationError::invalid_syntax(format!("Request body is not valid JSON: {}", e))
        })?;
        let Value::Object(object) = value else {
            return Err(ValidationError::invalid_syntax(
                "Request body must be a JSON object",
            ));
        };

        let mut attributes = validate_attributes(&schemas.core.attributes, &object, None)?;

        for extension in &schemas.extensions {
            let id = &extension.schema.id;
            match lookup(&object, id)? {
                Some(Value::Object(extension_object)) => {
                    let extension_attributes = validate_attributes(
                        &extension.schema.attributes,
                        extension_object,
                        Some(id),
                    )?;
                    attributes.insert(id.clone(), Value::Object(extension_attributes));
                }
                Some(_) => {
                    return Err(ValidationError::invalid_value(format!(
                        "Extension \"{}\" must be a JSON object",
                        id
                    )));
                }
                None if extension.required => {
                    return Err(ValidationError::invalid_value(format!(
                        "Required extension \"{}\" is missing",
                        id
                    )));
                }
                None => {}
            }
        }

        Ok(attributes)
    }
}

/// Case-insensitive key lookup that treats `null` as absent.
///
/// Two keys naming the same attribute in different case are rejected.
fn lookup<'v>(object: &'v Map<String, Value>, name: &str) -> ValidationResult<Option<&'v Value>> {
    let mut matching = object
        .iter()
        .filter(|(key, _)| key.eq_ignore_ascii_case(name));
    let found = matching.next();
    if let Some((duplicate, _)) = matching.next() {
        return Err(ValidationError::invalid_value(format!(
            "Attribute \"{}\" is given more than once (as \"{}\")",
            name, duplicate
        )));
    }
    Ok(found.map(|(_, value)| value).filter(|value| !value.is_null()))
}

fn attribute_path(parent: Option<&str>, name: &str) -> String {
    match parent {
        Some(parent) => format!("{}.{}", parent, name),
        None => name.to_string(),
    }
}

fn validate_attributes(
    definitions: &[AttributeDefinition],
    object: &Map<String, Value>,
    parent: Option<&str>,
) -> ValidationResult<Map<String, Value>> {
    let mut validated = Map::new();

    for definition in definitions {
        if definition.mutability == Mutability::ReadOnly {
            continue;
        }

        let path = attribute_path(parent, &definition.name);
        match lookup(object, &definition.name)? {
            Some(value) => {
                let value = validate_value(definition, value, &path)?;
                validated.insert(definition.name.clone(), value);
            }
            None if definition.required => {
                return Err(ValidationError::invalid_value(format!(
                    "Required attribute \"{}\" is missing",
                    path
                )));
            }
            None => {}
        }
    }

    Ok(validated)
}

fn validate_value(
    definition: &AttributeDefinition,
    value: &Value,
    path: &str,
) -> ValidationResult<Value> {
    match (definition.multi_valued, value) {
        (true, Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| validate_single(definition, item, path))
            .collect::<ValidationResult<Vec<_>>>()
            .map(Value::Array),
        (true, _) => Err(ValidationError::invalid_value(format!(
            "Attribute \"{}\" must be multi-valued (array)",
            path
        ))),
        (false, Value::Array(_)) => Err(ValidationError::invalid_value(format!(
            "Attribute \"{}\" must be single-valued (not array)",
            path
        ))),
        (false, _) => validate_single(definition, value, path),
    }
}

fn validate_single(
    definition: &AttributeDefinition,
    value: &Value,
    path: &str,
) -> ValidationResult<Value> {
    let valid = match definition.data_type {
        AttributeType::String | AttributeType::Reference => value.is_string(),
        AttributeType::Boolean => value.is_boolean(),
        AttributeType::Integer => value.is_i64() || value.is_u64(),
        AttributeType::Decimal => value.is_number(),
        AttributeType::DateTime => value
            .as_str()
            .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok()),
        AttributeType::Binary => value.as_str().is_some_and(|s| BASE64.decode(s).is_ok()),
        AttributeType::Complex => {
            let Value::Object(object) = value else {
                return Err(type_mismatch(definition, value, path));
            };
            return validate_attributes(&definition.sub_attributes, object, Some(path))
                .map(Value::Object);
        }
    };

    if valid {
        Ok(value.clone())
    } else {
        Err(type_mismatch(definition, value, path))
    }
}

fn type_mismatch(definition: &AttributeDefinition, value: &Value, path: &str) -> ValidationError {
    let expected = match definition.data_type {
        AttributeType::String => "string",
        AttributeType::Boolean => "boolean",
        AttributeType::Decimal => "decimal",
        AttributeType::Integer => "integer",
        AttributeType::DateTime => "RFC 3339 dateTime",
        AttributeType::Binary => "base64 binary",
        AttributeType::Reference => "reference",
        AttributeType::Complex => "complex object",
    };
    ValidationError::invalid_value(format!(
        "Attribute \"{}\" must be {} but was {}",
        path,
        expected,
        value_type_name(value)
    ))
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "decimal",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
