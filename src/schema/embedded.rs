//! Core SCIM schemas embedded in the library.
//!
//! Attribute characteristics that match the RFC 7643 defaults (single-valued,
//! optional, readWrite, returned by default, not unique) are left out of the
//! documents and filled in by serde defaults when loading.

/// URI of the core User schema.
pub const USER_SCHEMA_URI: &str = "urn:ietf:params:scim:schemas:core:2.0:User";
/// URI of the core Group schema.
pub const GROUP_SCHEMA_URI: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";
/// URI of the Enterprise User extension schema.
pub const ENTERPRISE_USER_SCHEMA_URI: &str =
    "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User";

/// Returns the core User schema (RFC 7643 §4.1) as a JSON string.
pub fn core_user_schema() -> &'static str {
    r#"{
  "id": "urn:ietf:params:scim:schemas:core:2.0:User",
  "name": "User",
  "description": "User Account",
  "attributes": [
    {"name": "userName", "type": "string", "required": true, "uniqueness": "server",
     "description": "Unique identifier for the User, typically used to authenticate."},
    {"name": "externalId", "type": "string", "caseExact": true},
    {"name": "name", "type": "complex", "subAttributes": [
      {"name": "formatted", "type": "string"},
      {"name": "familyName", "type": "string"},
      {"name": "givenName", "type": "string"},
      {"name": "middleName", "type": "string"},
      {"name": "honorificPrefix", "type": "string"},
      {"name": "honorificSuffix", "type": "string"}
    ]},
    {"name": "displayName", "type": "string"},
    {"name": "nickName", "type": "string"},
    {"name": "profileUrl", "type": "reference", "referenceTypes": ["external"]},
    {"name": "title", "type": "string"},
    {"name": "userType", "type": "string"},
    {"name": "preferredLanguage", "type": "string"},
    {"name": "locale", "type": "string"},
    {"name": "timezone", "type": "string"},
    {"name": "active", "type": "boolean"},
    {"name": "emails", "type": "complex", "multiValued": true, "subAttributes": [
      {"name": "value", "type": "string"},
      {"name": "display", "type": "string"},
      {"name": "type", "type": "string", "canonicalValues": ["work", "home", "other"]},
      {"name": "primary", "type": "boolean"}
    ]},
    {"name": "phoneNumbers", "type": "complex", "multiValued": true, "subAttributes": [
      {"name": "value", "type": "string"},
      {"name": "display", "type": "string"},
      {"name": "type", "type": "string",
       "canonicalValues": ["work", "home", "mobile", "fax", "pager", "other"]},
      {"name": "primary", "type": "boolean"}
    ]},
    {"name": "addresses", "type": "complex", "multiValued": true, "subAttributes": [
      {"name": "formatted", "type": "string"},
      {"name": "streetAddress", "type": "string"},
      {"name": "locality", "type": "string"},
      {"name": "region", "type": "string"},
      {"name": "postalCode", "type": "string"},
      {"name": "country", "type": "string"},
      {"name": "type", "type": "string", "canonicalValues": ["work", "home", "other"]},
      {"name": "primary", "type": "boolean"}
    ]},
    {"name": "groups", "type": "complex", "multiValued": true, "mutability": "readOnly",
     "subAttributes": [
      {"name": "value", "type": "string", "mutability": "readOnly"},
      {"name": "$ref", "type": "reference", "referenceTypes": ["User", "Group"],
       "mutability": "readOnly"},
      {"name": "display", "type": "string", "mutability": "readOnly"},
      {"name": "type", "type": "string", "canonicalValues": ["direct", "indirect"],
       "mutability": "readOnly"}
    ]}
  ]
}"#
}

/// Returns the core Group schema (RFC 7643 §4.2) as a JSON string.
pub fn core_group_schema() -> &'static str {
    r#"{
  "id": "urn:ietf:params:scim:schemas:core:2.0:Group",
  "name": "Group",
  "description": "Group",
  "attributes": [
    {"name": "displayName", "type": "string", "required": true,
     "description": "A human-readable name for the Group."},
    {"name": "externalId", "type": "string", "caseExact": true},
    {"name": "members", "type": "complex", "multiValued": true, "subAttributes": [
      {"name": "value", "type": "string", "mutability": "immutable"},
      {"name": "$ref", "type": "reference", "referenceTypes": ["User", "Group"],
       "mutability": "immutable"},
      {"name": "display", "type": "string"},
      {"name": "type", "type": "string", "canonicalValues": ["User", "Group"],
       "mutability": "immutable"}
    ]}
  ]
}"#
}

/// Returns the Enterprise User extension schema (RFC 7643 §4.3) as a JSON string.
pub fn enterprise_user_schema() -> &'static str {
    r#"{
  "id": "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User",
  "name": "EnterpriseUser",
  "description": "Enterprise User",
  "attributes": [
    {"name": "employeeNumber", "type": "string"},
    {"name": "costCenter", "type": "string"},
    {"name": "organization", "type": "string"},
    {"name": "division", "type": "string"},
    {"name": "department", "type": "string"},
    {"name": "manager", "type": "complex", "subAttributes": [
      {"name": "value", "type": "string"},
      {"name": "$ref", "type": "reference", "referenceTypes": ["User"]},
      {"name": "displayName", "type": "string", "mutability": "readOnly"}
    ]}
  ]
}"#
}
