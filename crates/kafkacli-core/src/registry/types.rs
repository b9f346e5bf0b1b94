//! Schema Registry REST payloads

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Media type the registry expects in `Accept`
pub const REGISTRY_MEDIA_TYPE: &str = "application/vnd.schemaregistry.v1+json";

/// Version selector meaning "most recent version"
pub const LATEST: &str = "latest";

/// Rule governing which new schema versions a subject accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompatibilityLevel {
    /// No checks
    None,
    /// New schema can read data written with the previous one
    Backward,
    /// Backward against all previous versions
    BackwardTransitive,
    /// Previous schema can read data written with the new one
    Forward,
    /// Forward against all previous versions
    ForwardTransitive,
    /// Backward and forward
    Full,
    /// Full against all previous versions
    FullTransitive,
}

impl CompatibilityLevel {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityLevel::None => "NONE",
            CompatibilityLevel::Backward => "BACKWARD",
            CompatibilityLevel::BackwardTransitive => "BACKWARD_TRANSITIVE",
            CompatibilityLevel::Forward => "FORWARD",
            CompatibilityLevel::ForwardTransitive => "FORWARD_TRANSITIVE",
            CompatibilityLevel::Full => "FULL",
            CompatibilityLevel::FullTransitive => "FULL_TRANSITIVE",
        }
    }
}

impl fmt::Display for CompatibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompatibilityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(CompatibilityLevel::None),
            "BACKWARD" => Ok(CompatibilityLevel::Backward),
            "BACKWARD_TRANSITIVE" => Ok(CompatibilityLevel::BackwardTransitive),
            "FORWARD" => Ok(CompatibilityLevel::Forward),
            "FORWARD_TRANSITIVE" => Ok(CompatibilityLevel::ForwardTransitive),
            "FULL" => Ok(CompatibilityLevel::Full),
            "FULL_TRANSITIVE" => Ok(CompatibilityLevel::FullTransitive),
            other => Err(Error::validation(format!(
                "unknown compatibility level '{}'",
                other
            ))),
        }
    }
}

/// Body of `GET /config` and `GET /config/{subject}`; `PUT` answers with
/// `compatibility` instead of `compatibilityLevel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityConfig {
    /// Configured level
    #[serde(rename = "compatibilityLevel", alias = "compatibility")]
    pub level: CompatibilityLevel,
}

/// Body of `PUT /config/{subject}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityUpdate {
    /// Requested level
    pub compatibility: CompatibilityLevel,
}

/// Schema submitted for registration, lookup or compatibility testing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRequest {
    /// Schema definition as a string (Avro JSON, JSON Schema, protobuf IDL)
    pub schema: String,

    /// `AVRO` (registry default), `JSON` or `PROTOBUF`
    #[serde(rename = "schemaType", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
}

impl SchemaRequest {
    /// Wrap a schema definition
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            schema_type: None,
        }
    }

    /// Set the schema type
    pub fn with_type(mut self, schema_type: Option<String>) -> Self {
        self.schema_type = schema_type.map(|t| t.to_uppercase());
        self
    }
}

/// A schema registered under a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Subject name
    pub subject: String,

    /// Version within the subject
    pub version: u32,

    /// Globally unique schema id
    pub id: u32,

    /// Schema definition
    pub schema: String,

    /// Schema type, omitted by the registry for Avro
    #[serde(rename = "schemaType", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
}

/// Response of a registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredSchema {
    /// Globally unique schema id
    pub id: u32,
}

/// Response of a compatibility test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityCheck {
    /// Whether the schema may be registered
    pub is_compatible: bool,

    /// Reasons given by newer registries when incompatible
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}
