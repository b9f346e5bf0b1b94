//! Confluent Schema Registry client
//!
//! [`RegistryApi`] lists the calls the commands need; [`RegistryClient`]
//! implements it over HTTP.

use async_trait::async_trait;

use crate::error::Result;

mod client;
pub mod force;
pub mod types;

pub use client::RegistryClient;
pub use force::register_with_forced_compatibility;
pub use types::{
    CompatibilityCheck, CompatibilityConfig, CompatibilityLevel, CompatibilityUpdate, LATEST,
    REGISTRY_MEDIA_TYPE, RegisteredSchema, SchemaRequest, SchemaVersion,
};

/// Calls against the Schema Registry REST interface
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// `GET /subjects/`
    async fn subjects(&self) -> Result<Vec<String>>;

    /// `GET /subjects/{subject}/versions`
    async fn versions(&self, subject: &str) -> Result<Vec<u32>>;

    /// `GET /subjects/{subject}/versions/{version}`; `version` may be `latest`
    async fn schema_version(&self, subject: &str, version: &str) -> Result<SchemaVersion>;

    /// `POST /subjects/{subject}/versions`
    async fn register(&self, subject: &str, schema: &SchemaRequest) -> Result<RegisteredSchema>;

    /// `POST /subjects/{subject}` - find an equivalent registered schema
    async fn lookup(&self, subject: &str, schema: &SchemaRequest) -> Result<SchemaVersion>;

    /// `GET /config`
    async fn global_compatibility(&self) -> Result<CompatibilityLevel>;

    /// `GET /config/{subject}`
    async fn subject_compatibility(&self, subject: &str) -> Result<CompatibilityLevel>;

    /// `PUT /config/{subject}`
    async fn set_compatibility(
        &self,
        subject: &str,
        level: &CompatibilityLevel,
    ) -> Result<CompatibilityLevel>;

    /// `POST /compatibility/subjects/{subject}/versions/{version}`
    async fn test_compatibility(
        &self,
        subject: &str,
        version: &str,
        schema: &SchemaRequest,
    ) -> Result<CompatibilityCheck>;
}
