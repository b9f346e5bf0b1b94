use async_trait::async_trait;
use reqwest::Method;

use super::RegistryApi;
use super::types::{
    CompatibilityCheck, CompatibilityConfig, CompatibilityLevel, CompatibilityUpdate,
    REGISTRY_MEDIA_TYPE, RegisteredSchema, SchemaRequest, SchemaVersion,
};
use crate::config::Endpoint;
use crate::error::Result;
use crate::http::RestClient;

const SUBJECTS: &str = "subjects";
const CONFIG: &str = "config";

/// HTTP client for one Schema Registry instance
#[derive(Debug, Clone)]
pub struct RegistryClient {
    rest: RestClient,
}

impl RegistryClient {
    /// Create a client for the registry at `endpoint`
    pub fn new(endpoint: &Endpoint) -> Result<Self> {
        Ok(Self {
            rest: RestClient::new(endpoint, Some(REGISTRY_MEDIA_TYPE))?,
        })
    }
}

#[async_trait]
impl RegistryApi for RegistryClient {
    async fn subjects(&self) -> Result<Vec<String>> {
        self.rest.get(&[SUBJECTS, ""]).await
    }

    async fn versions(&self, subject: &str) -> Result<Vec<u32>> {
        self.rest.get(&[SUBJECTS, subject, "versions"]).await
    }

    async fn schema_version(&self, subject: &str, version: &str) -> Result<SchemaVersion> {
        self.rest
            .get(&[SUBJECTS, subject, "versions", version])
            .await
    }

    async fn register(&self, subject: &str, schema: &SchemaRequest) -> Result<RegisteredSchema> {
        tracing::debug!("Registering schema under {}", subject);
        self.rest
            .call(Method::POST, &[SUBJECTS, subject, "versions"], Some(schema))
            .await
    }

    async fn lookup(&self, subject: &str, schema: &SchemaRequest) -> Result<SchemaVersion> {
        self.rest
            .call(Method::POST, &[SUBJECTS, subject], Some(schema))
            .await
    }

    async fn global_compatibility(&self) -> Result<CompatibilityLevel> {
        let config: CompatibilityConfig = self.rest.get(&[CONFIG]).await?;
        Ok(config.level)
    }

    async fn subject_compatibility(&self, subject: &str) -> Result<CompatibilityLevel> {
        let config: CompatibilityConfig = self.rest.get(&[CONFIG, subject]).await?;
        Ok(config.level)
    }

    async fn set_compatibility(
        &self,
        subject: &str,
        level: &CompatibilityLevel,
    ) -> Result<CompatibilityLevel> {
        tracing::debug!("Setting compatibility of {} to {}", subject, level);
        let body = CompatibilityUpdate {
            compatibility: level.clone(),
        };
        let config: CompatibilityConfig = self
            .rest
            .call(Method::PUT, &[CONFIG, subject], Some(&body))
            .await?;
        Ok(config.level)
    }

    async fn test_compatibility(
        &self,
        subject: &str,
        version: &str,
        schema: &SchemaRequest,
    ) -> Result<CompatibilityCheck> {
        self.rest
            .call(
                Method::POST,
                &["compatibility", SUBJECTS, subject, "versions", version],
                Some(schema),
            )
            .await
    }
}
