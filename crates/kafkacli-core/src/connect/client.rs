use async_trait::async_trait;
use reqwest::Method;
use std::collections::BTreeMap;

use super::ConnectApi;
use super::types::{ConnectorConfig, ConnectorInfo, ConnectorStatus, PluginInfo, TaskInfo, WorkerInfo};
use crate::config::Endpoint;
use crate::error::Result;
use crate::http::RestClient;

const CONNECTORS: &str = "connectors";

/// HTTP client for one Kafka Connect worker
#[derive(Debug, Clone)]
pub struct ConnectClient {
    rest: RestClient,
}

impl ConnectClient {
    /// Create a client for the worker at `endpoint`
    pub fn new(endpoint: &Endpoint) -> Result<Self> {
        Ok(Self {
            rest: RestClient::new(endpoint, None)?,
        })
    }
}

#[async_trait]
impl ConnectApi for ConnectClient {
    async fn list(&self) -> Result<Vec<String>> {
        self.rest.get(&[CONNECTORS, ""]).await
    }

    async fn status(&self, name: &str) -> Result<ConnectorStatus> {
        self.rest.get(&[CONNECTORS, name, "status"]).await
    }

    async fn config(&self, name: &str) -> Result<ConnectorInfo> {
        self.rest.get(&[CONNECTORS, name]).await
    }

    async fn tasks(&self, name: &str) -> Result<Vec<TaskInfo>> {
        self.rest.get(&[CONNECTORS, name, "tasks"]).await
    }

    async fn create(&self, config: &ConnectorConfig) -> Result<ConnectorInfo> {
        tracing::debug!("Creating connector {}", config.name);
        self.rest
            .call(Method::POST, &[CONNECTORS, ""], Some(config))
            .await
    }

    async fn update(
        &self,
        name: &str,
        config: &BTreeMap<String, String>,
    ) -> Result<ConnectorInfo> {
        tracing::debug!("Updating connector {}", name);
        self.rest
            .call(Method::PUT, &[CONNECTORS, name, "config"], Some(config))
            .await
    }

    async fn delete(&self, name: &str) -> Result<()> {
        self.rest.execute(Method::DELETE, &[CONNECTORS, name]).await
    }

    async fn pause(&self, name: &str) -> Result<()> {
        self.rest
            .execute(Method::PUT, &[CONNECTORS, name, "pause"])
            .await
    }

    async fn resume(&self, name: &str) -> Result<()> {
        self.rest
            .execute(Method::PUT, &[CONNECTORS, name, "resume"])
            .await
    }

    async fn restart_task(&self, name: &str, task: u32) -> Result<()> {
        tracing::info!("Restarting task {} for connector {}", task, name);
        let id = task.to_string();
        self.rest
            .execute(Method::POST, &[CONNECTORS, name, "tasks", id.as_str(), "restart"])
            .await
    }

    async fn plugins(&self) -> Result<Vec<PluginInfo>> {
        self.rest.get(&["connector-plugins"]).await
    }

    async fn version(&self) -> Result<WorkerInfo> {
        self.rest.get(&[]).await
    }
}
