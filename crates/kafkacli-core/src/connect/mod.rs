//! Kafka Connect REST client
//!
//! [`ConnectApi`] lists the calls the operators need; [`ConnectClient`]
//! implements it over HTTP.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::error::Result;

mod client;
pub mod source;
pub mod types;

pub use client::ConnectClient;
pub use source::ConfigSource;
pub use types::{
    ConnectorConfig, ConnectorInfo, ConnectorState, ConnectorStatus, PluginInfo, TASKS_MAX,
    TaskId, TaskInfo, TaskStatus, WorkerInfo, WorkerState,
};

/// Calls against the Kafka Connect REST interface
#[async_trait]
pub trait ConnectApi: Send + Sync {
    /// `GET /connectors/` - names of all active connectors
    async fn list(&self) -> Result<Vec<String>>;

    /// `GET /connectors/{name}/status`
    async fn status(&self, name: &str) -> Result<ConnectorStatus>;

    /// `GET /connectors/{name}`
    async fn config(&self, name: &str) -> Result<ConnectorInfo>;

    /// `GET /connectors/{name}/tasks`
    async fn tasks(&self, name: &str) -> Result<Vec<TaskInfo>>;

    /// `POST /connectors/`
    async fn create(&self, config: &ConnectorConfig) -> Result<ConnectorInfo>;

    /// `PUT /connectors/{name}/config` with the bare config map as body
    async fn update(&self, name: &str, config: &BTreeMap<String, String>)
    -> Result<ConnectorInfo>;

    /// `DELETE /connectors/{name}`
    async fn delete(&self, name: &str) -> Result<()>;

    /// `PUT /connectors/{name}/pause`
    async fn pause(&self, name: &str) -> Result<()>;

    /// `PUT /connectors/{name}/resume`
    async fn resume(&self, name: &str) -> Result<()>;

    /// `POST /connectors/{name}/tasks/{id}/restart`
    async fn restart_task(&self, name: &str, task: u32) -> Result<()>;

    /// `GET /connector-plugins`
    async fn plugins(&self) -> Result<Vec<PluginInfo>>;

    /// `GET /`
    async fn version(&self) -> Result<WorkerInfo>;
}
