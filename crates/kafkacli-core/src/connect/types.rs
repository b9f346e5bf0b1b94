//! Kafka Connect REST payloads

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Configuration key holding the maximum number of tasks
pub const TASKS_MAX: &str = "tasks.max";

/// Runtime state of a connector or task.
///
/// Values the worker reports that aren't listed here are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectorState {
    /// Running normally
    Running,
    /// Failed; the task trace usually says why
    Failed,
    /// Paused by an operator
    Paused,
    /// Not yet assigned to a worker
    Unassigned,
    /// Any other state reported by the worker
    Other(String),
}

impl ConnectorState {
    /// Parse a user-supplied state filter, case-insensitively.
    ///
    /// Returns `None` for anything outside the four filterable states.
    pub fn parse_filter(raw: &str) -> Option<Self> {
        match Self::from(raw.to_uppercase()) {
            ConnectorState::Other(_) => None,
            state => Some(state),
        }
    }

    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            ConnectorState::Running => "RUNNING",
            ConnectorState::Failed => "FAILED",
            ConnectorState::Paused => "PAUSED",
            ConnectorState::Unassigned => "UNASSIGNED",
            ConnectorState::Other(s) => s,
        }
    }
}

impl From<String> for ConnectorState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "RUNNING" => ConnectorState::Running,
            "FAILED" => ConnectorState::Failed,
            "PAUSED" => ConnectorState::Paused,
            "UNASSIGNED" => ConnectorState::Unassigned,
            _ => ConnectorState::Other(s),
        }
    }
}

impl From<ConnectorState> for String {
    fn from(state: ConnectorState) -> Self {
        match state {
            ConnectorState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ConnectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `GET /connectors/{name}/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorStatus {
    /// Connector name
    pub name: String,

    /// Connector-level state
    pub connector: WorkerState,

    /// Per-task states
    #[serde(default)]
    pub tasks: Vec<TaskStatus>,

    /// `source` or `sink`, when the worker reports it
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ConnectorStatus {
    /// True when the connector itself or any of its tasks is in `state`
    pub fn has_state(&self, state: &ConnectorState) -> bool {
        self.connector.state == *state || self.tasks.iter().any(|t| t.state == *state)
    }

    /// Ids of tasks currently in the FAILED state
    pub fn failed_tasks(&self) -> Vec<u32> {
        self.tasks
            .iter()
            .filter(|t| t.state == ConnectorState::Failed)
            .map(|t| t.id)
            .collect()
    }
}

/// State of a connector on a worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerState {
    /// Current state
    pub state: ConnectorState,

    /// Worker running the connector
    #[serde(default)]
    pub worker_id: String,
}

/// State of one task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    /// Task id, unique within the connector
    pub id: u32,

    /// Current state
    pub state: ConnectorState,

    /// Worker running the task
    #[serde(default)]
    pub worker_id: String,

    /// Stack trace of a failed task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// Name and configuration of a connector, as submitted on create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Connector name
    #[serde(default)]
    pub name: String,

    /// Configuration keys and values
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

/// Response of `GET /connectors/{name}`, create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorInfo {
    /// Connector name
    pub name: String,

    /// Current configuration
    #[serde(default)]
    pub config: BTreeMap<String, String>,

    /// Tasks created for the connector
    #[serde(default)]
    pub tasks: Vec<TaskId>,

    /// `source` or `sink`, when the worker reports it
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ConnectorInfo {
    /// Strip the task list, keeping what is needed to recreate the connector
    pub fn to_config(&self) -> ConnectorConfig {
        ConnectorConfig {
            name: self.name.clone(),
            config: self.config.clone(),
        }
    }
}

/// Task identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskId {
    /// Owning connector
    pub connector: String,

    /// Task number
    pub task: u32,
}

/// Entry of `GET /connectors/{name}/tasks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInfo {
    /// Task identifier
    pub id: TaskId,

    /// Task configuration
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

/// Entry of `GET /connector-plugins`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Fully qualified connector class
    pub class: String,

    /// `source` or `sink`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Plugin version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Response of `GET /`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerInfo {
    /// Kafka Connect version
    pub version: String,

    /// Build commit
    #[serde(default)]
    pub commit: String,

    /// Kafka cluster the worker belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kafka_cluster_id: Option<String>,
}
