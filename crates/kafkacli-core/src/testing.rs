//! In-memory fakes of the REST clients

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use crate::connect::{
    ConnectApi, ConnectorConfig, ConnectorInfo, ConnectorState, ConnectorStatus, PluginInfo,
    TaskInfo, TaskStatus, WorkerInfo, WorkerState,
};
use crate::error::{Error, Result};
use crate::registry::{
    CompatibilityCheck, CompatibilityLevel, RegisteredSchema, RegistryApi, SchemaRequest,
    SchemaVersion,
};

pub(crate) fn http_error(status: u16, body: &str) -> Error {
    Error::Http {
        status,
        body: body.to_string(),
    }
}

/// Fake Kafka Connect worker.
///
/// Every call is appended to `calls` as `"<op> <name>"`.
#[derive(Default)]
pub(crate) struct FakeConnect {
    pub names: Vec<String>,
    pub configs: HashMap<String, BTreeMap<String, String>>,
    pub statuses: HashMap<String, ConnectorStatus>,
    pub fail_list: bool,
    /// `"<op> <name>"` keys that answer with a 500
    pub failing: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
    pub updates: Mutex<Vec<(String, BTreeMap<String, String>)>>,
}

impl FakeConnect {
    pub fn with_names(names: &[&str]) -> Self {
        let mut fake = Self::default();
        for name in names {
            fake.names.push(name.to_string());
            fake.configs.insert(
                name.to_string(),
                BTreeMap::from([("tasks.max".to_string(), "1".to_string())]),
            );
            fake.statuses.insert(
                name.to_string(),
                status(name, ConnectorState::Running, &[]),
            );
        }
        fake
    }

    pub fn fail(mut self, call: &str) -> Self {
        self.failing.insert(call.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        let failed = self.failing.contains(&call);
        self.calls.lock().unwrap().push(call.clone());
        if failed {
            return Err(http_error(500, &format!("{{\"message\":\"{} failed\"}}", call)));
        }
        Ok(())
    }

    fn not_found(name: &str) -> Error {
        http_error(404, &format!("{{\"message\":\"Connector {} not found\"}}", name))
    }
}

pub(crate) fn status(name: &str, state: ConnectorState, tasks: &[ConnectorState]) -> ConnectorStatus {
    ConnectorStatus {
        name: name.to_string(),
        connector: WorkerState {
            state,
            worker_id: "worker-1:8083".to_string(),
        },
        tasks: tasks
            .iter()
            .enumerate()
            .map(|(id, state)| TaskStatus {
                id: id as u32,
                state: state.clone(),
                worker_id: "worker-1:8083".to_string(),
                trace: None,
            })
            .collect(),
        kind: Some("sink".to_string()),
    }
}

#[async_trait]
impl ConnectApi for FakeConnect {
    async fn list(&self) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push("list".to_string());
        if self.fail_list {
            return Err(http_error(500, "worker unavailable"));
        }
        Ok(self.names.clone())
    }

    async fn status(&self, name: &str) -> Result<ConnectorStatus> {
        self.record(format!("status {}", name))?;
        self.statuses
            .get(name)
            .cloned()
            .ok_or_else(|| Self::not_found(name))
    }

    async fn config(&self, name: &str) -> Result<ConnectorInfo> {
        self.record(format!("config {}", name))?;
        let config = self.configs.get(name).ok_or_else(|| Self::not_found(name))?;
        Ok(ConnectorInfo {
            name: name.to_string(),
            config: config.clone(),
            tasks: Vec::new(),
            kind: None,
        })
    }

    async fn tasks(&self, name: &str) -> Result<Vec<TaskInfo>> {
        self.record(format!("tasks {}", name))?;
        Ok(Vec::new())
    }

    async fn create(&self, config: &ConnectorConfig) -> Result<ConnectorInfo> {
        self.record(format!("create {}", config.name))?;
        Ok(ConnectorInfo {
            name: config.name.clone(),
            config: config.config.clone(),
            tasks: Vec::new(),
            kind: None,
        })
    }

    async fn update(
        &self,
        name: &str,
        config: &BTreeMap<String, String>,
    ) -> Result<ConnectorInfo> {
        self.record(format!("update {}", name))?;
        self.updates
            .lock()
            .unwrap()
            .push((name.to_string(), config.clone()));
        Ok(ConnectorInfo {
            name: name.to_string(),
            config: config.clone(),
            tasks: Vec::new(),
            kind: None,
        })
    }

    async fn delete(&self, name: &str) -> Result<()> {
        self.record(format!("delete {}", name))
    }

    async fn pause(&self, name: &str) -> Result<()> {
        self.record(format!("pause {}", name))
    }

    async fn resume(&self, name: &str) -> Result<()> {
        self.record(format!("resume {}", name))
    }

    async fn restart_task(&self, name: &str, task: u32) -> Result<()> {
        self.record(format!("restart {}/{}", name, task))
    }

    async fn plugins(&self) -> Result<Vec<PluginInfo>> {
        Ok(Vec::new())
    }

    async fn version(&self) -> Result<WorkerInfo> {
        Ok(WorkerInfo {
            version: "3.7.0".to_string(),
            commit: "abc".to_string(),
            kafka_cluster_id: None,
        })
    }
}

/// Fake schema registry holding per-subject compatibility levels
pub(crate) struct FakeRegistry {
    pub global: CompatibilityLevel,
    pub levels: Mutex<HashMap<String, CompatibilityLevel>>,
    pub fail_register: bool,
    pub fail_set: bool,
    pub fail_get: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self {
            global: CompatibilityLevel::Backward,
            levels: Mutex::new(HashMap::new()),
            fail_register: false,
            fail_set: false,
            fail_get: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_level(self, subject: &str, level: CompatibilityLevel) -> Self {
        self.levels
            .lock()
            .unwrap()
            .insert(subject.to_string(), level);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RegistryApi for FakeRegistry {
    async fn subjects(&self) -> Result<Vec<String>> {
        Ok(self.levels.lock().unwrap().keys().cloned().collect())
    }

    async fn versions(&self, _subject: &str) -> Result<Vec<u32>> {
        Ok(vec![1])
    }

    async fn schema_version(&self, subject: &str, version: &str) -> Result<SchemaVersion> {
        Ok(SchemaVersion {
            subject: subject.to_string(),
            version: version.parse().unwrap_or(1),
            id: 1,
            schema: "\"string\"".to_string(),
            schema_type: None,
        })
    }

    async fn register(&self, subject: &str, _schema: &SchemaRequest) -> Result<RegisteredSchema> {
        self.record(format!("register {}", subject));
        if self.fail_register {
            return Err(http_error(409, "{\"error_code\":409,\"message\":\"incompatible\"}"));
        }
        Ok(RegisteredSchema { id: 42 })
    }

    async fn lookup(&self, subject: &str, _schema: &SchemaRequest) -> Result<SchemaVersion> {
        self.schema_version(subject, "1").await
    }

    async fn global_compatibility(&self) -> Result<CompatibilityLevel> {
        self.record("get-global-compat".to_string());
        Ok(self.global.clone())
    }

    async fn subject_compatibility(&self, subject: &str) -> Result<CompatibilityLevel> {
        self.record(format!("get-compat {}", subject));
        if self.fail_get {
            return Err(http_error(500, "store unavailable"));
        }
        self.levels
            .lock()
            .unwrap()
            .get(subject)
            .cloned()
            .ok_or_else(|| {
                http_error(
                    404,
                    "{\"error_code\":40408,\"message\":\"Subject does not have subject-level compatibility configured\"}",
                )
            })
    }

    async fn set_compatibility(
        &self,
        subject: &str,
        level: &CompatibilityLevel,
    ) -> Result<CompatibilityLevel> {
        self.record(format!("set-compat {} {}", subject, level));
        if self.fail_set {
            return Err(http_error(500, "store unavailable"));
        }
        self.levels
            .lock()
            .unwrap()
            .insert(subject.to_string(), level.clone());
        Ok(level.clone())
    }

    async fn test_compatibility(
        &self,
        _subject: &str,
        _version: &str,
        _schema: &SchemaRequest,
    ) -> Result<CompatibilityCheck> {
        Ok(CompatibilityCheck {
            is_compatible: true,
            messages: Vec::new(),
        })
    }
}
