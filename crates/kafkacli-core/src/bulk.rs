//! Bulk operations across matched connectors
//!
//! Operations run one connector at a time, never concurrently. What happens
//! after a failure is chosen per call site with [`ErrorPolicy`]:
//!
//! | Command                                   | Policy            |
//! |-------------------------------------------|-------------------|
//! | config, status, tasks, delete, pause, resume, restart-failed | continue-on-error |
//! | delete-all                                | fail-fast         |

use serde::Serialize;

use crate::connect::{ConnectApi, ConnectorConfig, ConnectorInfo, ConnectorStatus, TaskInfo};
use crate::error::{Error, Result};

/// What to do with the rest of the batch after one operation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Record the error and move on to the next connector
    ContinueOnError,
    /// Record the error and skip every remaining connector
    FailFast,
}

/// Operation applied to each matched connector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOp {
    /// Fetch the configuration
    Config,
    /// Fetch the status
    Status,
    /// Fetch the task configurations
    Tasks,
    /// Dump the configuration, then delete
    Delete,
    /// Pause the connector
    Pause,
    /// Resume the connector
    Resume,
    /// Restart every task in FAILED state
    RestartFailed,
}

impl BulkOp {
    /// Command name, as typed on the command line
    pub fn name(self) -> &'static str {
        match self {
            BulkOp::Config => "config",
            BulkOp::Status => "status",
            BulkOp::Tasks => "tasks",
            BulkOp::Delete => "delete",
            BulkOp::Pause => "pause",
            BulkOp::Resume => "resume",
            BulkOp::RestartFailed => "restart-failed",
        }
    }
}

/// A task restart that failed and was not retried
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRestart {
    /// Task id
    pub task: u32,
    /// Error reported by the worker
    pub error: String,
}

/// Successful outcome of one operation
#[derive(Debug, Clone, PartialEq)]
pub enum OpOutput {
    /// Current configuration
    Config(ConnectorInfo),
    /// Current status
    Status(ConnectorStatus),
    /// Task configurations
    Tasks(Vec<TaskInfo>),
    /// Connector deleted
    Deleted {
        /// Configuration captured just before the delete, if it could be read
        backup: Option<ConnectorConfig>,
    },
    /// Connector paused
    Paused,
    /// Connector resumed
    Resumed,
    /// Failed tasks restarted
    Restarted {
        /// Tasks restarted successfully
        restarted: Vec<u32>,
        /// Restarts the worker refused; not fatal for the connector
        skipped: Vec<SkippedRestart>,
    },
}

/// One connector and what happened to it
#[derive(Debug)]
pub struct BatchEntry {
    /// Connector name
    pub name: String,
    /// Outcome of the operation
    pub outcome: Result<OpOutput>,
}

/// Ordered outcomes of a bulk operation
#[derive(Debug, Default)]
pub struct BatchResult {
    /// One entry per attempted connector, in the order attempted
    pub entries: Vec<BatchEntry>,
}

impl BatchResult {
    /// Number of attempted connectors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was attempted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every attempted operation succeeded
    pub fn is_success(&self) -> bool {
        self.entries.iter().all(|e| e.outcome.is_ok())
    }

    /// Entries that failed
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            Ok(_) => None,
            Err(err) => Some((e.name.as_str(), err)),
        })
    }

    /// Entries that succeeded
    pub fn successes(&self) -> impl Iterator<Item = (&str, &OpOutput)> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            Ok(out) => Some((e.name.as_str(), out)),
            Err(_) => None,
        })
    }
}

/// Apply `op` to each name in order, following `policy` on failure
pub async fn for_each_match<A>(
    api: &A,
    names: &[String],
    op: BulkOp,
    policy: ErrorPolicy,
) -> BatchResult
where
    A: ConnectApi + ?Sized,
{
    let mut result = BatchResult::default();
    for name in names {
        let outcome = apply(api, name, op).await;
        let failed = outcome.is_err();

        match &outcome {
            Ok(_) => report_success(name, op),
            Err(e) => tracing::error!("Failed to {} connector {}: {}", op.name(), name, e),
        }

        result.entries.push(BatchEntry {
            name: name.clone(),
            outcome,
        });

        if failed && policy == ErrorPolicy::FailFast {
            let remaining = names.len() - result.len();
            if remaining > 0 {
                tracing::warn!("Stopping after first failure, {} connector(s) not processed", remaining);
            }
            break;
        }
    }
    result
}

/// Delete every connector on the worker, stopping at the first failure.
///
/// The list call itself must succeed; its error is returned as is.
pub async fn delete_all<A>(api: &A) -> Result<BatchResult>
where
    A: ConnectApi + ?Sized,
{
    let names = api.list().await?;
    Ok(for_each_match(api, &names, BulkOp::Delete, ErrorPolicy::FailFast).await)
}

fn report_success(name: &str, op: BulkOp) {
    match op {
        BulkOp::Delete => tracing::info!("Successfully deleted connector {}", name),
        BulkOp::Pause => tracing::info!("Successfully paused connector {}", name),
        BulkOp::Resume => tracing::info!("Successfully resumed connector {}", name),
        _ => {}
    }
}

/// Run one operation against one connector
pub async fn apply<A>(api: &A, name: &str, op: BulkOp) -> Result<OpOutput>
where
    A: ConnectApi + ?Sized,
{
    match op {
        BulkOp::Config => api.config(name).await.map(OpOutput::Config),
        BulkOp::Status => api.status(name).await.map(OpOutput::Status),
        BulkOp::Tasks => api.tasks(name).await.map(OpOutput::Tasks),
        BulkOp::Delete => delete_with_backup(api, name).await,
        BulkOp::Pause => api.pause(name).await.map(|_| OpOutput::Paused),
        BulkOp::Resume => api.resume(name).await.map(|_| OpOutput::Resumed),
        BulkOp::RestartFailed => restart_failed(api, name).await,
    }
}

/// Log the current configuration so the connector can be recreated, then
/// delete it. The configuration read is best effort.
async fn delete_with_backup<A>(api: &A, name: &str) -> Result<OpOutput>
where
    A: ConnectApi + ?Sized,
{
    let backup = match api.config(name).await {
        Ok(info) => {
            let config = info.to_config();
            let dump = serde_json::to_string_pretty(&config)?;
            tracing::info!("Current configuration for connector {}:\n{}", name, dump);
            tracing::info!("Save this to use as the `--config-json` option to restore the connector");
            Some(config)
        }
        Err(e) => {
            tracing::warn!("Could not read configuration of {} before delete: {}", name, e);
            None
        }
    };

    api.delete(name).await?;
    Ok(OpOutput::Deleted { backup })
}

/// Restart the FAILED tasks of a connector. A refused restart is logged and
/// recorded in `skipped`; it doesn't fail the connector.
async fn restart_failed<A>(api: &A, name: &str) -> Result<OpOutput>
where
    A: ConnectApi + ?Sized,
{
    let status = api.status(name).await?;
    let mut restarted = Vec::new();
    let mut skipped = Vec::new();

    for task in status.failed_tasks() {
        match api.restart_task(&status.name, task).await {
            Ok(()) => restarted.push(task),
            Err(e) => {
                tracing::warn!("Restart of task {} for {} was refused: {}", task, name, e);
                skipped.push(SkippedRestart {
                    task,
                    error: e.to_string(),
                });
            }
        }
    }

    if restarted.is_empty() && skipped.is_empty() {
        tracing::info!("No failed tasks for connector {}", name);
    }
    Ok(OpOutput::Restarted { restarted, skipped })
}
