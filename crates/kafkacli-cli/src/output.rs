//! Command results and how they are printed
//!
//! Every command ends in a [`CommandOutput`]. [`render`] is the only place
//! that turns one into text; the variant decides both the rendering and
//! the exit code.

use anyhow::Result;
use serde::Serialize;
use serde_json::{Value, json};
use std::process::ExitCode;

use kafkacli_core::{BatchResult, Error, OpOutput};

/// Outcome of a command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// JSON payload returned by the service
    Success(Value),
    /// Error text returned by the service, printed verbatim
    Failure(String),
    /// Per-connector report of a bulk operation
    Batch {
        /// JSON array of entries
        report: Value,
        /// True when at least one entry failed
        failed: bool,
    },
    /// Nothing to print
    Empty,
}

impl CommandOutput {
    /// Serialize a payload into a success
    pub fn success<T: Serialize>(payload: &T) -> Result<Self> {
        Ok(CommandOutput::Success(serde_json::to_value(payload)?))
    }

    /// True for outcomes that exit with status 1
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            CommandOutput::Failure(_) | CommandOutput::Batch { failed: true, .. }
        )
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> ExitCode {
        if self.is_failure() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Errors detected locally, before or instead of a remote call
fn is_local(err: &Error) -> bool {
    matches!(
        err,
        Error::Validation { .. } | Error::Pattern { .. } | Error::ConfigSource { .. } | Error::Io(_)
    )
}

/// Map a client result: remote errors become a printed [`CommandOutput::Failure`],
/// local errors are returned to abort with a usage message.
pub fn from_result<T: Serialize>(result: kafkacli_core::Result<T>) -> Result<CommandOutput> {
    match result {
        Ok(payload) => CommandOutput::success(&payload),
        Err(e) => failure(e),
    }
}

/// Map a client error the same way as [`from_result`]
pub fn failure(err: Error) -> Result<CommandOutput> {
    if is_local(&err) {
        return Err(err.into());
    }
    Ok(CommandOutput::Failure(err.to_string()))
}

/// JSON payload describing one successful operation
pub fn payload(output: &OpOutput) -> Result<Value> {
    Ok(match output {
        OpOutput::Config(info) => serde_json::to_value(info)?,
        OpOutput::Status(status) => serde_json::to_value(status)?,
        OpOutput::Tasks(tasks) => serde_json::to_value(tasks)?,
        OpOutput::Deleted { backup } => json!({ "deleted": true, "backup": backup }),
        OpOutput::Paused => json!({ "paused": true }),
        OpOutput::Resumed => json!({ "resumed": true }),
        OpOutput::Restarted { restarted, skipped } => {
            json!({ "restarted": restarted, "skipped": skipped })
        }
    })
}

/// Turn a batch into output.
///
/// A single entry is shown unwrapped: its payload, or its raw error body.
pub fn batch(result: &BatchResult) -> Result<CommandOutput> {
    if let [entry] = result.entries.as_slice() {
        return match &entry.outcome {
            Ok(out) => Ok(CommandOutput::Success(payload(out)?)),
            Err(e) => Ok(CommandOutput::Failure(e.to_string())),
        };
    }
    if result.is_empty() {
        return Ok(CommandOutput::Empty);
    }

    let mut report = Vec::with_capacity(result.len());
    for entry in &result.entries {
        report.push(match &entry.outcome {
            Ok(out) => json!({
                "connector": entry.name,
                "status": "ok",
                "result": payload(out)?,
            }),
            Err(e) => json!({
                "connector": entry.name,
                "status": "error",
                "error": e.to_string(),
            }),
        });
    }

    Ok(CommandOutput::Batch {
        report: Value::Array(report),
        failed: !result.is_success(),
    })
}

/// Text to print on stdout, if any
pub fn render(output: &CommandOutput, pretty: bool) -> Option<String> {
    match output {
        CommandOutput::Success(value) | CommandOutput::Batch { report: value, .. } => {
            Some(to_json(value, pretty))
        }
        CommandOutput::Failure(text) => Some(render_text(text, pretty)),
        CommandOutput::Empty => None,
    }
}

/// Error bodies are usually JSON; re-indent them when asked, otherwise
/// print them exactly as received.
fn render_text(text: &str, pretty: bool) -> String {
    if pretty && let Ok(value) = serde_json::from_str::<Value>(text) {
        return to_json(&value, true);
    }
    text.to_string()
}

fn to_json(value: &Value, pretty: bool) -> String {
    if !pretty {
        return value.to_string();
    }
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => value.to_string(),
    }
}
