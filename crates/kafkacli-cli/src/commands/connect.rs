//! `kafka-connect-cli` commands

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use kafkacli_core::connect::ConfigSource;
use kafkacli_core::{
    BulkOp, ConnectApi, ConnectClient, Endpoint, ErrorPolicy, Matcher, Service, bulk, matcher,
    scale,
};

use crate::Tool;
use crate::args::CommonArgs;
use crate::output::{self, CommandOutput};

/// Command line interface for the Kafka Connect REST API
#[derive(Parser, Debug)]
#[command(name = "kafka-connect-cli")]
#[command(version, about, long_about = None)]
pub struct ConnectCli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: ConnectCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConnectCommand {
    /// List active connectors
    List {
        /// Only connectors where the connector or a task is in this state
        /// (RUNNING, FAILED, PAUSED, UNASSIGNED)
        #[arg(long, value_name = "STATE")]
        with_state: Option<String>,
    },

    /// Show the status of matching connectors
    Status(ConnectorArgs),

    /// Show the configuration of matching connectors
    Config(ConnectorArgs),

    /// Show the task configurations of matching connectors
    Tasks(ConnectorArgs),

    /// Create a connector
    Create {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Replace the configuration of a connector
    Update {
        #[command(flatten)]
        connector: ConnectorArgs,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Delete matching connectors, printing each configuration first
    Delete(ConnectorArgs),

    /// Delete every connector, stopping at the first failure
    DeleteAll,

    /// Pause matching connectors
    Pause(ConnectorArgs),

    /// Resume matching connectors
    Resume(ConnectorArgs),

    /// Restart failed tasks of matching connectors
    RestartFailed(ConnectorArgs),

    /// Change the task count of a connector
    Scale {
        #[command(flatten)]
        connector: ConnectorArgs,

        /// New value of tasks.max
        #[arg(long, allow_negative_numbers = true)]
        tasks_max: i64,
    },

    /// List installed connector plugins
    Plugins,

    /// Show the worker version
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct ConnectorArgs {
    /// Connector name; a regular expression for commands that accept several
    #[arg(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub connector: String,
}

/// Where the connector configuration comes from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ConfigArgs {
    /// Configuration as JSON: {"name": "...", "config": {...}}
    #[arg(long, value_name = "JSON")]
    pub config: Option<String>,

    /// JSON file with the same shape as --config
    #[arg(long, alias = "config.json", value_name = "FILE")]
    pub config_json: Option<PathBuf>,

    /// Properties file; the `name` key is the connector name
    #[arg(long, alias = "config.props", value_name = "FILE")]
    pub config_props: Option<PathBuf>,
}

impl ConfigArgs {
    fn to_source(&self) -> Result<ConfigSource> {
        if let Some(json) = &self.config {
            Ok(ConfigSource::Inline(json.clone()))
        } else if let Some(path) = &self.config_json {
            Ok(ConfigSource::JsonFile(path.clone()))
        } else if let Some(path) = &self.config_props {
            Ok(ConfigSource::PropsFile(path.clone()))
        } else {
            bail!("one of --config, --config-json or --config-props is required")
        }
    }
}

impl Tool for ConnectCli {
    const SERVICE: Service = Service::Connect;

    fn common(&self) -> &CommonArgs {
        &self.common
    }

    async fn execute(self, endpoint: Endpoint) -> Result<CommandOutput> {
        let client = ConnectClient::new(&endpoint)?;
        execute(self.command, &client).await
    }
}

/// Run one command against `api`
pub async fn execute<A>(command: ConnectCommand, api: &A) -> Result<CommandOutput>
where
    A: ConnectApi + ?Sized,
{
    match command {
        ConnectCommand::List { with_state } => {
            output::from_result(matcher::list_connectors(api, with_state.as_deref()).await)
        }
        ConnectCommand::Status(args) => per_match(api, &args.connector, BulkOp::Status).await,
        ConnectCommand::Config(args) => per_match(api, &args.connector, BulkOp::Config).await,
        ConnectCommand::Tasks(args) => per_match(api, &args.connector, BulkOp::Tasks).await,
        ConnectCommand::Create { config } => {
            let config = config.to_source()?.load()?;
            output::from_result(api.create(&config).await)
        }
        ConnectCommand::Update { connector, config } => {
            let config = config.to_source()?.load_for(&connector.connector)?;
            output::from_result(api.update(&config.name, &config.config).await)
        }
        ConnectCommand::Delete(args) => per_match(api, &args.connector, BulkOp::Delete).await,
        ConnectCommand::DeleteAll => match bulk::delete_all(api).await {
            Ok(result) => output::batch(&result),
            Err(e) => output::failure(e),
        },
        ConnectCommand::Pause(args) => per_match(api, &args.connector, BulkOp::Pause).await,
        ConnectCommand::Resume(args) => per_match(api, &args.connector, BulkOp::Resume).await,
        ConnectCommand::RestartFailed(args) => {
            per_match(api, &args.connector, BulkOp::RestartFailed).await
        }
        ConnectCommand::Scale {
            connector,
            tasks_max,
        } => output::from_result(scale::scale(api, &connector.connector, tasks_max).await),
        ConnectCommand::Plugins => output::from_result(api.plugins().await),
        ConnectCommand::Version => output::from_result(api.version().await),
    }
}

/// Apply `op` to every connector whose name matches `pattern`
async fn per_match<A>(api: &A, pattern: &str, op: BulkOp) -> Result<CommandOutput>
where
    A: ConnectApi + ?Sized,
{
    let matcher = Matcher::name(pattern)?;
    let names = match matcher.find_matching(api).await {
        Ok(names) => names,
        Err(e) => return output::failure(e),
    };

    if names.is_empty() {
        tracing::warn!("No matching connector found for '{}'", pattern);
        return Ok(CommandOutput::Empty);
    }
    tracing::debug!("{} matched {} connector(s)", pattern, names.len());

    let result = bulk::for_each_match(api, &names, op, ErrorPolicy::ContinueOnError).await;
    output::batch(&result)
}
