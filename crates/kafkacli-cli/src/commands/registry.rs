//! `schema-registry-cli` commands

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use kafkacli_core::registry::{
    CompatibilityConfig, CompatibilityLevel, CompatibilityUpdate, LATEST, SchemaRequest,
    register_with_forced_compatibility,
};
use kafkacli_core::{Endpoint, RegistryApi, RegistryClient, Service};

use crate::Tool;
use crate::args::CommonArgs;
use crate::output::{self, CommandOutput};

/// Command line interface for the Confluent Schema Registry
#[derive(Parser, Debug)]
#[command(name = "schema-registry-cli")]
#[command(version, about, long_about = None)]
pub struct RegistryCli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: RegistryCommand,
}

#[derive(Subcommand, Debug)]
pub enum RegistryCommand {
    /// List registered subjects
    Subjects,

    /// List the versions of a subject
    Versions(SubjectArgs),

    /// Show one version of a subject's schema
    Schema {
        #[command(flatten)]
        subject: SubjectArgs,

        /// Version number or "latest"
        #[arg(long, default_value = LATEST, value_parser = parse_version)]
        version: String,
    },

    /// Register a new schema version
    Register {
        #[command(flatten)]
        subject: SubjectArgs,

        #[command(flatten)]
        schema: SchemaArgs,

        /// Set the subject's compatibility to NONE while registering,
        /// then restore it
        #[arg(long)]
        force: bool,
    },

    /// Check whether a schema is already registered under a subject
    Exists {
        #[command(flatten)]
        subject: SubjectArgs,

        #[command(flatten)]
        schema: SchemaArgs,
    },

    /// Show the global compatibility level
    GlobalCompatibility,

    /// Show the compatibility level of a subject
    Compatibility(SubjectArgs),

    /// Change the compatibility level of a subject
    SetCompatibility {
        #[command(flatten)]
        subject: SubjectArgs,

        /// NONE, BACKWARD, FORWARD, FULL or a *_TRANSITIVE variant
        #[arg(long)]
        level: CompatibilityLevel,
    },

    /// Test a schema against a version of a subject
    TestCompatibility {
        #[command(flatten)]
        subject: SubjectArgs,

        #[command(flatten)]
        schema: SchemaArgs,

        /// Version number or "latest"
        #[arg(long, default_value = LATEST, value_parser = parse_version)]
        version: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SubjectArgs {
    /// Subject name
    #[arg(long)]
    pub subject: String,
}

/// Schema text, inline or from a file
#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Schema definition
    #[arg(long, required_unless_present = "schema_file", conflicts_with = "schema_file")]
    pub schema: Option<String>,

    /// File holding the schema definition
    #[arg(long, value_name = "FILE")]
    pub schema_file: Option<PathBuf>,

    /// AVRO (registry default), JSON or PROTOBUF
    #[arg(long, value_name = "TYPE")]
    pub schema_type: Option<String>,
}

impl SchemaArgs {
    fn load(&self) -> Result<SchemaRequest> {
        let schema = match (&self.schema, &self.schema_file) {
            (Some(schema), _) => schema.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read schema file {}", path.display()))?,
            (None, None) => bail!("one of --schema or --schema-file is required"),
        };
        Ok(SchemaRequest::new(schema).with_type(self.schema_type.clone()))
    }
}

fn parse_version(raw: &str) -> std::result::Result<String, String> {
    if raw.eq_ignore_ascii_case(LATEST) {
        return Ok(LATEST.to_string());
    }
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n.to_string()),
        _ => Err(format!("expected a positive version number or '{}'", LATEST)),
    }
}

impl Tool for RegistryCli {
    const SERVICE: Service = Service::SchemaRegistry;

    fn common(&self) -> &CommonArgs {
        &self.common
    }

    async fn execute(self, endpoint: Endpoint) -> Result<CommandOutput> {
        let client = RegistryClient::new(&endpoint)?;
        execute(self.command, &client).await
    }
}

/// Run one command against `api`
pub async fn execute<A>(command: RegistryCommand, api: &A) -> Result<CommandOutput>
where
    A: RegistryApi + ?Sized,
{
    match command {
        RegistryCommand::Subjects => output::from_result(api.subjects().await),
        RegistryCommand::Versions(args) => output::from_result(api.versions(&args.subject).await),
        RegistryCommand::Schema { subject, version } => {
            output::from_result(api.schema_version(&subject.subject, &version).await)
        }
        RegistryCommand::Register {
            subject,
            schema,
            force,
        } => {
            let schema = schema.load()?;
            output::from_result(
                register_with_forced_compatibility(api, &subject.subject, &schema, force).await,
            )
        }
        RegistryCommand::Exists { subject, schema } => {
            let schema = schema.load()?;
            output::from_result(api.lookup(&subject.subject, &schema).await)
        }
        RegistryCommand::GlobalCompatibility => output::from_result(
            api.global_compatibility()
                .await
                .map(|level| CompatibilityConfig { level }),
        ),
        RegistryCommand::Compatibility(args) => output::from_result(
            api.subject_compatibility(&args.subject)
                .await
                .map(|level| CompatibilityConfig { level }),
        ),
        RegistryCommand::SetCompatibility { subject, level } => output::from_result(
            api.set_compatibility(&subject.subject, &level)
                .await
                .map(|compatibility| CompatibilityUpdate { compatibility }),
        ),
        RegistryCommand::TestCompatibility {
            subject,
            schema,
            version,
        } => {
            let schema = schema.load()?;
            output::from_result(
                api.test_compatibility(&subject.subject, &version, &schema)
                    .await,
            )
        }
    }
}
