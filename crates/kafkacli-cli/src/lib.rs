//! kafkacli command line tools
//!
//! Shared driver for `kafka-connect-cli` and `schema-registry-cli`. Each
//! binary is a [`Tool`]; [`run`] parses arguments, sets up logging,
//! resolves the endpoint, executes, and maps the outcome to an exit code.

use clap::Parser;
use std::ffi::OsString;
use std::future::Future;
use std::process::ExitCode;

use kafkacli_core::{Endpoint, Service};

pub mod args;
pub mod commands;
pub mod logging;
pub mod output;

use args::CommonArgs;
use output::CommandOutput;

/// A command line front end for one service
pub trait Tool: Parser {
    /// Service whose host and port settings apply
    const SERVICE: Service;

    /// Flags shared by every subcommand
    fn common(&self) -> &CommonArgs;

    /// Run the parsed command against `endpoint`
    fn execute(self, endpoint: Endpoint) -> impl Future<Output = anyhow::Result<CommandOutput>>;
}

/// Parse `argv`, execute and report. Returns exit status 1 on usage errors,
/// local failures and remote error responses.
pub async fn run<T: Tool>(argv: Vec<OsString>) -> ExitCode {
    let cli = match T::try_parse_from(args::normalize(argv)) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version come through here too
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let common = cli.common().clone();
    logging::init(common.verbose);

    let endpoint = match common.endpoint(T::SERVICE) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("Using {}", endpoint.base_url());

    match cli.execute(endpoint).await {
        Ok(output) => {
            if let Some(text) = output::render(&output, common.pretty) {
                println!("{}", text);
            }
            output.exit_code()
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            eprintln!("\nFor more information, try '--help'.");
            ExitCode::FAILURE
        }
    }
}
