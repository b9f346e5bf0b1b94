//! Kafka Connect CLI

use std::process::ExitCode;

use kafkacli_cli::commands::connect::ConnectCli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    kafkacli_cli::run::<ConnectCli>(std::env::args_os().collect()).await
}
