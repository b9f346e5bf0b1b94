//! Schema Registry CLI

use std::process::ExitCode;

use kafkacli_cli::commands::registry::RegistryCli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    kafkacli_cli::run::<RegistryCli>(std::env::args_os().collect()).await
}
