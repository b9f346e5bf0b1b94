//! Arguments shared by both tools

use clap::Args;
use std::ffi::OsString;
use std::time::Duration;

use kafkacli_core::{Endpoint, Service};

/// Connection and output flags accepted by every command
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Service host address [env: KAFKA_CONNECT_HOST / SCHEMA_REGISTRY_HOST]
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Service port [env: KAFKA_CONNECT_PORT / SCHEMA_REGISTRY_PORT]
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Pretty print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        default_value_t = 30,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Resolve the endpoint of `service` from flags, environment and `~/.kafkacli/hosts`
    pub fn endpoint(&self, service: Service) -> kafkacli_core::Result<Endpoint> {
        Ok(Endpoint::resolve(service, self.host.clone(), self.port)?
            .with_timeout(Duration::from_secs(self.timeout)))
    }
}

/// Rewrite Go-style single-dash long flags (`-pretty`, `-connector=x`) into
/// their double-dash form. Short flags, negative numbers and everything
/// after a bare `--` are left alone.
pub fn normalize<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    arg
                }
                Some(s) if is_single_dash_long(s) => OsString::from(format!("-{}", s)),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long(s: &str) -> bool {
    let Some(rest) = s.strip_prefix('-') else {
        return false;
    };
    let name = rest.split('=').next().unwrap_or_default();
    !rest.starts_with('-')
        && name.len() >= 2
        && name.starts_with(|c: char| c.is_ascii_alphabetic())
}
