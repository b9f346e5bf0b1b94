//! Endpoint resolution and properties files
//!
//! The host and port of a service are resolved in this order:
//!
//! 1. Explicit command line value
//! 2. Environment variable (e.g. `KAFKA_CONNECT_HOST`)
//! 3. `~/.kafkacli/hosts` properties file, keyed by the lower-cased variable name
//! 4. Built-in default
//!
//! # Properties Files
//!
//! Simple `key=value` lines. Blank lines and lines starting with `#` are skipped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Default request timeout for every REST call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Directory (relative to the home directory) holding user-level settings
pub const USER_CONFIG_DIR: &str = ".kafkacli";

/// Remote service a client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Kafka Connect REST interface
    Connect,
    /// Confluent Schema Registry
    SchemaRegistry,
}

impl Service {
    /// Environment variable naming the service host
    pub fn host_var(self) -> &'static str {
        match self {
            Service::Connect => "KAFKA_CONNECT_HOST",
            Service::SchemaRegistry => "SCHEMA_REGISTRY_HOST",
        }
    }

    /// Environment variable naming the service port
    pub fn port_var(self) -> &'static str {
        match self {
            Service::Connect => "KAFKA_CONNECT_PORT",
            Service::SchemaRegistry => "SCHEMA_REGISTRY_PORT",
        }
    }

    /// Port used when nothing else is configured
    pub fn default_port(self) -> u16 {
        match self {
            Service::Connect => 8083,
            Service::SchemaRegistry => 8081,
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

/// Address and timeout of a REST service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host name or address
    pub host: String,

    /// TCP port
    pub port: u16,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Endpoint {
    /// Create an endpoint with the default timeout
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash, e.g. `http://localhost:8083`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Resolve an endpoint for `service`, filling whatever the caller left
    /// unset from the process environment and `~/.kafkacli/hosts`.
    ///
    /// A missing or unreadable hosts file is not an error.
    pub fn resolve(service: Service, host: Option<String>, port: Option<u16>) -> Result<Self> {
        let vars = LocalVars::load(user_hosts_file().as_deref());
        Self::resolve_with(service, host, port, &vars, |key| std::env::var(key).ok())
    }

    /// Same as [`Endpoint::resolve`] with an explicit hosts map and environment
    pub fn resolve_with<F>(
        service: Service,
        host: Option<String>,
        port: Option<u16>,
        vars: &LocalVars,
        env: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match host {
            Some(h) => h,
            None => vars
                .get(service.host_var(), &env)
                .unwrap_or_else(default_host),
        };

        let port = match port {
            Some(p) => p,
            None => match vars.get(service.port_var(), &env) {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    Error::validation(format!(
                        "invalid port '{}' for {}",
                        raw,
                        service.port_var()
                    ))
                })?,
                None => service.default_port(),
            },
        };

        Ok(Self::new(host, port))
    }
}

/// Key/value pairs from the user hosts file
#[derive(Debug, Clone, Default)]
pub struct LocalVars {
    props: BTreeMap<String, String>,
}

impl LocalVars {
    /// Load the hosts file at `path`; any failure yields an empty set
    pub fn load(path: Option<&Path>) -> Self {
        let props = match path {
            Some(p) if p.exists() => match read_props(p) {
                Ok(props) => props,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable hosts file {}: {}", p.display(), e);
                    BTreeMap::new()
                }
            },
            _ => BTreeMap::new(),
        };
        Self { props }
    }

    /// Wrap an already parsed map
    pub fn from_map(props: BTreeMap<String, String>) -> Self {
        Self { props }
    }

    /// Look `key` up in the environment first, then in the file under its
    /// lower-cased name. Empty environment values count as unset.
    pub fn get<F>(&self, key: &str, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        env(key)
            .filter(|v| !v.is_empty())
            .or_else(|| self.props.get(&key.to_lowercase()).cloned())
    }
}

/// Path of `~/.kafkacli/hosts`, if a home directory can be found
pub fn user_hosts_file() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(USER_CONFIG_DIR).join("hosts"))
}

/// Read a properties file into a map
pub fn read_props<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_props(&contents))
}

/// Parse `key=value` lines. The value is everything after the first `=`.
pub fn parse_props(contents: &str) -> BTreeMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match line.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (line.to_string(), String::new()),
        })
        .collect()
}
