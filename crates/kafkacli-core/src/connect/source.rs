//! Where a connector configuration is read from
//!
//! - inline JSON: `{"name": "...", "config": {...}}`
//! - a JSON file with the same shape
//! - a properties file; the `name` key becomes the connector name

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::types::ConnectorConfig;
use crate::config::read_props;
use crate::error::{Error, Result};

/// Key of the connector name inside a properties file
const NAME_KEY: &str = "name";

/// Origin of a connector configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// JSON passed directly on the command line
    Inline(String),
    /// Path to a JSON file
    JsonFile(PathBuf),
    /// Path to a properties file
    PropsFile(PathBuf),
}

impl ConfigSource {
    fn origin(&self) -> String {
        match self {
            ConfigSource::Inline(_) => "inline JSON".to_string(),
            ConfigSource::JsonFile(p) | ConfigSource::PropsFile(p) => p.display().to_string(),
        }
    }

    fn invalid(&self, message: impl Into<String>) -> Error {
        Error::ConfigSource {
            origin: self.origin(),
            message: message.into(),
        }
    }

    /// Load a configuration for a new connector; the name must be present
    pub fn load(&self) -> Result<ConnectorConfig> {
        let config = self.read(None)?;
        if config.name.is_empty() {
            return Err(self.invalid("missing required configuration field 'name'"));
        }
        Ok(config)
    }

    /// Load a configuration for the existing connector `name`.
    ///
    /// The name given here wins over any name in the source.
    pub fn load_for(&self, name: &str) -> Result<ConnectorConfig> {
        let mut config = self.read(Some(name))?;
        config.name = name.to_string();
        Ok(config)
    }

    fn read(&self, fallback_name: Option<&str>) -> Result<ConnectorConfig> {
        match self {
            ConfigSource::Inline(json) => self.parse_json(json),
            ConfigSource::JsonFile(path) => {
                let contents = std::fs::read_to_string(path)
                    .map_err(|e| self.invalid(format!("cannot read file: {}", e)))?;
                self.parse_json(&contents)
            }
            ConfigSource::PropsFile(path) => {
                let props =
                    read_props(path).map_err(|e| self.invalid(format!("cannot read file: {}", e)))?;
                self.from_props(props, fallback_name)
            }
        }
    }

    fn parse_json(&self, json: &str) -> Result<ConnectorConfig> {
        serde_json::from_str(json).map_err(|e| self.invalid(e.to_string()))
    }

    fn from_props(
        &self,
        mut props: BTreeMap<String, String>,
        fallback_name: Option<&str>,
    ) -> Result<ConnectorConfig> {
        let name = match props.remove(NAME_KEY).filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => fallback_name
                .map(str::to_string)
                .ok_or_else(|| self.invalid("missing required configuration field 'name'"))?,
        };
        Ok(ConnectorConfig {
            name,
            config: props,
        })
    }
}
