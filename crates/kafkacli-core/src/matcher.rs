//! Connector matching
//!
//! Resolves the set of connectors a command applies to. The full connector
//! list is fetched once, then filtered in list order by either:
//!
//! - a regular expression on the name ([`Matcher::Name`]), or
//! - a runtime state, which costs one status call per connector
//!   ([`Matcher::State`]).
//!
//! State matching stops at the first failing status call and returns that
//! error; it never skips a connector it could not inspect.

use regex::Regex;

use crate::connect::{ConnectApi, ConnectorState};
use crate::error::{Error, Result};

/// Predicate selecting connectors
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Name matches the regular expression (unanchored)
    Name(Regex),
    /// Connector or any of its tasks is in the given state
    State(ConnectorState),
}

impl Matcher {
    /// Compile a name pattern. A plain connector name is a valid pattern.
    ///
    /// An empty pattern would match every connector and is rejected.
    pub fn name(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::validation(
                "Missing or invalid argument 'connector': pattern must not be empty",
            ));
        }
        Regex::new(pattern)
            .map(Matcher::Name)
            .map_err(|source| Error::Pattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Build a state matcher; `None` when `raw` isn't a filterable state
    pub fn state(raw: &str) -> Option<Self> {
        ConnectorState::parse_filter(raw).map(Matcher::State)
    }

    /// List all connectors and keep those matching, preserving list order
    pub async fn find_matching<A>(&self, api: &A) -> Result<Vec<String>>
    where
        A: ConnectApi + ?Sized,
    {
        let names = api.list().await?;
        match self {
            Matcher::Name(regex) => Ok(names.into_iter().filter(|n| regex.is_match(n)).collect()),
            Matcher::State(state) => {
                let mut matches = Vec::new();
                for name in names {
                    let status = api.status(&name).await?;
                    if status.has_state(state) {
                        matches.push(name);
                    }
                }
                Ok(matches)
            }
        }
    }
}

/// `list --with-state`: filter by state when `state` names one of the four
/// filterable states, otherwise return every connector unfiltered.
pub async fn list_connectors<A>(api: &A, state: Option<&str>) -> Result<Vec<String>>
where
    A: ConnectApi + ?Sized,
{
    match state.and_then(Matcher::state) {
        Some(matcher) => matcher.find_matching(api).await,
        None => {
            if let Some(raw) = state.filter(|s| !s.is_empty()) {
                tracing::debug!("'{}' is not a filterable state, listing all connectors", raw);
            }
            api.list().await
        }
    }
}
