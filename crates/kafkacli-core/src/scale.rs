//! Task scaling
//!
//! Scaling is a read-modify-write of the connector configuration: read the
//! current config, replace `tasks.max`, submit the whole map back. Kafka
//! Connect has no conditional update, so a change made by someone else
//! between the read and the write is overwritten.

use crate::connect::{ConnectApi, ConnectorInfo, TASKS_MAX};
use crate::error::{Error, Result};

/// Set `tasks.max` of `name` to `tasks`, keeping every other key unchanged.
///
/// `tasks` must be positive; anything else is rejected before any call.
pub async fn scale<A>(api: &A, name: &str, tasks: i64) -> Result<ConnectorInfo>
where
    A: ConnectApi + ?Sized,
{
    if tasks <= 0 {
        return Err(Error::validation(format!(
            "invalid tasks-max '{}': must be a positive integer",
            tasks
        )));
    }

    let mut config = api.config(name).await?.config;
    let previous = config.insert(TASKS_MAX.to_string(), tasks.to_string());
    tracing::info!(
        "Scaling connector {} from {} to {} tasks",
        name,
        previous.as_deref().unwrap_or("unset"),
        tasks
    );

    api.update(name, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeConnect;
    use rstest::rstest;

    #[tokio::test]
    async fn test_scale_rewrites_only_tasks_max() {
        let mut api = FakeConnect::with_names(&["sink"]);
        let config = api.configs.get_mut("sink").unwrap();
        config.insert("tasks.max".to_string(), "2".to_string());
        config.insert("topics".to_string(), "orders".to_string());
        config.insert("connector.class".to_string(), "FileStreamSink".to_string());

        let info = scale(&api, "sink", 5).await.unwrap();
        assert_eq!(info.config["tasks.max"], "5");

        let updates = api.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        let (name, body) = &updates[0];
        assert_eq!(name, "sink");
        assert_eq!(body.len(), 3);
        assert_eq!(body["tasks.max"], "5");
        assert_eq!(body["topics"], "orders");
        assert_eq!(body["connector.class"], "FileStreamSink");
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    #[tokio::test]
    async fn test_scale_rejects_non_positive(#[case] tasks: i64) {
        let api = FakeConnect::with_names(&["sink"]);
        let err = scale(&api, "sink", tasks).await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_scale_read_failure_skips_update() {
        let api = FakeConnect::with_names(&["sink"]).fail("config sink");
        assert!(scale(&api, "sink", 3).await.is_err());
        assert_eq!(api.calls(), vec!["config sink"]);
    }

    #[tokio::test]
    async fn test_scale_unknown_connector() {
        let api = FakeConnect::with_names(&["sink"]);
        let err = scale(&api, "missing", 3).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
