//! Registration that bypasses the subject's compatibility rule
//!
//! Three separate calls: lower the subject to `NONE`, register, restore the
//! previous level. The sequence is not atomic. If the process dies between
//! the first and last call, the subject stays at `NONE`.
//!
//! A subject without a level of its own follows the global level. That
//! level is what gets restored, now set on the subject itself.

use super::RegistryApi;
use super::types::{CompatibilityLevel, RegisteredSchema, SchemaRequest};
use crate::error::Result;

/// Register `schema` under `subject`. With `force`, the subject's
/// compatibility is set to `NONE` for the duration of the registration and
/// restored afterwards, whether or not the registration succeeded.
///
/// The registration outcome is what's returned. A failed restore is logged
/// at error level with the level that needs to be put back by hand.
pub async fn register_with_forced_compatibility<A>(
    api: &A,
    subject: &str,
    schema: &SchemaRequest,
    force: bool,
) -> Result<RegisteredSchema>
where
    A: RegistryApi + ?Sized,
{
    if !force {
        return api.register(subject, schema).await;
    }

    let original = effective_compatibility(api, subject).await?;
    let changed = original != CompatibilityLevel::None;
    if changed {
        tracing::info!(
            "Lowering compatibility of {} from {} to NONE",
            subject,
            original
        );
        api.set_compatibility(subject, &CompatibilityLevel::None)
            .await?;
    }

    let registered = api.register(subject, schema).await;

    if changed {
        match api.set_compatibility(subject, &original).await {
            Ok(_) => tracing::info!("Restored compatibility of {} to {}", subject, original),
            Err(e) => tracing::error!(
                "Failed to restore compatibility of {} to {}: {}. Set it back manually.",
                subject,
                original,
                e
            ),
        }
    }

    registered
}

/// Subject level, or the global level when the subject has none (404)
async fn effective_compatibility<A>(api: &A, subject: &str) -> Result<CompatibilityLevel>
where
    A: RegistryApi + ?Sized,
{
    match api.subject_compatibility(subject).await {
        Ok(level) => Ok(level),
        Err(e) if e.status() == Some(404) => {
            let level = api.global_compatibility().await?;
            tracing::debug!(
                "{} has no compatibility level of its own, using global level {}",
                subject,
                level
            );
            Ok(level)
        }
        Err(e) => Err(e),
    }
}
