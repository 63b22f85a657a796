//! Readiness aggregation over aliased input sources.

use codeweave_config::SourceSet;
use futures_util::future::try_join_all;

use crate::error::EngineError;

/// Awaits readiness of every source in the set.
///
/// The join is fail-fast: the first source error resolves the join with
/// [`EngineError::SourceNotReady`] naming the failing alias, without
/// waiting for the remaining sources. Generation must not start before
/// this resolves successfully.
pub async fn await_ready(sources: &SourceSet) -> Result<(), EngineError> {
    let pending = sources.iter().map(|(alias, source)| async move {
        source
            .ready()
            .await
            .map_err(|source_error| EngineError::SourceNotReady {
                alias: alias.to_string(),
                source: source_error,
            })
    });
    try_join_all(pending).await?;
    Ok(())
}
