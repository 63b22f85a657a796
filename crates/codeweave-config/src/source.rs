//! Aliased asynchronous input sources.
//!
//! Input sources are file-backed collaborators (asset databases, addon
//! registries, capability tables) that finish their own initialization
//! asynchronously. Generation must not start until every source has
//! reported ready.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Failure of an input source's initialization.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SourceError {
    /// Human-readable failure description.
    pub message: String,
}

impl SourceError {
    /// Creates a new source error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An asynchronously initializing input source.
#[async_trait]
pub trait InputSource: Send + Sync {
    /// Resolves once the source has completed initialization and may be
    /// queried safely, or fails if initialization cannot complete.
    async fn ready(&self) -> Result<(), SourceError>;
}

/// An aliased aggregate of input sources.
///
/// Cloneable so the engine can hand extensions a reference to the same
/// aggregate it gates generation on.
#[derive(Clone, Default)]
pub struct SourceSet {
    sources: Vec<(String, Arc<dyn InputSource>)>,
}

impl SourceSet {
    /// Creates an empty source set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source under the given alias.
    pub fn insert(&mut self, alias: impl Into<String>, source: Arc<dyn InputSource>) {
        self.sources.push((alias.into(), source));
    }

    /// Looks up a source by alias.
    pub fn get(&self, alias: &str) -> Option<&Arc<dyn InputSource>> {
        self.sources
            .iter()
            .find(|(name, _)| name == alias)
            .map(|(_, source)| source)
    }

    /// Iterates over `(alias, source)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn InputSource>)> {
        self.sources
            .iter()
            .map(|(alias, source)| (alias.as_str(), source))
    }

    /// Iterates over aliases in insertion order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|(alias, _)| alias.as_str())
    }

    /// Returns the number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true if no sources are registered.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl fmt::Debug for SourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.aliases()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysReady;

    #[async_trait]
    impl InputSource for AlwaysReady {
        async fn ready(&self) -> Result<(), SourceError> {
            Ok(())
        }
    }

    #[test]
    fn test_source_set_lookup_and_order() {
        let mut sources = SourceSet::new();
        sources.insert("assets", Arc::new(AlwaysReady));
        sources.insert("addons", Arc::new(AlwaysReady));

        assert_eq!(sources.len(), 2);
        assert!(sources.get("assets").is_some());
        assert!(sources.get("missing").is_none());
        let aliases: Vec<&str> = sources.aliases().collect();
        assert_eq!(aliases, vec!["assets", "addons"]);
    }

    #[tokio::test]
    async fn test_source_ready() {
        let source = AlwaysReady;
        assert!(source.ready().await.is_ok());
    }
}
