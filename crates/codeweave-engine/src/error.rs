//! Engine error types.

use std::path::PathBuf;

use codeweave_config::{ConfigError, SourceError};
use thiserror::Error;

use crate::template::RenderError;

/// Errors raised by the synthesis engine.
///
/// Filesystem failures are fatal for the current pass: they propagate to
/// the caller with no retry and no rollback, and files already written
/// before the failure remain on disk.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A filesystem operation failed.
    #[error("i/o failure at {path}: {source}")]
    Io {
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A template failed to render.
    #[error("template '{template}' failed to render: {source}")]
    Render {
        /// Name of the failing template.
        template: String,
        /// Renderer-reported failure.
        #[source]
        source: RenderError,
    },

    /// The configuration could not be interpreted.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input source failed to become ready.
    #[error("input source '{alias}' failed to become ready: {source}")]
    SourceNotReady {
        /// Alias of the failing source.
        alias: String,
        /// The source's own failure.
        #[source]
        source: SourceError,
    },

    /// An extension produced a path that must not be written under the
    /// output root.
    #[error("extension '{extension}' produced unsafe output path '{path}'")]
    UnsafeGeneratedPath {
        /// Name of the offending extension.
        extension: String,
        /// The rejected relative path.
        path: String,
    },
}

impl EngineError {
    /// Annotates an I/O error with the path it applies to.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }
}
