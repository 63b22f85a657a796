//! The extension contract.
//!
//! An extension is a pluggable contributor that supplies generated source
//! files for the output tree. The engine queries it synchronously during a
//! full build pass and listens on its change channel for live regeneration.
//! Every relative path an extension produces is namespaced under the
//! extension's own name before it reaches the output root, so independent
//! extensions cannot collide by accident.

use std::collections::BTreeMap;

use tokio::sync::mpsc;

use crate::config::BuildConfig;
use crate::source::SourceSet;

/// Mapping of relative output paths to generated file contents.
///
/// Ordered deterministically so repeated generation writes files in a
/// stable order.
pub type GeneratedFiles = BTreeMap<String, String>;

/// A fresh file mapping delivered over an extension's change channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionUpdate {
    /// Name of the extension that regenerated.
    pub extension: String,
    /// The complete new mapping for that extension's namespace.
    pub files: GeneratedFiles,
}

/// Sending half of an extension's change-notification channel.
///
/// The engine hands one sender to each extension at construction; the
/// sender tags every update with the extension's name so the receiving
/// side rewrites only that extension's namespace.
#[derive(Debug, Clone)]
pub struct UpdateSender {
    extension: String,
    tx: mpsc::UnboundedSender<ExtensionUpdate>,
}

impl UpdateSender {
    /// Creates a sender bound to the given extension name.
    pub fn new(extension: impl Into<String>, tx: mpsc::UnboundedSender<ExtensionUpdate>) -> Self {
        Self {
            extension: extension.into(),
            tx,
        }
    }

    /// Returns the extension name this sender is bound to.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Sends a fresh file mapping.
    ///
    /// Returns false if the receiving side has shut down; the update is
    /// dropped in that case.
    pub fn send(&self, files: GeneratedFiles) -> bool {
        self.tx
            .send(ExtensionUpdate {
                extension: self.extension.clone(),
                files,
            })
            .is_ok()
    }
}

/// A pluggable generated-source contributor.
///
/// `generate` must be pure with respect to the configuration: calling it
/// twice with the same configuration yields the same mapping.
pub trait Extension: Send + Sync {
    /// The extension's name, used as its output namespace.
    fn name(&self) -> &str;

    /// Produces the extension's complete file mapping for this
    /// configuration.
    fn generate(&self, config: &BuildConfig) -> GeneratedFiles;

    /// Hands the extension the sending half of its change channel.
    ///
    /// Extensions that never regenerate may ignore it.
    fn connect_updates(&mut self, _sender: UpdateSender) {}

    /// Hands the extension a reference to the aliased input sources, for
    /// extensions that observe inputs themselves.
    fn bind_sources(&mut self, _sources: SourceSet) {}
}
