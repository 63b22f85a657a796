//! The synthesis orchestrator.
//!
//! Sequences base-app generation, extension generation, and constants
//! generation over one output root, wires live regeneration, and exposes
//! the clean/build lifecycle. One orchestrator is constructed per build
//! context and lives for the duration of a build or watch session.

use std::path::Path;

use codeweave_config::{
    boot_order, is_safe_generated_path, BuildConfig, Extension, ExtensionUpdate, GeneratedFiles,
    Platform, SourceSet, UpdateSender,
};
use serde_json::json;
use tokio::sync::mpsc;

use crate::defines::emit_defines_module;
use crate::error::EngineError;
use crate::events::{EngineEvent, EventHub};
use crate::outdir::OutputDir;
use crate::readiness;
use crate::template::TemplateRenderer;

/// Relative path of the generated platform bootstrap file.
pub const BOOT_FILE: &str = "boot.js";
/// Relative path of the generated application entry file.
pub const APP_FILE: &str = "app.js";
/// Relative path of the generated package metadata file.
pub const PACKAGE_FILE: &str = "package.js";
/// Relative path of the generated constants module.
pub const DEFINES_FILE: &str = "defines.js";

/// Template rendered into [`BOOT_FILE`].
pub const BOOT_TEMPLATE: &str = "boot";
/// Template rendered into [`APP_FILE`].
pub const APP_TEMPLATE: &str = "app";
/// Template rendered into [`PACKAGE_FILE`].
pub const PACKAGE_TEMPLATE: &str = "package";

/// Orchestrates synthesis of one project's generated source tree.
pub struct SynthesisOrchestrator {
    config: BuildConfig,
    renderer: Box<dyn TemplateRenderer>,
    platforms: Vec<Platform>,
    extensions: Vec<Box<dyn Extension>>,
    sources: SourceSet,
    outdir: OutputDir,
    events: EventHub,
    updates: mpsc::UnboundedReceiver<ExtensionUpdate>,
}

impl SynthesisOrchestrator {
    /// Constructs an orchestrator bound to one output root.
    ///
    /// Each extension receives the sending half of the shared change
    /// channel and a reference to the input-source aggregate.
    pub fn new(
        config: BuildConfig,
        renderer: Box<dyn TemplateRenderer>,
        platforms: Vec<Platform>,
        mut extensions: Vec<Box<dyn Extension>>,
        sources: SourceSet,
    ) -> Result<Self, EngineError> {
        let outdir = OutputDir::new(&config.output_dir)?;
        let (tx, updates) = mpsc::unbounded_channel();
        for extension in &mut extensions {
            let sender = UpdateSender::new(extension.name(), tx.clone());
            extension.connect_updates(sender);
            extension.bind_sources(sources.clone());
        }

        Ok(Self {
            config,
            renderer,
            platforms,
            extensions,
            sources,
            outdir,
            events: EventHub::new(),
            updates,
        })
    }

    /// Awaits readiness of every input source.
    ///
    /// The join is fail-fast; first generation must be gated on this.
    pub async fn ready(&self) -> Result<(), EngineError> {
        readiness::await_ready(&self.sources).await
    }

    /// The build configuration this orchestrator was constructed with.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// The resolved absolute output root.
    pub fn output_root(&self) -> &Path {
        self.outdir.root()
    }

    /// Number of distinct paths written since the last clean.
    pub fn written_count(&self) -> usize {
        self.outdir.written_count()
    }

    /// Iterates over paths written since the last clean, in sorted order.
    pub fn written_paths(&self) -> impl Iterator<Item = &Path> {
        self.outdir.written_paths()
    }

    /// Registers a typed observer for file-written notifications.
    pub fn on_file_written(&mut self, observer: impl Fn(&Path) + Send + Sync + 'static) {
        self.events.on_file_written(observer);
    }

    /// Registers a catch-all observer receiving every engine event.
    pub fn on_any(&mut self, observer: impl Fn(&EngineEvent) + Send + Sync + 'static) {
        self.events.on_any(observer);
    }

    /// Empties the output root, keeping hidden entries.
    pub fn clean(&mut self) -> Result<(), EngineError> {
        tracing::debug!(root = %self.outdir.root().display(), "cleaning output root");
        self.outdir.clean()
    }

    /// Runs one full synthesis pass.
    ///
    /// Fixed sequence: clean, base app, extension code, defines. No step
    /// is skipped or reordered; every pass is a complete rewrite.
    pub fn build_code(&mut self) -> Result<(), EngineError> {
        tracing::info!(project = %self.config.project_name, "starting synthesis pass");
        self.clean()?;
        self.generate_base_app()?;
        self.generate_extensions_code()?;
        self.generate_defines()?;
        tracing::info!(files = self.outdir.written_count(), "synthesis pass complete");
        Ok(())
    }

    /// Generates the platform bootstrap, entry, and package metadata files.
    pub fn generate_base_app(&mut self) -> Result<(), EngineError> {
        let platform_names: Vec<&str> = boot_order(&self.platforms)
            .iter()
            .map(|platform| platform.name.as_str())
            .collect();
        let boot = self.render(
            BOOT_TEMPLATE,
            &json!({
                "project": self.config.project_name,
                "platforms": platform_names,
            }),
        )?;
        self.write_file(Path::new(BOOT_FILE), &boot)?;

        let entry = self.config.entry_module_specifier()?;
        let app = self.render(
            APP_TEMPLATE,
            &json!({
                "project": self.config.project_name,
                "entry": entry,
            }),
        )?;
        self.write_file(Path::new(APP_FILE), &app)?;

        // The descriptor is embedded as-is.
        // TODO: restrict the embedded descriptor to a known field set once
        // the project loader defines one.
        let package = self.render(
            PACKAGE_TEMPLATE,
            &json!({
                "project": self.config.project_name,
                "package": self.config.package_descriptor,
            }),
        )?;
        self.write_file(Path::new(PACKAGE_FILE), &package)
    }

    /// Generates every extension's files, namespaced under the extension's
    /// name.
    pub fn generate_extensions_code(&mut self) -> Result<(), EngineError> {
        let batches: Vec<(String, GeneratedFiles)> = self
            .extensions
            .iter()
            .map(|extension| {
                (
                    extension.name().to_string(),
                    extension.generate(&self.config),
                )
            })
            .collect();
        for (name, files) in &batches {
            self.write_extension_files(name, files)?;
        }
        Ok(())
    }

    /// Generates the typed constants module from the define mapping.
    pub fn generate_defines(&mut self) -> Result<(), EngineError> {
        let module = emit_defines_module(&self.config.defines);
        self.write_file(Path::new(DEFINES_FILE), &module)
    }

    /// Applies one incremental rewrite: namespaces and writes the supplied
    /// mapping only. No clean, no re-run of base app or other extensions.
    pub fn apply_update(&mut self, update: ExtensionUpdate) -> Result<(), EngineError> {
        tracing::debug!(
            extension = %update.extension,
            files = update.files.len(),
            "applying incremental rewrite"
        );
        self.write_extension_files(&update.extension, &update.files)
    }

    /// Applies every update currently queued on the change channel.
    ///
    /// Returns the number of updates applied. Useful for callers that
    /// drive regeneration from their own loop.
    pub fn apply_pending_updates(&mut self) -> Result<usize, EngineError> {
        let mut applied = 0;
        loop {
            let next = self.updates.try_recv();
            match next {
                Ok(update) => {
                    self.apply_update(update)?;
                    applied += 1;
                }
                Err(_) => return Ok(applied),
            }
        }
    }

    /// Drains the change channel until every sender is gone, applying each
    /// update batch to completion before receiving the next.
    pub async fn run_updates(&mut self) -> Result<(), EngineError> {
        loop {
            let next = self.updates.recv().await;
            match next {
                Some(update) => self.apply_update(update)?,
                None => return Ok(()),
            }
        }
    }

    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, EngineError> {
        self.renderer
            .render(template, context)
            .map_err(|source| EngineError::Render {
                template: template.to_string(),
                source,
            })
    }

    fn write_extension_files(
        &mut self,
        extension: &str,
        files: &GeneratedFiles,
    ) -> Result<(), EngineError> {
        for (relative, content) in files {
            if !is_safe_generated_path(relative) {
                return Err(EngineError::UnsafeGeneratedPath {
                    extension: extension.to_string(),
                    path: relative.clone(),
                });
            }
            let namespaced = Path::new(extension).join(relative);
            self.write_file(&namespaced, content)?;
        }
        Ok(())
    }

    /// The write primitive: write through the output directory manager,
    /// then emit exactly one typed and one catch-all notification for the
    /// written path.
    fn write_file(&mut self, relative: &Path, content: &str) -> Result<(), EngineError> {
        let absolute = self.outdir.write(relative, content)?;
        tracing::trace!(path = %absolute.display(), "wrote generated file");
        self.events.emit_file_written(&absolute);
        Ok(())
    }
}

impl std::fmt::Debug for SynthesisOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisOrchestrator")
            .field("project", &self.config.project_name)
            .field("output_root", &self.outdir.root())
            .field("platforms", &self.platforms.len())
            .field("extensions", &self.extensions.len())
            .field("sources", &self.sources)
            .finish()
    }
}
