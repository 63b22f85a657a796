//! Codeweave Synthesis Engine
//!
//! This crate materializes a multi-platform application's generated source
//! tree: platform bootstrap code, per-extension generated modules, and a
//! typed constants module, driven by a build configuration and a set of
//! pluggable contributors.
//!
//! # Overview
//!
//! The [`SynthesisOrchestrator`] sequences one build pass (clean, base
//! app, extension code, defines) over a single output root. It gates
//! first generation on the fail-fast readiness join over every input
//! source, fans every write out to typed and catch-all observers, and
//! applies extension change notifications as scoped incremental rewrites.
//!
//! # Example
//!
//! ```
//! use codeweave_config::{BuildConfig, Platform, SourceSet};
//! use codeweave_engine::{RenderError, SynthesisOrchestrator, TemplateRenderer};
//! use serde_json::json;
//!
//! struct JsonRenderer;
//!
//! impl TemplateRenderer for JsonRenderer {
//!     fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, RenderError> {
//!         Ok(format!("// {}\nexport default {};\n", template, context))
//!     }
//! }
//!
//! let out = tempfile::tempdir().expect("tempdir");
//! let config = BuildConfig::builder("demo")
//!     .output_dir(out.path())
//!     .define("DEBUG", json!(true))
//!     .build();
//!
//! let mut orchestrator = SynthesisOrchestrator::new(
//!     config,
//!     Box::new(JsonRenderer),
//!     vec![Platform::new("web"), Platform::new("pc")],
//!     Vec::new(),
//!     SourceSet::new(),
//! )
//! .expect("orchestrator");
//!
//! orchestrator.build_code().expect("build");
//! assert!(out.path().join("defines.js").exists());
//! ```
//!
//! # Modules
//!
//! - [`orchestrator`]: The clean/build lifecycle and live regeneration
//! - [`outdir`]: Output root lifecycle and the written-file registry
//! - [`defines`]: Emission of the typed constants module
//! - [`readiness`]: Fail-fast readiness aggregation over input sources
//! - [`events`]: Dual-channel write-notification fan-out
//! - [`template`]: The template-renderer contract
//! - [`error`]: Engine error types

pub mod defines;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod outdir;
pub mod readiness;
pub mod template;

// Re-export commonly used types at the crate root
pub use defines::{emit_defines_module, MODULE_BANNER};
pub use error::EngineError;
pub use events::{EngineEvent, EventHub};
pub use orchestrator::{
    SynthesisOrchestrator, APP_FILE, APP_TEMPLATE, BOOT_FILE, BOOT_TEMPLATE, DEFINES_FILE,
    PACKAGE_FILE, PACKAGE_TEMPLATE,
};
pub use outdir::{OutputDir, HIDDEN_ENTRY_MARKER};
pub use readiness::await_ready;
pub use template::{RenderError, TemplateRenderer};
