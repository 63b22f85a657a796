//! Codeweave Configuration Library
//!
//! This crate provides the canonical types consumed by the Codeweave
//! synthesis engine: the build configuration, build-time define values with
//! structural type inference, platform identities, and the contracts for
//! pluggable contributors (extensions) and asynchronous input sources.
//!
//! # Overview
//!
//! A [`BuildConfig`] binds one project to one output directory and one
//! define mapping. Defines are closed tagged variants ([`DefineValue`])
//! converted totally from JSON, so the engine's emitter can match
//! exhaustively. Extensions implement [`Extension`] to contribute
//! namespaced generated files, and input sources implement [`InputSource`]
//! to report asynchronous readiness.
//!
//! # Example
//!
//! ```
//! use codeweave_config::BuildConfig;
//! use codeweave_config::validation::validate_config;
//! use serde_json::json;
//!
//! let config = BuildConfig::builder("space-shooter")
//!     .package_descriptor(json!({ "name": "space-shooter", "version": "0.3.1" }))
//!     .define("DEBUG", json!(false))
//!     .define("MAX_LIVES", json!(3))
//!     .build();
//!
//! let result = validate_config(&config);
//! assert!(result.is_ok());
//! assert_eq!(config.defines["MAX_LIVES"].type_tag(), "number");
//! ```
//!
//! # Modules
//!
//! - [`config`]: Build configuration and builder
//! - [`define`]: Define values and type inference
//! - [`platform`]: Platform identities and bootstrap ordering
//! - [`extension`]: The extension contract and update channel
//! - [`source`]: Aliased asynchronous input sources
//! - [`validation`]: Configuration validation
//! - [`error`]: Error and warning types

pub mod config;
pub mod define;
pub mod error;
pub mod extension;
pub mod platform;
pub mod source;
pub mod validation;

// Re-export commonly used types at the crate root
pub use config::{BuildConfig, BuildConfigBuilder};
pub use define::{DefineValue, FUNCTION_KEY, WILDCARD_TAG};
pub use error::{
    ConfigError, ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use extension::{Extension, ExtensionUpdate, GeneratedFiles, UpdateSender};
pub use platform::{boot_order, Platform, FALLBACK_PLATFORM};
pub use source::{InputSource, SourceError, SourceSet};
pub use validation::{
    is_safe_generated_path, is_valid_extension_name, validate_config, validate_generated_files,
};
