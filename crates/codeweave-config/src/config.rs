//! Build configuration types.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::define::DefineValue;
use crate::error::ConfigError;

/// Build configuration for one synthesis context.
///
/// A configuration binds a project (name, source root, entry file, package
/// descriptor) to one output directory and one set of build-time defines.
/// The package descriptor is carried verbatim and embedded as-is into the
/// generated metadata module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project name.
    pub project_name: String,

    /// Root directory of the project's own sources.
    pub source_root: PathBuf,

    /// Entry source file; must live under the source root.
    pub entry_file: PathBuf,

    /// Directory that receives the generated source tree.
    pub output_dir: PathBuf,

    /// Package descriptor embedded verbatim into generated metadata.
    #[serde(default)]
    pub package_descriptor: serde_json::Value,

    /// Build-time defines, emitted as typed constant declarations.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defines: BTreeMap<String, DefineValue>,
}

impl BuildConfig {
    /// Creates a new configuration builder.
    pub fn builder(project_name: impl Into<String>) -> BuildConfigBuilder {
        BuildConfigBuilder::new(project_name)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Returns the entry file as a path relative to the source root, with
    /// the trailing source-file extension stripped.
    pub fn entry_module_path(&self) -> Result<PathBuf, ConfigError> {
        let relative = self.entry_file.strip_prefix(&self.source_root).map_err(|_| {
            ConfigError::EntryOutsideSourceRoot {
                entry: self.entry_file.clone(),
                source_root: self.source_root.clone(),
            }
        })?;
        Ok(relative.with_extension(""))
    }

    /// Returns the entry module as a `/`-separated specifier suitable for
    /// embedding in generated source.
    pub fn entry_module_specifier(&self) -> Result<String, ConfigError> {
        let module = self.entry_module_path()?;
        let parts: Vec<String> = module
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Ok(parts.join("/"))
    }
}

/// Builder for constructing [`BuildConfig`] instances.
#[derive(Debug, Clone)]
pub struct BuildConfigBuilder {
    project_name: String,
    source_root: PathBuf,
    entry_file: PathBuf,
    output_dir: PathBuf,
    package_descriptor: serde_json::Value,
    defines: BTreeMap<String, DefineValue>,
}

impl BuildConfigBuilder {
    /// Creates a builder with conventional project layout defaults.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            source_root: PathBuf::from("src"),
            entry_file: PathBuf::from("src/main.js"),
            output_dir: PathBuf::from("src-gen"),
            package_descriptor: serde_json::Value::Null,
            defines: BTreeMap::new(),
        }
    }

    /// Sets the source root.
    pub fn source_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_root = path.into();
        self
    }

    /// Sets the entry file.
    pub fn entry_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.entry_file = path.into();
        self
    }

    /// Sets the output directory.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    /// Sets the package descriptor.
    pub fn package_descriptor(mut self, descriptor: serde_json::Value) -> Self {
        self.package_descriptor = descriptor;
        self
    }

    /// Adds one define.
    pub fn define(mut self, key: impl Into<String>, value: impl Into<DefineValue>) -> Self {
        self.defines.insert(key.into(), value.into());
        self
    }

    /// Replaces the define mapping.
    pub fn defines(mut self, defines: BTreeMap<String, DefineValue>) -> Self {
        self.defines = defines;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> BuildConfig {
        BuildConfig {
            project_name: self.project_name,
            source_root: self.source_root,
            entry_file: self.entry_file,
            output_dir: self.output_dir,
            package_descriptor: self.package_descriptor,
            defines: self.defines,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = BuildConfig::builder("demo").build();
        assert_eq!(config.project_name, "demo");
        assert_eq!(config.source_root, PathBuf::from("src"));
        assert_eq!(config.entry_file, PathBuf::from("src/main.js"));
        assert_eq!(config.output_dir, PathBuf::from("src-gen"));
        assert!(config.defines.is_empty());
    }

    #[test]
    fn test_entry_module_path_strips_extension() {
        let config = BuildConfig::builder("demo")
            .source_root("project/src")
            .entry_file("project/src/app/main.js")
            .build();
        assert_eq!(
            config.entry_module_path().expect("relative entry"),
            PathBuf::from("app/main")
        );
        assert_eq!(
            config.entry_module_specifier().expect("specifier"),
            "app/main"
        );
    }

    #[test]
    fn test_entry_module_path_outside_source_root() {
        let config = BuildConfig::builder("demo")
            .source_root("project/src")
            .entry_file("elsewhere/main.js")
            .build();
        assert!(matches!(
            config.entry_module_path(),
            Err(ConfigError::EntryOutsideSourceRoot { .. })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = BuildConfig::builder("demo")
            .package_descriptor(json!({ "name": "demo", "version": "1.0.0" }))
            .define("DEBUG", json!(true))
            .define("RETRIES", json!(3))
            .build();

        let encoded = config.to_json_pretty().expect("serialize");
        let decoded = BuildConfig::from_json(&encoded).expect("parse");
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let json = r#"{
            "project_name": "demo",
            "source_root": "src",
            "entry_file": "src/main.js",
            "output_dir": "src-gen",
            "unexpected": 1
        }"#;
        assert!(BuildConfig::from_json(json).is_err());
    }
}
