//! Configuration validation logic.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::BuildConfig;
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};

/// Regex pattern for valid project names.
/// Format: starts with a lowercase letter, followed by up to 63 lowercase
/// letters, digits, underscores, or hyphens.
const PROJECT_NAME_PATTERN: &str = r"^[a-z][a-z0-9_-]{0,63}$";

/// Regex pattern for valid extension names. Extension names become path
/// namespaces under the output root, so the same character set applies.
const EXTENSION_NAME_PATTERN: &str = r"^[a-z][a-z0-9_-]{0,63}$";

/// Regex pattern for valid define keys. Keys become constant names in the
/// generated module.
const DEFINE_KEY_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

static PROJECT_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
static EXTENSION_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
static DEFINE_KEY_REGEX: OnceLock<Regex> = OnceLock::new();

fn project_name_regex() -> &'static Regex {
    PROJECT_NAME_REGEX
        .get_or_init(|| Regex::new(PROJECT_NAME_PATTERN).expect("invalid regex pattern"))
}

fn extension_name_regex() -> &'static Regex {
    EXTENSION_NAME_REGEX
        .get_or_init(|| Regex::new(EXTENSION_NAME_PATTERN).expect("invalid regex pattern"))
}

fn define_key_regex() -> &'static Regex {
    DEFINE_KEY_REGEX.get_or_init(|| Regex::new(DEFINE_KEY_PATTERN).expect("invalid regex pattern"))
}

/// Validates a build configuration and returns a validation result.
///
/// # Example
/// ```
/// use codeweave_config::{BuildConfig, validation::validate_config};
///
/// let config = BuildConfig::builder("demo").build();
/// let result = validate_config(&config);
/// assert!(result.is_ok());
/// ```
pub fn validate_config(config: &BuildConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_project_name(config, &mut result);
    validate_define_keys(config, &mut result);
    validate_paths(config, &mut result);
    check_descriptor_warnings(config, &mut result);

    result
}

/// Returns true if the given extension name may be used as an output
/// namespace.
pub fn is_valid_extension_name(name: &str) -> bool {
    extension_name_regex().is_match(name)
}

/// Returns true if a generated relative path is safe to write under the
/// output root: non-empty, relative, and free of parent traversal.
pub fn is_safe_generated_path(path: &str) -> bool {
    !path.is_empty() && !path.starts_with('/') && !path.contains("..")
}

/// Validates an extension's generated file mapping before it is written
/// under the output root.
///
/// Unsafe paths are errors; paths that begin with the hidden-entry marker
/// are warnings, since cleaning the output root deliberately skips hidden
/// entries and such files would survive the next full rebuild.
pub fn validate_generated_files<'a>(
    extension: &str,
    paths: impl IntoIterator<Item = &'a str>,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !is_valid_extension_name(extension) {
        result.add_error(ValidationError::new(
            ErrorCode::InvalidExtensionName,
            format!(
                "extension name must match pattern '{}', got '{}'",
                EXTENSION_NAME_PATTERN, extension
            ),
        ));
    }

    for path in paths {
        if !is_safe_generated_path(path) {
            result.add_error(ValidationError::with_path(
                ErrorCode::UnsafeGeneratedPath,
                format!("unsafe generated path: '{}'", path),
                format!("{}/{}", extension, path),
            ));
        } else if path.starts_with('.') || path.contains("/.") {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::HiddenGeneratedPath,
                format!("hidden generated path will survive clean(): '{}'", path),
                format!("{}/{}", extension, path),
            ));
        }
    }

    result
}

/// Validates the project name format.
fn validate_project_name(config: &BuildConfig, result: &mut ValidationResult) {
    if !project_name_regex().is_match(&config.project_name) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidProjectName,
            format!(
                "project_name must match pattern '{}', got '{}'",
                PROJECT_NAME_PATTERN, config.project_name
            ),
            "project_name",
        ));
    }
}

/// Validates that every define key is a valid constant identifier.
fn validate_define_keys(config: &BuildConfig, result: &mut ValidationResult) {
    for key in config.defines.keys() {
        if !define_key_regex().is_match(key) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidDefineKey,
                format!(
                    "define key must match pattern '{}', got '{}'",
                    DEFINE_KEY_PATTERN, key
                ),
                format!("defines.{}", key),
            ));
        }
    }
}

/// Validates the path fields.
fn validate_paths(config: &BuildConfig, result: &mut ValidationResult) {
    if config.output_dir.as_os_str().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyOutputDir,
            "output_dir must not be empty",
            "output_dir",
        ));
    }

    if config.entry_module_path().is_err() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EntryOutsideSourceRoot,
            format!(
                "entry_file '{}' is not under source_root '{}'",
                config.entry_file.display(),
                config.source_root.display()
            ),
            "entry_file",
        ));
    }
}

/// Collects descriptor-shape warnings.
fn check_descriptor_warnings(config: &BuildConfig, result: &mut ValidationResult) {
    let has_name = config
        .package_descriptor
        .as_object()
        .map(|fields| fields.contains_key("name"))
        .unwrap_or(false);
    if !config.package_descriptor.is_null() && !has_name {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::DescriptorMissingName,
            "package descriptor has no 'name' field",
            "package_descriptor",
        ));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::BuildConfig;

    #[test]
    fn test_validate_default_config_ok() {
        let config = BuildConfig::builder("demo").build();
        let result = validate_config(&config);
        assert!(result.is_ok(), "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_project_name() {
        let config = BuildConfig::builder("Not A Name").build();
        let result = validate_config(&config);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::InvalidProjectName));
    }

    #[test]
    fn test_validate_rejects_bad_define_key() {
        let config = BuildConfig::builder("demo")
            .define("not-a-const", json!(1))
            .build();
        let result = validate_config(&config);
        let error = result
            .errors
            .iter()
            .find(|e| e.code == ErrorCode::InvalidDefineKey)
            .expect("define key error");
        assert_eq!(error.path.as_deref(), Some("defines.not-a-const"));
    }

    #[test]
    fn test_validate_rejects_entry_outside_source_root() {
        let config = BuildConfig::builder("demo")
            .source_root("src")
            .entry_file("other/main.js")
            .build();
        let result = validate_config(&config);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::EntryOutsideSourceRoot));
    }

    #[test]
    fn test_validate_rejects_empty_output_dir() {
        let config = BuildConfig::builder("demo").output_dir("").build();
        let result = validate_config(&config);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::EmptyOutputDir));
    }

    #[test]
    fn test_descriptor_without_name_warns() {
        let config = BuildConfig::builder("demo")
            .package_descriptor(json!({ "version": "1.0.0" }))
            .build();
        let result = validate_config(&config);
        assert!(result.is_ok());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::DescriptorMissingName));
    }

    #[test]
    fn test_extension_name_validity() {
        assert!(is_valid_extension_name("physics-2d"));
        assert!(is_valid_extension_name("audio"));
        assert!(!is_valid_extension_name("Audio"));
        assert!(!is_valid_extension_name(""));
        assert!(!is_valid_extension_name("../escape"));
    }

    #[test]
    fn test_validate_generated_files() {
        let result = validate_generated_files("physics", ["bodies.js", "joints/hinge.js"]);
        assert!(result.is_ok(), "errors: {:?}", result.errors);

        let result = validate_generated_files("physics", ["../escape.js"]);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::UnsafeGeneratedPath));

        let result = validate_generated_files("Bad Name", ["ok.js"]);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::InvalidExtensionName));

        let result = validate_generated_files("physics", [".cache/state.js"]);
        assert!(result.is_ok());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::HiddenGeneratedPath));
    }

    #[test]
    fn test_safe_generated_paths() {
        assert!(is_safe_generated_path("bar.js"));
        assert!(is_safe_generated_path("nested/dir/file.js"));
        assert!(!is_safe_generated_path(""));
        assert!(!is_safe_generated_path("/etc/passwd"));
        assert!(!is_safe_generated_path("../outside.js"));
        assert!(!is_safe_generated_path("a/../../b.js"));
    }
}
