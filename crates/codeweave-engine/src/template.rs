//! The template-renderer contract.
//!
//! Rendering engines are external collaborators; the synthesis engine only
//! depends on this contract. A renderer resolves a template by name and
//! renders it against a JSON context object into text.

use thiserror::Error;

/// Failure reported by a template renderer.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RenderError {
    /// Human-readable failure description.
    pub message: String,
}

impl RenderError {
    /// Creates a new render error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Renders named templates against JSON context objects.
pub trait TemplateRenderer: Send + Sync {
    /// Renders the named template with the given context.
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoRenderer;

    impl TemplateRenderer for EchoRenderer {
        fn render(
            &self,
            template: &str,
            context: &serde_json::Value,
        ) -> Result<String, RenderError> {
            Ok(format!("{}:{}", template, context))
        }
    }

    #[test]
    fn test_contract_usable_through_trait_object() {
        let renderer: Box<dyn TemplateRenderer> = Box::new(EchoRenderer);
        let rendered = renderer
            .render("boot", &serde_json::json!({ "platforms": [] }))
            .expect("render");
        assert!(rendered.starts_with("boot:"));
    }

    #[test]
    fn test_render_error_display() {
        let error = RenderError::new("missing template");
        assert_eq!(error.to_string(), "missing template");
    }
}
