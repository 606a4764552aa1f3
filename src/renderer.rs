//! Template rendering for Forma.
//! File contents and hook commands are rendered with MiniJinja against a
//! fixed, read-only [`RenderData`] record.
use crate::error::{Error, Result};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;

/// Values substituted into every file and hook of a single run.
///
/// Exposed to templates as `projectName`, `author` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderData {
    project_name: String,
    author: String,
    timestamp: String,
}

impl RenderData {
    pub fn new<S: Into<String>>(project_name: S, author: S, timestamp: S) -> Self {
        Self {
            project_name: project_name.into(),
            author: author.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Builds the record with the current local time as the creation timestamp.
    pub fn now<S: Into<String>>(project_name: S, author: S) -> Self {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self::new(project_name.into(), author.into(), timestamp)
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given data.
    ///
    /// # Arguments
    /// * `origin` - Name reported in errors (relative path or hook command)
    /// * `template` - Template string to render
    /// * `data` - Render data for variable interpolation
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, origin: &str, template: &str, data: &RenderData) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that rejects undefined names, never escapes output
    /// and reproduces trailing newlines byte for byte.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::TemplateSyntaxError` if the markup does not parse
    /// * `Error::TemplateExecutionError` if a referenced name does not resolve
    fn render(&self, origin: &str, template: &str, data: &RenderData) -> Result<String> {
        self.env.render_named_str(origin, template, data).map_err(|source| {
            let origin = origin.to_string();
            match source.kind() {
                ErrorKind::SyntaxError | ErrorKind::BadEscape => {
                    Error::TemplateSyntaxError { origin, source }
                }
                _ => Error::TemplateExecutionError { origin, source },
            }
        })
    }
}
