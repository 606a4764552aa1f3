//! Template descriptor loading.
//! Every template carries a `template.yaml` at its root describing its name,
//! a human readable description and the commands to run after generation.

use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the descriptor file expected at the root of every template.
pub const DESCRIPTOR_FILE: &str = "template.yaml";

/// Hook command lists of a template.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Hooks {
    /// Commands run inside the new project after scaffolding, in order.
    #[serde(default)]
    pub post_create: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TemplateDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hooks: Hooks,
}

impl TemplateDescriptor {
    /// Parses descriptor content; `origin` is only used for error reporting.
    pub fn from_yaml(content: &str, origin: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|source| Error::DescriptorParseError {
            path: origin.to_string(),
            source,
        })
    }
}

/// Loads the descriptor of the template rooted at `template_dir`.
///
/// # Errors
/// * `Error::DescriptorMissing` if the template has no `template.yaml`
/// * `Error::DescriptorParseError` if the file is not a valid descriptor
pub fn load_descriptor<P: AsRef<Path>>(template_dir: P) -> Result<TemplateDescriptor> {
    let path = template_dir.as_ref().join(DESCRIPTOR_FILE);
    if !path.is_file() {
        return Err(Error::DescriptorMissing { path: path.display().to_string() });
    }

    debug!("Loading descriptor from {}", path.display());
    let content = std::fs::read_to_string(&path)?;
    TemplateDescriptor::from_yaml(&content, &path.display().to_string())
}
