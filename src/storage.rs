//! Local template storage.
//!
//! Templates live one per directory under a storage root, by default
//! `<config dir>/forma/templates`. The bundled templates are embedded at
//! compile time and written out the first time the root is needed, so users
//! can edit them afterwards.

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{load_descriptor, TemplateDescriptor, DESCRIPTOR_FILE};
use crate::error::{Error, Result};

/// Environment variable overriding the storage root.
pub const TEMPLATES_DIR_ENV: &str = "FORMA_TEMPLATES_DIR";

/// Bundled templates as (relative path, content) pairs.
const BUNDLED_TEMPLATES: &[(&str, &str)] = &[
    ("go-api/template.yaml", include_str!("../templates/go-api/template.yaml")),
    ("go-api/go.mod", include_str!("../templates/go-api/go.mod")),
    ("go-api/cmd/api/main.go", include_str!("../templates/go-api/cmd/api/main.go")),
    (
        "go-api/internal/server/server.go",
        include_str!("../templates/go-api/internal/server/server.go"),
    ),
    (
        "go-api/internal/handlers/handlers.go",
        include_str!("../templates/go-api/internal/handlers/handlers.go"),
    ),
    (
        "go-api/internal/handlers/handlers_test.go",
        include_str!("../templates/go-api/internal/handlers/handlers_test.go"),
    ),
    ("go-gin-api/template.yaml", include_str!("../templates/go-gin-api/template.yaml")),
    ("go-gin-api/go.mod", include_str!("../templates/go-gin-api/go.mod")),
    ("go-gin-api/main.go", include_str!("../templates/go-gin-api/main.go")),
    ("pygame/template.yaml", include_str!("../templates/pygame/template.yaml")),
    ("pygame/main.py", include_str!("../templates/pygame/main.py")),
    ("pygame/requirements.txt", include_str!("../templates/pygame/requirements.txt")),
    ("rag-agent/template.yaml", include_str!("../templates/rag-agent/template.yaml")),
    ("rag-agent/main.py", include_str!("../templates/rag-agent/main.py")),
    ("rag-agent/requirements.txt", include_str!("../templates/rag-agent/requirements.txt")),
];

/// Resolves the storage root: `$FORMA_TEMPLATES_DIR`, else the user config dir.
pub fn templates_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(TEMPLATES_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|dir| dir.join("forma").join("templates"))
        .ok_or_else(|| {
            Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "failed to locate the user config directory",
            ))
        })
}

/// Writes the bundled templates under `root`, overwriting same-named files.
pub fn install_bundled_templates<P: AsRef<Path>>(root: P) -> Result<()> {
    let root = root.as_ref();
    for (relative, content) in BUNDLED_TEMPLATES {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("Installing bundled template file {}", path.display());
        fs::write(&path, content)?;
    }
    Ok(())
}

/// Creates and provisions the storage root on first use.
pub fn ensure_templates_dir<P: AsRef<Path>>(root: P) -> Result<PathBuf> {
    let root = root.as_ref();
    if !root.exists() {
        println!("Performing first-time setup, creating templates folder at {}...", root.display());
        fs::create_dir_all(root)?;
        install_bundled_templates(root)?;
    }
    Ok(root.to_path_buf())
}

/// A template found in storage.
#[derive(Debug, Clone)]
pub struct TemplateEntry {
    /// Directory name, used to refer to the template on the command line.
    pub id: String,
    pub descriptor: TemplateDescriptor,
}

/// Source of template identifiers for interactive selection.
pub trait TemplateCatalog {
    /// Human readable location, used in error messages.
    fn location(&self) -> String;

    /// Identifiers of every available template, in display order.
    fn template_ids(&self) -> Result<Vec<String>>;
}

/// Template storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Opens the default storage, provisioning it on first run.
    pub fn open_default() -> Result<Self> {
        let root = ensure_templates_dir(templates_dir()?)?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists every directory holding a descriptor, sorted by identifier.
    /// Templates with unreadable descriptors are skipped with a warning.
    pub fn list(&self) -> Result<Vec<TemplateEntry>> {
        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            let path = dir_entry.path();
            if !path.is_dir() || !path.join(DESCRIPTOR_FILE).is_file() {
                continue;
            }
            let id = dir_entry.file_name().to_string_lossy().into_owned();
            match load_descriptor(&path) {
                Ok(descriptor) => entries.push(TemplateEntry { id, descriptor }),
                Err(e) => warn!("Skipping template '{}': {}", id, e),
            }
        }
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(entries)
    }

    /// Returns the directory of template `id`.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` unless `root/id` is a directory with a descriptor
    pub fn resolve(&self, id: &str) -> Result<PathBuf> {
        let path = self.root.join(id);
        let is_plain_name = Path::new(id).components().count() == 1;
        if !is_plain_name || !path.join(DESCRIPTOR_FILE).is_file() {
            return Err(Error::TemplateNotFound {
                template: id.to_string(),
                templates_dir: self.location(),
            });
        }
        Ok(path)
    }
}

impl TemplateCatalog for TemplateStore {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn template_ids(&self) -> Result<Vec<String>> {
        Ok(self.list()?.into_iter().map(|entry| entry.id).collect())
    }
}
