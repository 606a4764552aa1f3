//! Reproduces a template tree under a new project directory.
//! Directories are mirrored, text files are rendered through the template
//! engine and everything keeps the permission bits it had in the template.

use globset::GlobSet;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::DESCRIPTOR_FILE;
use crate::error::{Error, Result};
use crate::ignore::{parse_ignore_file, IGNORE_FILE};
use crate::renderer::{RenderData, TemplateRenderer};

fn io_error<P: AsRef<Path>>(path: P) -> impl FnOnce(std::io::Error) -> Error {
    let path = path.as_ref().display().to_string();
    move |source| Error::ScaffoldIOError { path, source }
}

/// Walks one template tree and writes the rendered copy.
pub struct Scaffolder<'a> {
    engine: &'a dyn TemplateRenderer,
    template_root: &'a Path,
    output_root: &'a Path,
    data: &'a RenderData,
    ignored: &'a GlobSet,
}

impl<'a> Scaffolder<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        template_root: &'a Path,
        output_root: &'a Path,
        data: &'a RenderData,
        ignored: &'a GlobSet,
    ) -> Self {
        Self { engine, template_root, output_root, data, ignored }
    }

    /// Template metadata and ignored paths never reach the generated project.
    pub fn is_skipped(&self, relative: &Path) -> bool {
        relative == Path::new(DESCRIPTOR_FILE)
            || relative == Path::new(IGNORE_FILE)
            || self.ignored.is_match(relative)
    }

    /// Runs the walk, returning the relative paths written in walk order.
    ///
    /// The first I/O or render failure stops the walk. Whatever was written
    /// before it stays on disk.
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(self.output_root).map_err(io_error(self.output_root))?;

        let mut written = Vec::new();
        // Directory modes are applied last so read-only directories can still be filled.
        let mut directory_modes = Vec::new();

        // Links are followed so a linked file takes the mode of its target.
        let walker = WalkDir::new(self.template_root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| match entry.path().strip_prefix(self.template_root) {
                Ok(relative) => relative.as_os_str().is_empty() || !self.is_skipped(relative),
                Err(_) => false,
            });

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                io_error(path)(e.into())
            })?;
            let relative = entry
                .path()
                .strip_prefix(self.template_root)
                .map(Path::to_path_buf)
                .unwrap_or_default();
            if relative.as_os_str().is_empty() {
                continue;
            }

            let target = self.output_root.join(&relative);
            let metadata = entry.metadata().map_err(|e| io_error(&relative)(e.into()))?;

            if metadata.is_dir() {
                debug!("Creating directory: {}", target.display());
                fs::create_dir_all(&target).map_err(io_error(&relative))?;
                directory_modes.push((target, metadata.permissions()));
            } else {
                debug!("Rendering file: {}", relative.display());
                self.write_file(entry.path(), &relative, &target)?;
                fs::set_permissions(&target, metadata.permissions())
                    .map_err(io_error(&relative))?;
            }
            written.push(relative);
        }

        for (target, permissions) in directory_modes.into_iter().rev() {
            fs::set_permissions(&target, permissions).map_err(io_error(&target))?;
        }

        Ok(written)
    }

    fn write_file(&self, source: &Path, relative: &Path, target: &Path) -> Result<()> {
        let bytes = fs::read(source).map_err(io_error(relative))?;
        let content = match String::from_utf8(bytes) {
            Ok(text) => {
                let origin = relative.display().to_string();
                self.engine.render(&origin, &text, self.data)?.into_bytes()
            }
            Err(raw) => {
                debug!("Copying binary file verbatim: {}", relative.display());
                raw.into_bytes()
            }
        };
        fs::write(target, content).map_err(io_error(relative))
    }
}

/// Scaffolds `template_root` into `output_root`, honouring the template's
/// .formaignore when it has one.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Relative paths of every directory and file created
pub fn scaffold<P: AsRef<Path>, Q: AsRef<Path>>(
    engine: &dyn TemplateRenderer,
    template_root: P,
    output_root: Q,
    data: &RenderData,
) -> Result<Vec<PathBuf>> {
    let template_root = template_root.as_ref();
    let ignored = parse_ignore_file(template_root)?;
    Scaffolder::new(engine, template_root, output_root.as_ref(), data, &ignored).run()
}
