//! Project generation flow.
//! Gathers the inputs (from the caller or the interactive wizard), resolves
//! and loads the template, clears the destination on confirmation, then
//! scaffolds the project and runs its post-create hooks.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::load_descriptor;
use crate::error::Result;
use crate::hooks::{run_hooks, HookOutcome};
use crate::prompt::Prompter;
use crate::renderer::{RenderData, TemplateRenderer};
use crate::scaffold::scaffold;
use crate::selection::{
    validate_name, Preset, Selection, SelectionOutcome, SelectionState, Selector,
};
use crate::storage::TemplateStore;

/// Inputs of one `new` run; missing values are asked for interactively.
#[derive(Debug, Clone, Default)]
pub struct ProjectRequest {
    pub template: Option<String>,
    pub project_name: Option<String>,
    pub author: Option<String>,
    /// Directory the project directory is created in.
    pub output_dir: PathBuf,
}

/// How a run ended when no error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { path: PathBuf, hooks: HookOutcome },
    /// The operator left the wizard before all inputs were given.
    SelectionCancelled,
    /// The destination exists and the operator did not allow removing it.
    ConflictDeclined(PathBuf),
}

pub struct Generator<'a> {
    engine: &'a dyn TemplateRenderer,
    prompt: &'a dyn Prompter,
    selector: &'a dyn Selector,
    store: &'a TemplateStore,
}

impl<'a> Generator<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        prompt: &'a dyn Prompter,
        selector: &'a dyn Selector,
        store: &'a TemplateStore,
    ) -> Self {
        Self { engine, prompt, selector, store }
    }

    /// Returns the complete inputs, or `None` if the operator cancelled.
    ///
    /// Fully supplied inputs are validated without any interaction.
    pub fn resolve_inputs(&self, request: &ProjectRequest) -> Result<Option<Selection>> {
        if let (Some(template), Some(project_name), Some(author)) =
            (&request.template, &request.project_name, &request.author)
        {
            validate_name("project name", project_name)?;
            validate_name("author", author)?;
            return Ok(Some(Selection {
                template: template.clone(),
                project_name: project_name.clone(),
                author: author.clone(),
            }));
        }

        let preset = Preset {
            template: request.template.clone(),
            project_name: request.project_name.clone(),
            author: request.author.clone(),
        };
        let state = self.selector.select(SelectionState::new(self.store, preset)?)?;
        match state.outcome() {
            SelectionOutcome::Complete(selection) => Ok(Some(selection)),
            SelectionOutcome::Cancelled => Ok(None),
        }
    }

    /// Asks before removing an existing destination. Returns false if declined.
    fn clear_destination(&self, dest: &Path) -> Result<bool> {
        let metadata = match fs::symlink_metadata(dest) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(true),
            Err(e) => return Err(e.into()),
        };
        let overwrite = self.prompt.confirm(&format!(
            "Project directory '{}' already exists. Do you want to overwrite it?",
            dest.display()
        ))?;
        if !overwrite {
            return Ok(false);
        }

        debug!("Removing existing destination {}", dest.display());
        if metadata.is_dir() {
            fs::remove_dir_all(dest)?;
        } else {
            fs::remove_file(dest)?;
        }
        Ok(true)
    }

    /// Runs the whole flow for one project.
    ///
    /// Template and descriptor problems are reported before the destination is
    /// touched. A scaffold failure may leave a partially written project, and
    /// a hook failure leaves the scaffolded files in place.
    pub fn run(&self, request: ProjectRequest) -> Result<Outcome> {
        let Some(selection) = self.resolve_inputs(&request)? else {
            println!("Project creation aborted.");
            return Ok(Outcome::SelectionCancelled);
        };

        let template_root = self.store.resolve(&selection.template)?;
        let descriptor = load_descriptor(&template_root)?;
        debug!("Loaded template '{}' from {}", descriptor.name, template_root.display());

        let dest = request.output_dir.join(&selection.project_name);
        if !self.clear_destination(&dest)? {
            println!("Project creation aborted.");
            return Ok(Outcome::ConflictDeclined(dest));
        }

        let data = RenderData::now(selection.project_name.as_str(), selection.author.as_str());
        debug!(
            "Render data: projectName={}, author={}, timestamp={}",
            data.project_name(),
            data.author(),
            data.timestamp()
        );

        println!(
            "Creating a new project '{}' from template '{}'",
            selection.project_name, selection.template
        );
        let written = scaffold(self.engine, &template_root, &dest, &data)?;
        debug!("Wrote {} entries into {}", written.len(), dest.display());

        let hooks =
            run_hooks(self.engine, self.prompt, &descriptor.hooks.post_create, &dest, &data)?;

        println!("Project created successfully in {}.", dest.display());
        Ok(Outcome::Created { path: dest, hooks })
    }
}
