//! Template management commands: listing and removal.

use std::fs;

use crate::error::Result;
use crate::prompt::Prompter;
use crate::storage::{TemplateCatalog, TemplateEntry, TemplateStore};

/// Formats the template listing printed by `forma list`.
pub fn format_template_list(entries: &[TemplateEntry]) -> String {
    if entries.is_empty() {
        return "No templates found. Add one with 'forma add <git_repo_url>'.\n".to_string();
    }

    let mut out = String::from("Available templates:\n---------------------\n");
    for entry in entries {
        out.push_str(&format!("  {}\n", entry.descriptor.name));
        out.push_str(&format!("    └─ ID: {}\n", entry.id));
        out.push_str(&format!("    └─ Description: {}\n\n", entry.descriptor.description));
    }
    out
}

pub fn list_templates(store: &TemplateStore) -> Result<()> {
    print!("{}", format_template_list(&store.list()?));
    Ok(())
}

/// Removes template `id` from storage after one confirmation.
///
/// Returns whether the template was removed; declining is not an error.
pub fn remove_template(prompt: &dyn Prompter, store: &TemplateStore, id: &str) -> Result<bool> {
    let path = store.resolve(id)?;

    let confirmed = prompt.confirm(&format!(
        "Are you sure you want to remove the template '{}' from '{}'?",
        id,
        store.location()
    ))?;
    if !confirmed {
        println!("Aborted.");
        return Ok(false);
    }

    fs::remove_dir_all(&path)?;
    println!("Successfully removed template '{id}'.");
    Ok(true)
}
