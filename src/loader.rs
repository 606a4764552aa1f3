//! Adding templates from git repositories.
//! A repository is cloned into the storage root under its own name and given
//! a placeholder descriptor when it does not ship one.
use crate::config::DESCRIPTOR_FILE;
use crate::error::{Error, Result};
use crate::ignore::IGNORE_FILE;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Patterns written to the .formaignore of cloned templates.
const CLONE_IGNORE_PATTERNS: &str = "# repository metadata of the cloned template\n.git\n.git/**\n";

/// Derives the template identifier from a repository location: the last path
/// segment without a trailing `.git`.
///
/// Accepts URLs (`https://host/user/repo.git`), scp-like addresses
/// (`git@host:user/repo.git`) and local paths.
pub fn repository_name(repo: &str) -> Result<String> {
    let last_segment = match Url::parse(repo) {
        Ok(url) if url.has_host() || url.scheme() == "file" => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string),
        _ => repo
            .trim_end_matches(['/', '\\'])
            .rsplit(['/', '\\', ':'])
            .next()
            .map(str::to_string),
    };

    let name = last_segment.unwrap_or_default();
    let name = name.strip_suffix(".git").unwrap_or(&name);
    if name.is_empty() || name == "." || name == ".." {
        return Err(Error::InvalidRepositoryUrl(repo.to_string()));
    }
    Ok(name.to_string())
}

/// Clones `repo` into `dest`, using the ssh agent or `~/.ssh/id_rsa` when the
/// remote asks for ssh credentials.
pub fn clone_repository<P: AsRef<Path>>(repo: &str, dest: P) -> Result<()> {
    let dest = dest.as_ref();
    debug!("Cloning '{}' to '{}'.", repo, dest.display());

    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");
        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            git2::Cred::ssh_key_from_agent(username).or_else(|_| {
                let key = dirs::home_dir().unwrap_or_default().join(".ssh").join("id_rsa");
                git2::Cred::ssh_key(username, None, &key, None)
            })
        } else {
            git2::Cred::default()
        }
    });

    let mut fetch_opts = git2::FetchOptions::new();
    fetch_opts.remote_callbacks(callbacks);

    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fetch_opts);
    builder.clone(repo, dest)?;
    Ok(())
}

/// Writes a placeholder descriptor when the template has none.
pub fn ensure_descriptor<P: AsRef<Path>>(template_dir: P, name: &str) -> Result<()> {
    let path = template_dir.as_ref().join(DESCRIPTOR_FILE);
    if path.exists() {
        return Ok(());
    }
    let content = format!(
        r#"name: "{name}"
description: "Placeholder template.yaml. Please customize."
hooks:
  post_create:
    - "git init"
    - "git add ."
    - "git commit -m 'feat: initial commit from forma template'"
    - "echo '{{{{ projectName }}}} initialized.'"
"#
    );
    fs::write(&path, content)?;
    Ok(())
}

/// Keeps the clone's repository metadata out of generated projects.
pub fn ensure_ignore_file<P: AsRef<Path>>(template_dir: P) -> Result<()> {
    let path = template_dir.as_ref().join(IGNORE_FILE);
    if !path.exists() {
        fs::write(&path, CLONE_IGNORE_PATTERNS)?;
    }
    Ok(())
}

/// Clones `repo` into the storage root as a new template.
///
/// # Errors
/// * `Error::TemplateExistsError` if a template of the same name is installed
/// * `Error::Git2Error` if the clone fails
pub fn add_template<P: AsRef<Path>>(repo: &str, templates_root: P) -> Result<PathBuf> {
    let templates_root = templates_root.as_ref();
    let name = repository_name(repo)?;
    let dest = templates_root.join(&name);

    if dest.exists() {
        return Err(Error::TemplateExistsError {
            template: name,
            templates_dir: templates_root.display().to_string(),
        });
    }

    println!("Cloning template from '{}' into '{}'...", repo, dest.display());
    clone_repository(repo, &dest)?;

    ensure_descriptor(&dest, &name)?;
    ensure_ignore_file(&dest)?;
    Ok(dest)
}
