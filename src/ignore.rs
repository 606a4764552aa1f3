//! File and directory ignore pattern handling for Forma templates.
//! A template may ship a .formaignore file to keep paths such as its own
//! repository metadata out of generated projects.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, io::ErrorKind, path::Path};

/// Forma's ignore file name
pub const IGNORE_FILE: &str = ".formaignore";

/// Reads the template's .formaignore and compiles it into a set of glob patterns.
///
/// # Notes
/// - If the .formaignore file doesn't exist, returns an empty GlobSet
/// - Any other read failure results in an IgnoreError
/// - Each non-blank line not starting with `#` is a separate glob pattern
/// - Invalid patterns result in an IgnoreError
///
/// # Example
/// ```ignore
/// # Contents of .formaignore:
/// .git
/// .git/**
/// *.pyc
/// ```
pub fn parse_ignore_file<P: AsRef<Path>>(template_dir: P) -> Result<GlobSet> {
    let ignore_path = template_dir.as_ref().join(IGNORE_FILE);
    let mut builder = GlobSetBuilder::new();

    match read_to_string(&ignore_path) {
        Ok(contents) => add_patterns(&mut builder, &contents)?,
        Err(e) if e.kind() == ErrorKind::NotFound => debug!("{} does not exist", IGNORE_FILE),
        Err(e) => {
            return Err(Error::IgnoreError(format!("{} loading failed: {}", IGNORE_FILE, e)))
        }
    }

    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!("{} loading failed: {}", IGNORE_FILE, e)))
}

fn add_patterns(builder: &mut GlobSetBuilder, contents: &str) -> Result<()> {
    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        builder.add(Glob::new(line).map_err(|e| {
            Error::IgnoreError(format!("{} loading failed: {}", IGNORE_FILE, e))
        })?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_ignore_file_matches_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let set = parse_ignore_file(dir.path()).unwrap();
        assert!(set.is_empty());
        assert!(!set.is_match("main.txt"));
    }

    #[test]
    fn test_patterns_comments_and_blanks() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join(IGNORE_FILE), "# vcs\n.git\n\n*.pyc\n").unwrap();

        let set = parse_ignore_file(dir.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.is_match(".git"));
        assert!(set.is_match("cache.pyc"));
        assert!(!set.is_match("main.py"));
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join(IGNORE_FILE), "src/[unclosed\n").unwrap();
        assert!(matches!(parse_ignore_file(dir.path()), Err(Error::IgnoreError(_))));
    }

    #[test]
    fn test_unreadable_ignore_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir(dir.path().join(IGNORE_FILE)).unwrap();
        assert!(matches!(parse_ignore_file(dir.path()), Err(Error::IgnoreError(_))));
    }

    #[test]
    fn test_non_utf8_ignore_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join(IGNORE_FILE), [0xff, 0xfe, b'\n']).unwrap();
        assert!(matches!(parse_ignore_file(dir.path()), Err(Error::IgnoreError(_))));
    }
}
