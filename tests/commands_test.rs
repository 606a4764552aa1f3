mod common;

use common::{write_tree, ScriptedPrompter};
use forma::commands::{format_template_list, remove_template};
use forma::error::Error;
use forma::storage::TemplateStore;
use tempfile::TempDir;

fn store(root: &std::path::Path) -> TemplateStore {
    write_tree(
        root,
        &[
            ("go-api/template.yaml", "name: Go API\ndescription: HTTP service\n"),
            ("pygame/template.yaml", "name: Pygame\ndescription: Game starter\n"),
        ],
    );
    TemplateStore::new(root)
}

#[test]
fn test_format_template_list() {
    let root = TempDir::new().unwrap();
    let listing = format_template_list(&store(root.path()).list().unwrap());

    assert!(listing.starts_with("Available templates:"));
    assert!(listing.contains("  Go API\n    └─ ID: go-api\n    └─ Description: HTTP service\n"));
    assert!(listing.find("go-api").unwrap() < listing.find("pygame").unwrap());
}

#[test]
fn test_format_empty_list() {
    assert!(format_template_list(&[]).starts_with("No templates found"));
}

#[test]
fn test_remove_template_confirmed() {
    let root = TempDir::new().unwrap();
    let store = store(root.path());
    let prompt = ScriptedPrompter::new(&["y"]);

    assert!(remove_template(&prompt, &store, "pygame").unwrap());
    assert!(!root.path().join("pygame").exists());
    assert!(root.path().join("go-api").exists());
}

#[test]
fn test_remove_template_declined() {
    let root = TempDir::new().unwrap();
    let store = store(root.path());
    let prompt = ScriptedPrompter::new(&["n"]);

    assert!(!remove_template(&prompt, &store, "pygame").unwrap());
    assert!(root.path().join("pygame").exists());
}

#[test]
fn test_remove_unknown_template() {
    let root = TempDir::new().unwrap();
    let store = store(root.path());
    let prompt = ScriptedPrompter::new(&[]);

    let err = remove_template(&prompt, &store, "rust-cli").unwrap_err();
    assert!(matches!(err, Error::TemplateNotFound { .. }));
    assert_eq!(prompt.asked_count(), 0);
}
