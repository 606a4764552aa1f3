#![cfg(unix)]

mod common;

use common::ScriptedPrompter;
use forma::error::Error;
use forma::hooks::{run_hooks, HookOutcome};
use forma::renderer::{MiniJinjaRenderer, RenderData};
use std::fs;
use tempfile::TempDir;

fn data() -> RenderData {
    RenderData::new("demo", "alice", "t")
}

fn commands(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_no_hooks_no_prompt() {
    let project = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let prompt = ScriptedPrompter::new(&[]);

    let outcome = run_hooks(&engine, &prompt, &[], project.path(), &data()).unwrap();

    assert_eq!(outcome, HookOutcome::NoHooks);
    assert_eq!(prompt.asked_count(), 0);
}

#[test]
fn test_non_affirmative_answers_run_nothing() {
    let engine = MiniJinjaRenderer::new();
    for answer in ["n", "", "yes", "N", " no "] {
        let project = TempDir::new().unwrap();
        let prompt = ScriptedPrompter::new(&[answer]);
        let hooks = commands(&["touch ran"]);

        let outcome = run_hooks(&engine, &prompt, &hooks, project.path(), &data()).unwrap();

        assert_eq!(outcome, HookOutcome::Declined, "answer {answer:?}");
        assert!(!project.path().join("ran").exists(), "answer {answer:?}");
    }
}

#[test]
fn test_hooks_run_in_order_inside_project() {
    let project = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let prompt = ScriptedPrompter::new(&[" y "]);
    let hooks = commands(&[
        "sh -c 'echo first >> order.txt'",
        "sh -c 'echo {{ projectName }}-{{ author }} >> order.txt'",
        "touch {{ projectName }}.marker",
    ]);

    let outcome = run_hooks(&engine, &prompt, &hooks, project.path(), &data()).unwrap();

    assert_eq!(outcome, HookOutcome::Executed(3));
    assert_eq!(
        fs::read_to_string(project.path().join("order.txt")).unwrap(),
        "first\ndemo-alice\n"
    );
    assert!(project.path().join("demo.marker").exists());
}

#[test]
fn test_first_failure_stops_remaining_hooks() {
    let project = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let prompt = ScriptedPrompter::new(&["y"]);
    let hooks = commands(&["touch before", "sh -c 'exit 3'", "touch after"]);

    let err = run_hooks(&engine, &prompt, &hooks, project.path(), &data()).unwrap_err();

    match err {
        Error::HookExecutionError { command, reason } => {
            assert_eq!(command, "sh -c 'exit 3'");
            assert!(reason.contains('3'));
        }
        other => panic!("Expected HookExecutionError, got {other:?}"),
    }
    assert!(project.path().join("before").exists());
    assert!(!project.path().join("after").exists());
}

#[test]
fn test_unrenderable_hook_still_previews_and_fails_on_execution() {
    let project = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let prompt = ScriptedPrompter::new(&["y"]);
    let hooks = commands(&["touch first", "echo {{ unknown }}", "touch third"]);

    let err = run_hooks(&engine, &prompt, &hooks, project.path(), &data()).unwrap_err();

    assert!(matches!(err, Error::TemplateExecutionError { .. }));
    assert_eq!(prompt.asked_count(), 1);
    assert!(project.path().join("first").exists());
    assert!(!project.path().join("third").exists());
}
