//! Post-create hook execution.
//! Hook commands are template strings from the descriptor. They are rendered,
//! shown to the operator for a single confirmation, then run one after another
//! inside the new project directory.

use log::debug;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::renderer::{RenderData, TemplateRenderer};

/// What the hook phase ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The template defines no hooks; nothing was shown or asked.
    NoHooks,
    /// The operator did not confirm; nothing was executed.
    Declined,
    /// Every hook ran and exited successfully.
    Executed(usize),
}

/// Renders every command for display. A command that fails to render keeps
/// its error in place and does not stop the remaining previews.
pub fn preview_hooks(
    engine: &dyn TemplateRenderer,
    commands: &[String],
    data: &RenderData,
) -> Vec<Result<String>> {
    commands.iter().map(|command| engine.render(command, command, data)).collect()
}

/// Formats the numbered preview list shown before confirmation.
pub fn format_preview(previews: &[Result<String>]) -> String {
    previews
        .iter()
        .enumerate()
        .map(|(i, preview)| match preview {
            Ok(command) => format!("  {}. {}", i + 1, command),
            Err(e) => format!("  {}. <cannot render: {}>", i + 1, e),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits a rendered command into program and arguments.
///
/// Words follow POSIX shell quoting: single quotes, double quotes and
/// backslash escapes group text into one argument. Nothing else of the shell
/// is interpreted, so pipes, redirections, globs and `$VARS` reach the program
/// as literal text.
pub fn split_command(command: &str) -> Result<(String, Vec<String>)> {
    let words = shlex::split(command).ok_or_else(|| Error::HookExecutionError {
        command: command.to_string(),
        reason: "unbalanced quotes or trailing escape".to_string(),
    })?;

    let mut words = words.into_iter();
    match words.next() {
        Some(program) => Ok((program, words.collect())),
        None => Err(Error::HookExecutionError {
            command: command.to_string(),
            reason: "empty command".to_string(),
        }),
    }
}

/// Runs one rendered command with `working_dir` as its current directory and
/// the terminal's stdio, blocking until it exits.
pub fn run_hook<P: AsRef<Path>>(command: &str, working_dir: P) -> Result<()> {
    let (program, args) = split_command(command)?;
    debug!("Running hook '{}' in {}", command, working_dir.as_ref().display());

    let status = Command::new(&program)
        .args(&args)
        .current_dir(working_dir.as_ref())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::HookExecutionError {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(Error::HookExecutionError {
            command: command.to_string(),
            reason: format!("exited with {status}"),
        });
    }

    Ok(())
}

/// Previews, confirms and executes `commands` inside `project_path`.
///
/// # Errors
/// * `Error::HookExecutionError` for the first command that fails to launch or
///   exits unsuccessfully; later commands are not run
/// * Template errors if a command cannot be rendered at execution time
pub fn run_hooks<P: AsRef<Path>>(
    engine: &dyn TemplateRenderer,
    prompt: &dyn Prompter,
    commands: &[String],
    project_path: P,
    data: &RenderData,
) -> Result<HookOutcome> {
    if commands.is_empty() {
        return Ok(HookOutcome::NoHooks);
    }
    let project_path = project_path.as_ref();

    let previews = preview_hooks(engine, commands, data);
    println!("This template runs the following commands after creation:");
    println!("{}", format_preview(&previews));

    let confirmed = prompt.confirm(&format!(
        "WARNING: These commands will execute on your system in '{}'. Run them?",
        project_path.display()
    ))?;
    if !confirmed {
        println!("Skipping post-create hooks.");
        return Ok(HookOutcome::Declined);
    }

    for command in commands {
        let rendered = engine.render(command, command, data)?;
        println!("Running: {rendered}");
        run_hook(&rendered, project_path)?;
    }

    Ok(HookOutcome::Executed(commands.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MiniJinjaRenderer;

    #[test]
    fn test_split_command_plain() {
        let (program, args) = split_command("git add .").unwrap();
        assert_eq!(program, "git");
        assert_eq!(args, vec!["add", "."]);
    }

    #[test]
    fn test_split_command_quoted() {
        let (program, args) =
            split_command("git commit -m 'feat: initial commit from forma template'").unwrap();
        assert_eq!(program, "git");
        assert_eq!(args, vec!["commit", "-m", "feat: initial commit from forma template"]);

        let (_, args) = split_command(r#"echo "a b" c\ d"#).unwrap();
        assert_eq!(args, vec!["a b", "c d"]);
    }

    #[test]
    fn test_split_command_rejects_bad_input() {
        assert!(matches!(split_command("   "), Err(Error::HookExecutionError { .. })));
        assert!(matches!(
            split_command("echo 'unterminated"),
            Err(Error::HookExecutionError { .. })
        ));
    }

    #[test]
    fn test_preview_reports_failures_inline() {
        let engine = MiniJinjaRenderer::new();
        let data = RenderData::new("demo", "alice", "t");
        let commands = vec![
            "echo {{ projectName }}".to_string(),
            "echo {{ missing }}".to_string(),
            "echo {{ author }}".to_string(),
        ];

        let previews = preview_hooks(&engine, &commands, &data);
        assert_eq!(previews.len(), 3);
        assert_eq!(previews[0].as_ref().unwrap(), "echo demo");
        assert!(previews[1].is_err());
        assert_eq!(previews[2].as_ref().unwrap(), "echo alice");

        let text = format_preview(&previews);
        assert!(text.contains("1. echo demo"));
        assert!(text.contains("2. <cannot render:"));
        assert!(text.contains("3. echo alice"));
    }

    #[test]
    fn test_missing_program_fails_to_launch() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = run_hook("forma-no-such-program-xyz --flag", dir.path()).unwrap_err();
        match err {
            Error::HookExecutionError { command, .. } => {
                assert_eq!(command, "forma-no-such-program-xyz --flag")
            }
            other => panic!("Expected HookExecutionError, got {other:?}"),
        }
    }
}
