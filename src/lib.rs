//! Forma is a project initializer.
//! It materializes a new project from a stored template, substituting the
//! project name, author and creation time, and then runs the template's
//! post-create hooks inside the new project.

/// Command-line interface module for the Forma application
pub mod cli;

/// Template listing and removal commands
pub mod commands;

/// Template descriptor (template.yaml) loading
pub mod config;

/// Error types and handling for the Forma application
pub mod error;

/// Orchestration of a single `new` run
pub mod generator;

/// Post-create hook preview, confirmation and execution
pub mod hooks;

/// File and directory ignore patterns
/// Processes .formaignore files to exclude specific paths
pub mod ignore;

/// Cloning templates from git repositories
pub mod loader;

/// Logger setup for the command-line binary
pub mod logger;

/// Yes/no confirmation prompts
pub mod prompt;

/// Template rendering with MiniJinja
pub mod renderer;

/// Template tree reproduction
pub mod scaffold;

/// Interactive template, project name and author selection
pub mod selection;

/// Local template storage and first-run provisioning
pub mod storage;

/// Terminal host for interactive models
pub mod tui;
