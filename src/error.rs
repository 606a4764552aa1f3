//! Error handling for the Forma application.
//! Defines custom error types and results used throughout the application.

use thiserror::Error;

/// Custom error types for Forma operations.
///
/// Every variant carries enough context (the offending path, template or
/// command) for the operator to act on it without re-running in verbose mode.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Represents errors that occur while cloning a template repository
    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    /// Bad project or author name. Recoverable by re-entering the value.
    #[error(
        "Invalid {field} '{value}': it must not be empty, must start with a letter or digit, \
         and may contain only letters, digits, hyphens or underscores."
    )]
    InputValidationError { field: String, value: String },

    /// The template storage holds nothing to choose from.
    #[error("No templates available in '{templates_dir}'. Add one with 'forma add <git_repo_url>'.")]
    NoTemplatesAvailable { templates_dir: String },

    #[error("Template '{template}' not found in '{templates_dir}'.")]
    TemplateNotFound { template: String, templates_dir: String },

    #[error("Template '{template}' already exists in '{templates_dir}'.")]
    TemplateExistsError { template: String, templates_dir: String },

    #[error("Template descriptor '{path}' does not exist.")]
    DescriptorMissing { path: String },

    #[error("Failed to parse template descriptor '{path}': {source}.")]
    DescriptorParseError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// File read/write/copy failure while scaffolding. Partial output may remain.
    #[error("Scaffolding failed at '{path}': {source}.")]
    ScaffoldIOError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed placeholder markup in a file or hook command.
    #[error("Template syntax error in '{origin}': {source}.")]
    TemplateSyntaxError {
        origin: String,
        #[source]
        source: minijinja::Error,
    },

    /// Well-formed markup referencing something the render data does not provide.
    #[error("Template rendering failed in '{origin}': {source}.")]
    TemplateExecutionError {
        origin: String,
        #[source]
        source: minijinja::Error,
    },

    /// A post-create hook failed to launch or exited unsuccessfully.
    #[error("Hook '{command}' failed: {reason}.")]
    HookExecutionError { command: String, reason: String },

    /// Represents errors in processing .formaignore files
    #[error("Ignore file error: {0}.")]
    IgnoreError(String),

    #[error("Invalid repository URL: '{0}'.")]
    InvalidRepositoryUrl(String),

    /// Terminal interaction failed (raw mode, key reading, prompt rendering).
    #[error("Prompt error: {0}.")]
    PromptError(String),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
