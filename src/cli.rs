//! Command-line interface implementation for Forma.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for Forma.
#[derive(Parser, Debug)]
#[command(author, version, about = "Forma: a smart project initializer", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from a template. Missing values are asked for interactively.
    New {
        /// Identifier of the template to use
        #[arg(value_name = "TEMPLATE")]
        template: Option<String>,

        /// Name of the project directory to create
        #[arg(value_name = "PROJECT_NAME")]
        project_name: Option<String>,

        /// Author name substituted into the template
        #[arg(short, long)]
        author: Option<String>,

        /// Directory in which the project directory is created
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,
    },

    /// List all available project templates
    List,

    /// Add a new template from a git repository
    Add {
        /// URL or path of the repository to clone
        #[arg(value_name = "GIT_REPO_URL")]
        repo: String,
    },

    /// Remove an installed template
    Remove {
        /// Identifier of the template to remove
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
