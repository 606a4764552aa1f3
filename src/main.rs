//! Forma's main application entry point.
//! Handles command-line argument parsing and dispatches to the subcommands.

use forma::{
    cli::{get_args, Args, Command},
    commands::{list_templates, remove_template},
    error::{default_error_handler, Result},
    generator::{Generator, ProjectRequest},
    loader::add_template,
    logger::init_logger,
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
    selection::TerminalSelector,
    storage::TemplateStore,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let prompt = DialoguerPrompter::new();
    let store = TemplateStore::open_default()?;

    match args.command {
        Command::New { template, project_name, author, output_dir } => {
            let engine = MiniJinjaRenderer::new();
            let selector = TerminalSelector;
            let generator = Generator::new(&engine, &prompt, &selector, &store);
            generator.run(ProjectRequest { template, project_name, author, output_dir })?;
        }
        Command::List => list_templates(&store)?,
        Command::Add { repo } => {
            let path = add_template(&repo, store.root())?;
            println!(
                "Successfully added template '{}'. You can now use it with the 'new' command.",
                path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
            );
        }
        Command::Remove { template } => {
            remove_template(&prompt, &store, &template)?;
        }
    }

    Ok(())
}
