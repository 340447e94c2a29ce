//! create-extension - scaffold extension boilerplate projects

use clap::Parser;
use colored::Colorize;
use scaffold_core::{pipeline, ScaffoldError, ToolkitConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "create-extension")]
#[command(about = "Scaffold a new extension project from the bundled templates")]
#[command(version)]
pub struct Args {
    /// Extension type to scaffold (e.g. endpoint, hook, display)
    pub extension_type: String,

    /// Directory to create the extension in
    pub name: String,

    /// Use JavaScript instead of TypeScript
    #[arg(short = 'j', long)]
    pub javascript: bool,

    /// Local directory to use for templates (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Skip the dependency install step
    #[arg(long = "skip-install")]
    pub skip_install: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = ToolkitConfig::from_env();

    let create_args = pipeline::CreateArgs {
        extension_type: args.extension_type,
        name: args.name,
        javascript: args.javascript,
        template_dir: args.template_dir,
        skip_install: args.skip_install,
    };

    let result = pipeline::run(&config, create_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&config, &e);
            ExitCode::FAILURE
        }
    }
}

/// Print a tailored diagnostic for each anticipated failure; everything
/// else falls through as a generic error.
fn report(config: &ToolkitConfig, err: &ScaffoldError) {
    match err {
        ScaffoldError::UnknownType { requested, valid } => {
            eprintln!("Extension type \"{}\" does not exist.", requested.red());
            eprintln!("Please choose one of the following:");
            eprintln!("{}", valid.join(", "));
        }
        ScaffoldError::DestinationNotADirectory { path } => {
            eprintln!(
                "Destination {} already exists and is not a directory.",
                path.display().to_string().red()
            );
        }
        ScaffoldError::DestinationNotEmpty { path } => {
            eprintln!(
                "Destination {} already exists and is not an empty directory.",
                path.display().to_string().red()
            );
        }
        ScaffoldError::UnsupportedTemplate {
            extension_type,
            language,
        } => {
            eprintln!(
                "Bootstrapping {}s in {} is not yet supported.",
                extension_type.red(),
                language
            );
            eprintln!("Follow the development of this toolkit here:");
            eprintln!("{}", config.docs_url);
        }
        ScaffoldError::Other(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
        }
    }
}
