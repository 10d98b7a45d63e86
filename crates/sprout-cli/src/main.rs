//! Sprout CLI - Spring project scaffolding from a Spring Initializr instance

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use sprout_core::tui::CreateArgs;
use sprout_core::{InitializrClient, InitializrConfig, VersionRange};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "sprout")]
#[command(about = "CLI for creating Spring projects locally")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    // Options for the default create command
    #[command(flatten)]
    pub create: CliCreateArgs,

    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Spring project
    Create(CliCreateArgs),
    /// List the dependencies available for a Spring Boot version
    Dependencies(DependenciesArgs),
    /// Check whether a version satisfies a range such as [3.0.0,3.4.0-M1)
    CheckRange(CheckRangeArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// URL of the Spring Initializr instance
    pub url: Option<String>,

    /// Keep the generated project zipped
    #[arg(long)]
    pub zipped: bool,

    /// Read project options from a JSON or YAML file instead of prompting
    #[arg(short, long = "options", value_name = "FILE")]
    pub options_file: Option<PathBuf>,

    /// Directory in which the project is created
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            url: args.url,
            zipped: args.zipped,
            options_file: args.options_file,
            directory: args.directory,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct DependenciesArgs {
    /// URL of the Spring Initializr instance
    pub url: Option<String>,

    /// Spring Boot version (defaults to the service default)
    #[arg(short, long)]
    pub boot_version: Option<String>,

    /// Also list incompatible dependencies
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Parser, Debug)]
pub struct CheckRangeArgs {
    /// Version to check, e.g. 3.3.4 or 3.4.0-M1
    #[arg(value_name = "VERSION")]
    pub candidate: String,

    /// Range expression; empty means unconstrained
    pub range: String,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sprout={0},sprout_core={0}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the verdict and report whether the version is in range
fn check_range(args: &CheckRangeArgs) -> bool {
    let satisfied = sprout_core::satisfies(&args.candidate, &args.range);

    let range = if args.range.is_empty() {
        "(unconstrained)".to_string()
    } else {
        match VersionRange::parse(&args.range) {
            Some(range) => range.to_string(),
            None => format!("{} (malformed)", args.range),
        }
    };

    if satisfied {
        println!("{} {} is within {}", "yes".green().bold(), args.candidate, range);
    } else {
        println!("{} {} is not within {}", "no".red().bold(), args.candidate, range);
    }

    satisfied
}

#[tokio::main]
async fn main() -> Result<()> {
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
    setup_logging(args.verbose);
    info!(version = CLI_VERSION, "starting sprout");

    match args.command {
        Some(Command::Create(create_args)) => {
            let result = sprout_core::run(create_args.into()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::Dependencies(deps_args)) => {
            let config = InitializrConfig::resolve(deps_args.url.as_deref())?;
            let client = InitializrClient::new(config);
            sprout_core::list_dependencies(&client, deps_args.boot_version.as_deref(), deps_args.all)
                .await
        }
        Some(Command::CheckRange(range_args)) => {
            if !check_range(&range_args) {
                std::process::exit(1);
            }
            Ok(())
        }
        None => {
            // No subcommand provided, default to create behavior
            let result = sprout_core::run(args.create.into()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
