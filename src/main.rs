use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod build;
mod commands;
mod config;
mod engine;
mod util;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// The command to execute
    #[command(subcommand)]
    command: TofuCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the project in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "tofu.yaml")]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct CleanArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "tofu.yaml")]
    config_file: Option<PathBuf>,

    /// Only print what would be deleted
    #[arg(long, default_value = "false")]
    dry_run: bool,
}

#[derive(Parser)]
struct ServeArgs {
    /// The address to bind to [default: serve.bind from the config, 127.0.0.1]
    #[arg(short, long)]
    bind: Option<String>,

    /// The port to bind to [default: serve.port from the config, 1337]
    #[arg(short, long)]
    port: Option<u16>,

    /// Open the site in the default browser
    #[arg(short, long, default_value = "false")]
    open: bool,

    /// The path to the configuration file
    #[arg(short, long, default_value = "tofu.yaml")]
    config_file: Option<PathBuf>,

    /// Whether to watch for changes and rebuild automatically
    #[arg(short, long, default_value = "true", action = clap::ArgAction::Set)]
    watch: bool,
}

#[derive(Subcommand)]
enum TofuCommand {
    /// Initialize a new site
    Init(InitArgs),

    /// Build the site
    Build(BuildArgs),

    /// Build the site and serve it on a local port
    Serve(ServeArgs),

    /// Delete the generated site
    Clean(CleanArgs),
}

/// Log to stderr. `RUST_LOG` wins; otherwise warnings, or debug output
/// with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        TofuCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        TofuCommand::Build(args) => {
            commands::build::run(&args).await?;
        }
        TofuCommand::Serve(args) => {
            commands::serve::run(&args).await?;
        }
        TofuCommand::Clean(args) => {
            commands::clean::run(&args).await?;
        }
    }

    Ok(())
}
