//! fleetclone CLI - clone every repository a Gerrit or GitHub host serves

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{CloneArgs, ConfigArgs};

/// fleetclone: bulk-clone a fleet of repositories with one policy
#[derive(Parser, Debug)]
#[command(name = "fleetclone")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ~/.config/fleetclone/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Discover and clone repositories
    #[command(visible_alias = "c")]
    Clone(CloneArgs),

    /// Show the resolved clone policy
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Version) => {
            println!("fleetclone {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Clone(args)) => args.execute(config_path).await,
        Some(Commands::Config(args)) => {
            args.execute(config_path)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("fleetclone - bulk repository cloner");
            println!();
            println!("Use --help for usage information");
            Ok(ExitCode::SUCCESS)
        }
    }
}
