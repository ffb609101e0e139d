//! Config command - show the resolved policy and where it came from

use std::path::Path;

use clap::Args;
use fleetclone_core::{Config, SourceKind, ENV_PREFIX};

use super::policy::{load_and_resolve, print_warnings, PolicyArgs};

/// Show the clone policy that a `clone` run would use
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    policy: PolicyArgs,
}

impl ConfigArgs {
    pub fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<()> {
        let (config, resolved) = load_and_resolve(config_path, &self.policy)?;
        print_warnings(&resolved);

        println!("fleetclone Configuration");
        println!("========================");
        println!();
        println!("Clone Policy:");
        println!("{}", resolved.policy);
        println!();

        println!("Source:");
        let kind = match config.source.kind {
            SourceKind::Gerrit => "gerrit",
            SourceKind::GitHub => "github",
        };
        println!("  kind: {}", kind);
        println!("  host: {}", config.source.host.as_deref().unwrap_or("(not set)"));
        if let Some(org) = &config.source.org {
            println!("  org: {}", org);
        }
        println!();

        match config_path {
            Some(path) => println!("Config file: {}", path.display()),
            None => {
                if let Some(path) = Config::default_config_path() {
                    println!("Config file: {}", path.display());
                    if path.exists() {
                        println!("  (exists)");
                    } else {
                        println!("  (not found - using defaults)");
                    }
                }
            }
        }
        println!("Environment prefix: {}", ENV_PREFIX);

        Ok(())
    }
}
