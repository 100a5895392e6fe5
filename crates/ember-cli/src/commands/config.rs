//! Loop config commands

use anyhow::{Context, Result};
use clap::Subcommand;
use ember_runtime::LoopConfig;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print a config as TOML (the defaults if no file is given)
    Show {
        /// Path to a config file
        path: Option<String>,
    },

    /// Check that a config file parses and is valid
    Check {
        /// Path to a config file
        path: String,
    },

    /// Write the default config to a file
    Init {
        /// Output path
        #[arg(default_value = "ember.toml")]
        path: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show { path } => show(path.as_deref()),
        ConfigCommands::Check { path } => check(&path),
        ConfigCommands::Init { path, force } => init(&path, force),
    }
}

fn load(path: &str) -> Result<LoopConfig> {
    LoopConfig::load(path).with_context(|| format!("Failed to load config '{}'", path))
}

fn show(path: Option<&str>) -> Result<()> {
    let config = match path {
        Some(path) => load(path)?,
        None => LoopConfig::default(),
    };
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn check(path: &str) -> Result<()> {
    let config = load(path)?;
    println!(
        "{}: ok ({}x{}, fps {}, {} bound actions)",
        path,
        config.width,
        config.height,
        config.fps,
        config.bindings.action_names().count()
    );
    Ok(())
}

fn init(path: &str, force: bool) -> Result<()> {
    if Path::new(path).exists() && !force {
        anyhow::bail!("'{}' already exists (use --force to overwrite)", path);
    }
    LoopConfig::default()
        .save(path)
        .with_context(|| format!("Failed to write config '{}'", path))?;
    println!("Wrote {}", path);
    Ok(())
}
