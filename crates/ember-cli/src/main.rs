//! Ember CLI - Command-line interface for the Ember runtime

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, demo};

#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "Minimal 2D game-loop runtime", long_about = None)]
#[command(version)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo scene headless and save the last frame as PNG
    Demo {
        /// Output image path
        #[arg(short, long, default_value = "demo.png")]
        output: String,

        /// Number of frames to run
        #[arg(long, default_value = "120")]
        frames: u64,

        /// Loop config file (defaults to a 320x240 uncapped config)
        #[arg(long)]
        config: Option<String>,

        /// Camera zoom; negative values flip both axes
        #[arg(long, default_value = "2.0", allow_hyphen_values = true)]
        zoom: f64,
    },

    /// Loop config operations
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Demo {
            output,
            frames,
            config,
            zoom,
        } => demo::run(demo::DemoArgs {
            output,
            frames,
            config,
            zoom,
        }),
        Commands::Config(cmd) => config::run(cmd),
    }
}
