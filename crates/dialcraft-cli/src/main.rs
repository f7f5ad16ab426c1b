use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dialcraft_core::Mode;

mod commands;
mod styles;

#[derive(Parser)]
#[command(name = "dialcraft-cli", version, about = "Dialcraft CLI")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal session
    Run,
    /// Drive a fixed number of ticks and print the final snapshot
    Simulate {
        /// Mode to drive: pomodoro, timer or clock
        #[arg(long, default_value = "pomodoro")]
        mode: Mode,
        /// Number of ticks to apply
        #[arg(long, default_value_t = 1)]
        ticks: u64,
    },
    /// List available styles
    Styles {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Configuration inspection
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Run => commands::run::run(config),
        Commands::Simulate { mode, ticks } => commands::simulate::run(mode, ticks, config),
        Commands::Styles { json } => commands::styles::run(json),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
