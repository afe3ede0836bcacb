//! tdlab CLI - experimentation harness for Fourier-basis TD control
//!
//! This CLI provides a unified interface for:
//! - Running Q-learning and SARSA experiments on the shipped domains
//! - Grid-searching agent hyperparameters
//! - Exporting learning curves and sweep outcomes to CSV

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tdlab")]
#[command(version, about = "Fourier-basis TD control laboratory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a learning experiment on one domain
    Run(tdlab::cli::commands::run::RunArgs),

    /// Grid-search hyperparameters on one domain
    Sweep(tdlab::cli::commands::sweep::SweepArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => tdlab::cli::commands::run::execute(args),
        Commands::Sweep(args) => tdlab::cli::commands::sweep::execute(args),
    }
}
