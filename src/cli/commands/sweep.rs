//! Sweep command - grid search over hyperparameters on one domain

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::{
    cli::commands::Domain,
    domains::{Acrobot, CartPole, Gridworld, MountainCar},
    export::write_sweep_outcomes,
    pipeline::{ExperimentConfig, SweepGrid, best_outcome, sweep},
    ports::Environment,
    td::{QLearningAgent, SarsaAgent},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SweepAgent {
    QLearning,
    Sarsa,
}

#[derive(Parser, Debug)]
#[command(
    about = "Grid-search hyperparameters for one agent on one domain",
    allow_negative_numbers = true
)]
pub struct SweepArgs {
    /// Domain to sweep on
    #[arg(value_enum)]
    pub domain: Domain,

    /// Agent to tune
    #[arg(long, short = 'a', value_enum, default_value = "q-learning")]
    pub agent: SweepAgent,

    /// Candidate step sizes α
    #[arg(long, value_delimiter = ',', default_value = "0.001,0.01,0.1")]
    pub alphas: Vec<f64>,

    /// Candidate discount factors γ
    #[arg(long, value_delimiter = ',', default_value = "1.0")]
    pub gammas: Vec<f64>,

    /// Candidate exploration rates ε
    #[arg(long, value_delimiter = ',', default_value = "0.05,0.1,0.2")]
    pub epsilons: Vec<f64>,

    /// Candidate independent orders
    #[arg(long, value_delimiter = ',', default_value = "1,2,3")]
    pub independent_orders: Vec<usize>,

    /// Candidate dependent orders
    #[arg(long, value_delimiter = ',', default_value = "0")]
    pub dependent_orders: Vec<usize>,

    /// Number of independent trials (default: the domain preset)
    #[arg(long, short = 't')]
    pub trials: Option<usize>,

    /// Episodes per trial (default: the domain preset)
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Step cap per episode (default: the domain preset)
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Discount used when accumulating the reported return
    #[arg(long, default_value_t = 1.0)]
    pub discount: f64,

    /// Output CSV file for all sweep outcomes
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,
}

pub fn execute(args: SweepArgs) -> Result<()> {
    match args.domain {
        Domain::Gridworld => sweep_on(Gridworld::new(), &args),
        Domain::CartPole => sweep_on(CartPole::new(), &args),
        Domain::MountainCar => sweep_on(MountainCar::new(), &args),
        Domain::Acrobot => sweep_on(Acrobot::new(), &args),
    }
}

fn sweep_on<E>(environment: E, args: &SweepArgs) -> Result<()>
where
    E: Environment + Clone + Send + Sync,
{
    let preset = args.domain.default_experiment();
    let experiment_config = ExperimentConfig {
        trials: args.trials.unwrap_or(preset.trials),
        episodes: args.episodes.unwrap_or(preset.episodes),
        max_steps: args.max_steps.unwrap_or(preset.max_steps),
        discount: args.discount,
    };
    let grid = SweepGrid {
        alphas: args.alphas.clone(),
        gammas: args.gammas.clone(),
        epsilons: args.epsilons.clone(),
        independent_orders: args.independent_orders.clone(),
        dependent_orders: args.dependent_orders.clone(),
    };

    let combinations = grid.combinations().len();
    println!(
        "Sweeping {combinations} configuration(s) on {} ({} trials x {} episodes each)...",
        args.domain.label(),
        experiment_config.trials,
        experiment_config.episodes
    );

    let state_dim = environment.state_dim();
    let num_actions = environment.num_actions();
    let outcomes = match args.agent {
        SweepAgent::QLearning => sweep(&environment, &grid, &experiment_config, |config| {
            QLearningAgent::new(state_dim, num_actions, config)
        })?,
        SweepAgent::Sarsa => sweep(&environment, &grid, &experiment_config, |config| {
            SarsaAgent::new(state_dim, num_actions, config)
        })?,
    };

    println!("\n=== Sweep Results ===");
    for outcome in &outcomes {
        println!(
            "alpha={:<8} gamma={:<5} epsilon={:<5} i={} d={}  ->  {:.3} (stddev {:.3})",
            outcome.config.alpha,
            outcome.config.gamma,
            outcome.config.epsilon,
            outcome.config.independent_order,
            outcome.config.dependent_order,
            outcome.final_mean,
            outcome.final_std_dev
        );
    }

    if let Some(best) = best_outcome(&outcomes) {
        println!(
            "\nBest configuration: alpha={} gamma={} epsilon={} i={} d={} (final mean {:.3})",
            best.config.alpha,
            best.config.gamma,
            best.config.epsilon,
            best.config.independent_order,
            best.config.dependent_order,
            best.final_mean
        );
    }

    if let Some(ref output) = args.output {
        write_sweep_outcomes(output, &outcomes)?;
        println!("Outcomes written to {}", output.display());
    }

    Ok(())
}
