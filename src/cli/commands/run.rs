//! Run command - train one or both agents on a domain and report curves

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::commands::Domain,
    domains::{Acrobot, CartPole, Gridworld, MountainCar},
    export::write_learning_curves,
    pipeline::{Experiment, ExperimentConfig, LearningCurve},
    ports::{Agent, Environment},
    td::{QLearningAgent, SarsaAgent, TdConfig},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    /// Off-policy TD control
    QLearning,
    /// On-policy TD control
    Sarsa,
    /// Both agents, side by side in the same report
    Both,
}

#[derive(Parser, Debug)]
#[command(about = "Run a learning experiment on one domain", allow_negative_numbers = true)]
pub struct RunArgs {
    /// Domain to run on
    #[arg(value_enum)]
    pub domain: Domain,

    /// Which agent(s) to train
    #[arg(long, short = 'a', value_enum, default_value = "both")]
    pub agent: AgentKind,

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

    /// Step size α
    #[arg(long, default_value_t = 0.01)]
    pub alpha: f64,

    /// Agent discount factor γ
    #[arg(long, default_value_t = 1.0)]
    pub gamma: f64,

    /// Exploration rate ε
    #[arg(long, default_value_t = 0.1)]
    pub epsilon: f64,

    /// Fourier basis independent (decoupled) order
    #[arg(long, short = 'i', default_value_t = 3)]
    pub independent_order: usize,

    /// Fourier basis dependent (coupled) order
    #[arg(long, short = 'd', default_value_t = 0)]
    pub dependent_order: usize,

    /// Output CSV file for the learning curves
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bars
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

#[derive(Debug, Serialize)]
struct CurveStats {
    agent: String,
    final_mean: f64,
    final_std_dev: f64,
}

#[derive(Debug, Serialize)]
struct RunSummaryFile {
    domain: String,
    hyperparameters: TdConfig,
    experiment: ExperimentConfig,
    results: Vec<CurveStats>,
}

pub fn execute(args: RunArgs) -> Result<()> {
    match args.domain {
        Domain::Gridworld => run_on(Gridworld::new(), &args),
        Domain::CartPole => run_on(CartPole::new(), &args),
        Domain::MountainCar => run_on(MountainCar::new(), &args),
        Domain::Acrobot => run_on(Acrobot::new(), &args),
    }
}

fn resolve_experiment(args: &RunArgs) -> ExperimentConfig {
    let preset = args.domain.default_experiment();
    ExperimentConfig {
        trials: args.trials.unwrap_or(preset.trials),
        episodes: args.episodes.unwrap_or(preset.episodes),
        max_steps: args.max_steps.unwrap_or(preset.max_steps),
        discount: args.discount,
    }
}

fn run_on<E>(environment: E, args: &RunArgs) -> Result<()>
where
    E: Environment + Clone + Send + Sync,
{
    let experiment_config = resolve_experiment(args);
    let hyperparameters = TdConfig {
        alpha: args.alpha,
        gamma: args.gamma,
        epsilon: args.epsilon,
        independent_order: args.independent_order,
        dependent_order: args.dependent_order,
    };

    println!(
        "Starting {} runs ({} trials x {} episodes)...",
        args.domain.label(),
        experiment_config.trials,
        experiment_config.episodes
    );

    let mut curves: Vec<(String, LearningCurve)> = Vec::new();
    if matches!(args.agent, AgentKind::QLearning | AgentKind::Both) {
        let agent = QLearningAgent::new(
            environment.state_dim(),
            environment.num_actions(),
            &hyperparameters,
        )?;
        curves.push(run_agent(agent, &environment, &experiment_config, args.progress)?);
    }
    if matches!(args.agent, AgentKind::Sarsa | AgentKind::Both) {
        let agent = SarsaAgent::new(
            environment.state_dim(),
            environment.num_actions(),
            &hyperparameters,
        )?;
        curves.push(run_agent(agent, &environment, &experiment_config, args.progress)?);
    }

    println!("\n=== {} Results ===", args.domain.label());
    for (name, curve) in &curves {
        let last = curve.mean.len() - 1;
        println!(
            "{name}: final-episode return {:.3} (stddev {:.3})",
            curve.mean[last],
            curve.variance[last].sqrt()
        );
    }

    if let Some(ref output) = args.output {
        write_learning_curves(output, &curves)?;
        println!("\nCurves written to {}", output.display());
    }

    if let Some(ref summary_path) = args.summary {
        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let summary = RunSummaryFile {
            domain: args.domain.label().to_string(),
            hyperparameters,
            experiment: experiment_config,
            results: curves
                .iter()
                .map(|(name, curve)| CurveStats {
                    agent: name.clone(),
                    final_mean: curve.final_mean(),
                    final_std_dev: curve.variance.last().copied().unwrap_or(0.0).sqrt(),
                })
                .collect(),
        };
        let file = std::fs::File::create(summary_path)?;
        to_writer_pretty(file, &summary)?;
        println!("Summary written to {}", summary_path.display());
    }

    Ok(())
}

fn run_agent<A, E>(
    agent: A,
    environment: &E,
    config: &ExperimentConfig,
    progress: bool,
) -> Result<(String, LearningCurve)>
where
    A: Agent + Clone + Send + Sync,
    E: Environment + Clone + Send + Sync,
{
    let name = agent.name().to_string();
    println!("Training {name}...");
    let mut experiment = Experiment::new(config.clone());
    if progress {
        experiment = experiment.with_progress();
    }
    let curve = experiment.run(&agent, environment)?;
    Ok((name, curve))
}
