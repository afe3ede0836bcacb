//! CLI command implementations

pub mod run;
pub mod sweep;

use clap::ValueEnum;

use crate::pipeline::ExperimentConfig;

/// The shipped simulation domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Domain {
    /// 5x5 grid navigation (tabular via one-hot states)
    Gridworld,
    /// Pole balancing on a cart
    CartPole,
    /// Under-powered car in a valley
    MountainCar,
    /// Two-link pendulum swing-up
    Acrobot,
}

impl Domain {
    /// Default experiment shape for each domain, matching the settings the
    /// reference experiments were reported with.
    pub fn default_experiment(&self) -> ExperimentConfig {
        match self {
            Domain::Gridworld => ExperimentConfig {
                trials: 100,
                episodes: 20,
                max_steps: 1_000,
                discount: 1.0,
            },
            Domain::CartPole => ExperimentConfig {
                trials: 50,
                episodes: 50,
                max_steps: usize::MAX,
                discount: 1.0,
            },
            Domain::MountainCar => ExperimentConfig {
                trials: 100,
                episodes: 40,
                max_steps: 20_000,
                discount: 1.0,
            },
            Domain::Acrobot => ExperimentConfig {
                trials: 100,
                episodes: 100,
                max_steps: 3_000,
                discount: 1.0,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Domain::Gridworld => "Gridworld",
            Domain::CartPole => "CartPole",
            Domain::MountainCar => "MountainCar",
            Domain::Acrobot => "Acrobot",
        }
    }
}
