//! Hyperparameter grid sweep
//!
//! Expands lists of candidate hyperparameter values into their cartesian
//! product and scores each configuration by the mean return of the final
//! episode of a full experiment.

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    pipeline::{Experiment, ExperimentConfig, LearningCurve},
    ports::{Agent, Environment},
    td::TdConfig,
};

/// Candidate value lists for each hyperparameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepGrid {
    pub alphas: Vec<f64>,
    pub gammas: Vec<f64>,
    pub epsilons: Vec<f64>,
    pub independent_orders: Vec<usize>,
    pub dependent_orders: Vec<usize>,
}

impl SweepGrid {
    /// Cartesian product of the candidate lists, in nested iteration order
    /// (alpha outermost, dependent order innermost).
    pub fn combinations(&self) -> Vec<TdConfig> {
        let mut combos = Vec::new();
        for &alpha in &self.alphas {
            for &gamma in &self.gammas {
                for &epsilon in &self.epsilons {
                    for &independent_order in &self.independent_orders {
                        for &dependent_order in &self.dependent_orders {
                            combos.push(TdConfig {
                                alpha,
                                gamma,
                                epsilon,
                                independent_order,
                                dependent_order,
                            });
                        }
                    }
                }
            }
        }
        combos
    }
}

/// Result of one sweep combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepOutcome {
    pub config: TdConfig,

    /// Mean discounted return of the final episode
    pub final_mean: f64,

    /// Standard deviation of the final episode's returns
    pub final_std_dev: f64,
}

/// Run every grid combination through the experiment driver.
///
/// `build` constructs a fresh agent for a candidate configuration; a
/// configuration it rejects (for example, basis orders invalid for the
/// domain) aborts the sweep with that error rather than being skipped
/// silently.
pub fn sweep<A, E, F>(
    environment: &E,
    grid: &SweepGrid,
    experiment_config: &ExperimentConfig,
    build: F,
) -> Result<Vec<SweepOutcome>>
where
    A: Agent + Clone + Send + Sync,
    E: Environment + Clone + Send + Sync,
    F: Fn(&TdConfig) -> Result<A>,
{
    let experiment = Experiment::new(experiment_config.clone());
    let mut outcomes = Vec::new();
    for config in grid.combinations() {
        let agent = build(&config)?;
        let curve = experiment.run(&agent, environment)?;
        outcomes.push(outcome_from_curve(config, &curve));
    }
    Ok(outcomes)
}

/// Pick the outcome with the highest final-episode mean.
pub fn best_outcome(outcomes: &[SweepOutcome]) -> Option<&SweepOutcome> {
    outcomes
        .iter()
        .max_by(|a, b| a.final_mean.total_cmp(&b.final_mean))
}

fn outcome_from_curve(config: TdConfig, curve: &LearningCurve) -> SweepOutcome {
    SweepOutcome {
        config,
        final_mean: curve.final_mean(),
        final_std_dev: curve.variance.last().copied().unwrap_or(0.0).sqrt(),
    }
}
