//! Experiment driver: parallel trials, sequential episodes
//!
//! A trial is one agent lifetime: a fresh copy of the agent and the
//! environment with its own random stream, run for a fixed number of
//! episodes. Trials share nothing and run data-parallel; within a trial the
//! episode and timestep loops are strictly sequential because each training
//! update depends on the previous step.

use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    ports::{Agent, Environment},
    utils::{mean, sample_variance},
};

/// Experiment parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Number of independent agent lifetimes
    pub trials: usize,

    /// Episodes per trial
    pub episodes: usize,

    /// Step cap per episode
    pub max_steps: usize,

    /// Discount applied when accumulating the reported return. Independent
    /// of any discount the agent uses internally for learning.
    pub discount: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            episodes: 40,
            max_steps: 20_000,
            discount: 1.0,
        }
    }
}

/// Per-episode statistics of discounted returns across trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningCurve {
    /// Mean discounted return for each episode index
    pub mean: Vec<f64>,

    /// Sample variance (N-1 denominator) for each episode index
    pub variance: Vec<f64>,
}

impl LearningCurve {
    /// Standard deviation per episode index (square root of the variance).
    pub fn std_dev(&self) -> Vec<f64> {
        self.variance.iter().map(|v| v.sqrt()).collect()
    }

    /// Mean return of the final episode, the usual sweep score.
    pub fn final_mean(&self) -> f64 {
        self.mean.last().copied().unwrap_or(0.0)
    }

    /// Save the curve to a JSON file.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a curve from a JSON file.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let curve = serde_json::from_reader(file)?;
        Ok(curve)
    }
}

/// Runs trials of an agent/environment pair and aggregates learning curves.
pub struct Experiment {
    config: ExperimentConfig,
    progress: bool,
}

impl Experiment {
    /// Create a new experiment driver.
    pub fn new(config: ExperimentConfig) -> Self {
        Self {
            config,
            progress: false,
        }
    }

    /// Show a progress bar over completed trials.
    pub fn with_progress(mut self) -> Self {
        self.progress = true;
        self
    }

    /// Run the experiment: clone the agent and environment templates into
    /// `trials` isolated copies, run each lifetime on its own random stream,
    /// and aggregate per-episode means and variances across trials.
    ///
    /// Random streams are seeded by trial index (`0..trials`), so two runs
    /// with identical parameters produce bit-identical curves regardless of
    /// how the parallel runtime schedules the trials.
    pub fn run<A, E>(&self, agent: &A, environment: &E) -> Result<LearningCurve>
    where
        A: Agent + Clone + Send + Sync,
        E: Environment + Clone + Send + Sync,
    {
        if self.config.trials < 2 {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "sample variance across trials needs at least 2 trials, got {}",
                    self.config.trials
                ),
            });
        }
        if self.config.episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "experiment needs at least 1 episode per trial".to_string(),
            });
        }

        let bar = if self.progress {
            let bar = ProgressBar::new(self.config.trials as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} trials")
                    .map_err(|e| Error::ProgressBarTemplate {
                        message: e.to_string(),
                    })?
                    .progress_chars("=>-"),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let returns: Vec<Vec<f64>> = (0..self.config.trials)
            .into_par_iter()
            .map(|trial| {
                let result = self.run_trial(agent.clone(), environment.clone(), trial);
                bar.inc(1);
                result
            })
            .collect::<Result<_>>()?;
        bar.finish_and_clear();

        // Rows are per-trial; aggregate each episode column across trials.
        let mut curve = LearningCurve {
            mean: Vec::with_capacity(self.config.episodes),
            variance: Vec::with_capacity(self.config.episodes),
        };
        let mut column = vec![0.0; self.config.trials];
        for episode in 0..self.config.episodes {
            for (trial, trial_returns) in returns.iter().enumerate() {
                column[trial] = trial_returns[episode];
            }
            curve.mean.push(mean(&column));
            curve.variance.push(sample_variance(&column));
        }
        Ok(curve)
    }

    /// One agent lifetime: `episodes` episodes on a private copy of the
    /// environment, accumulating the discounted return of each.
    fn run_trial<A, E>(&self, mut agent: A, mut environment: E, trial: usize) -> Result<Vec<f64>>
    where
        A: Agent,
        E: Environment,
    {
        let mut rng = StdRng::seed_from_u64(trial as u64);
        let mut returns = Vec::with_capacity(self.config.episodes);

        for _ in 0..self.config.episodes {
            environment.begin_episode(&mut rng);
            agent.begin_episode();

            let mut state = environment.state(&mut rng);
            let mut episode_return = 0.0;
            let mut discount_power = 1.0;
            let mut terminal = false;

            for _ in 0..self.config.max_steps {
                if terminal {
                    break;
                }
                let action = agent.select_action(&state, &mut rng);
                let reward = environment.step(action, &mut rng)?;
                episode_return += discount_power * reward;
                let next_state = environment.state(&mut rng);
                terminal = environment.is_terminal();
                agent.train(&state, action, reward, &next_state, terminal);
                state = next_state;
                discount_power *= self.config.discount;
            }

            returns.push(episode_return);
        }

        Ok(returns)
    }
}
