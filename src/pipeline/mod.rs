//! Experiment orchestration
//!
//! The [`Experiment`] driver runs many independent agent lifetimes in
//! parallel and aggregates their discounted returns into a learning curve;
//! [`SweepGrid`] expands hyperparameter lists into configurations for grid
//! search.

pub mod experiment;
pub mod sweep;

pub use experiment::{Experiment, ExperimentConfig, LearningCurve};
pub use sweep::{SweepGrid, SweepOutcome, best_outcome, sweep};
