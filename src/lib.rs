//! Fourier-basis temporal-difference control laboratory
//!
//! This crate provides:
//! - A Fourier basis feature expander over normalized state vectors
//! - A linear action-value model with exact-tie greedy selection
//! - Q-learning (off-policy) and SARSA (on-policy) one-step TD agents
//! - A parallel experiment driver aggregating discounted returns over
//!   independent trials
//! - Four classic control domains as test fixtures, and CSV/JSON reporting

pub mod basis;
pub mod cli;
pub mod domains;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod ports;
pub mod td;
pub mod utils;

pub use basis::FourierBasis;
pub use error::{Error, Result};
pub use pipeline::{Experiment, ExperimentConfig, LearningCurve};
pub use ports::{Agent, Environment};
pub use td::{LinearQ, QLearningAgent, SarsaAgent, TdConfig};
