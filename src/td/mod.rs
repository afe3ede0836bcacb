//! Temporal-difference control over linear function approximation
//!
//! This module implements the learning core: a linear action-value model
//! over Fourier basis features, epsilon-greedy action selection, and two
//! one-step TD control agents (off-policy Q-learning and on-policy SARSA).

pub mod linear_q;
pub mod q_learning;
pub mod sarsa;

use rand::{Rng, rngs::StdRng};
use serde::{Deserialize, Serialize};

pub use linear_q::LinearQ;
pub use q_learning::QLearningAgent;
pub use sarsa::SarsaAgent;

use crate::error::{Error, Result};

/// Hyperparameters shared by both TD agents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdConfig {
    /// Step size α
    pub alpha: f64,

    /// Discount factor γ used in the bootstrap target
    pub gamma: f64,

    /// Exploration rate ε for epsilon-greedy selection
    pub epsilon: f64,

    /// Fourier basis independent (decoupled) order
    pub independent_order: usize,

    /// Fourier basis dependent (coupled) order
    pub dependent_order: usize,
}

impl TdConfig {
    /// Reject configurations that cannot drive a valid agent.
    ///
    /// Epsilon must be a probability; the basis orders are validated by
    /// [`FourierBasis::new`](crate::basis::FourierBasis::new).
    pub(crate) fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.epsilon) || !self.epsilon.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("epsilon {} is not a probability in [0, 1]", self.epsilon),
            });
        }
        Ok(())
    }
}

/// Epsilon-greedy action selection with deterministic draw order.
///
/// Consumes the random stream in a fixed sequence so runs reproduce
/// bit-exactly under a fixed seed: first the explore/exploit draw, then
/// either the uniform action draw (explore) or the uniform tie-break draw
/// (exploit, and only when more than one action ties for best).
pub(crate) fn epsilon_greedy(
    model: &LinearQ,
    features: &[f64],
    epsilon: f64,
    rng: &mut StdRng,
) -> usize {
    if rng.random::<f64>() < epsilon {
        return rng.random_range(0..model.num_actions());
    }
    let best = model.best_actions(features);
    if best.len() == 1 {
        best[0]
    } else {
        best[rng.random_range(0..best.len())]
    }
}
