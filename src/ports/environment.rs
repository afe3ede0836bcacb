//! Environment port - abstraction over episodic simulation domains

use rand::rngs::StdRng;

use crate::error::Result;

/// An episodic simulation environment with a discrete action set.
///
/// Implementations expose a fixed state dimension and action count, and the
/// state they report is already normalized so every element lies in
/// approximately `[0, 1]`. The random stream parameters allow stochastic
/// resets or observation noise; the shipped domains are deterministic and
/// ignore them.
pub trait Environment {
    /// Length of the state vectors produced by [`state`](Environment::state).
    fn state_dim(&self) -> usize;

    /// Number of discrete actions.
    fn num_actions(&self) -> usize;

    /// Start a new episode, establishing the initial internal state.
    fn begin_episode(&mut self, rng: &mut StdRng);

    /// Current state, normalized to approximately `[0, 1]` per element.
    fn state(&self, rng: &mut StdRng) -> Vec<f64>;

    /// Advance the internal state by one control interval (possibly via
    /// multiple sub-integration steps) and return the immediate reward.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`](crate::Error::InvalidAction) when
    /// `action >= num_actions()`; out-of-range actions are rejected, never
    /// clamped.
    fn step(&mut self, action: usize, rng: &mut StdRng) -> Result<f64>;

    /// Whether the current state is terminal.
    fn is_terminal(&self) -> bool;
}
