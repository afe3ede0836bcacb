//! Agent port - abstraction over online control learners

use rand::rngs::StdRng;

/// A learning agent that selects actions and updates online from observed
/// transitions.
///
/// The driver calls methods in a strict sequence per episode:
/// [`begin_episode`](Agent::begin_episode) once, then alternating
/// [`select_action`](Agent::select_action) and [`train`](Agent::train) per
/// timestep, with `train` always receiving the transition produced by the
/// immediately preceding `select_action`. Implementations may rely on this
/// ordering to carry cached state between calls.
///
/// Randomness is never drawn from a global source: the caller owns the
/// random stream and passes it into every operation that needs it, which
/// keeps independent trials deterministic and parallel-safe.
pub trait Agent {
    /// Choose an action index in `[0, action_count)` for the given
    /// normalized state.
    fn select_action(&mut self, state: &[f64], rng: &mut StdRng) -> usize;

    /// Update the agent from one observed transition.
    ///
    /// `next_is_terminal` indicates that `next_state` is terminal, in which
    /// case no bootstrapping past it may occur and the driver will call
    /// [`begin_episode`](Agent::begin_episode) before the next `train`.
    fn train(
        &mut self,
        state: &[f64],
        action: usize,
        reward: f64,
        next_state: &[f64],
        next_is_terminal: bool,
    );

    /// Tell the agent a new episode is starting.
    ///
    /// Invalidates any cached per-episode state. Learned weights persist
    /// across episodes; only a fresh agent instance resets them.
    fn begin_episode(&mut self);

    /// Get the agent's name, used in reports and exported tables.
    fn name(&self) -> &str;
}
