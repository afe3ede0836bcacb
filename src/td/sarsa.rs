//! SARSA agent (on-policy one-step TD control)

use rand::rngs::StdRng;

use crate::{
    basis::FourierBasis,
    error::Result,
    ports::Agent,
    td::{LinearQ, TdConfig, epsilon_greedy},
};

/// One step of experience awaiting its deferred update.
#[derive(Debug, Clone)]
struct PendingStep {
    action: usize,
    reward: f64,
    features: Vec<f64>,
}

/// SARSA agent over Fourier basis features.
///
/// On-policy: the bootstrap target uses the value of the action the policy
/// actually selects next, so each step's update is deferred until the
/// following `train` call reveals that action. The driver's strict call
/// sequence guarantees that the state received by a call is the next state
/// of the previously observed transition.
#[derive(Debug, Clone)]
pub struct SarsaAgent {
    basis: FourierBasis,
    model: LinearQ,
    alpha: f64,
    gamma: f64,
    epsilon: f64,
    /// Previous call's (action, reward, state features); `None` at episode
    /// start, so the first call of an episode only caches.
    pending: Option<PendingStep>,
}

impl SarsaAgent {
    /// Create an agent for an environment with the given state dimension
    /// and action count.
    ///
    /// # Errors
    ///
    /// Fails on an invalid epsilon or invalid basis orders.
    pub fn new(state_dim: usize, num_actions: usize, config: &TdConfig) -> Result<Self> {
        config.validate()?;
        let basis = FourierBasis::new(
            state_dim,
            config.independent_order,
            config.dependent_order,
        )?;
        let model = LinearQ::new(num_actions, basis.feature_count());
        Ok(Self {
            basis,
            model,
            alpha: config.alpha,
            gamma: config.gamma,
            epsilon: config.epsilon,
            pending: None,
        })
    }

    /// Read access to the learned model, for inspection in tests and tools.
    pub fn model(&self) -> &LinearQ {
        &self.model
    }
}

impl Agent for SarsaAgent {
    fn select_action(&mut self, state: &[f64], rng: &mut StdRng) -> usize {
        let features = self.basis.project(state);
        epsilon_greedy(&self.model, &features, self.epsilon, rng)
    }

    fn train(
        &mut self,
        state: &[f64],
        action: usize,
        reward: f64,
        _next_state: &[f64],
        next_is_terminal: bool,
    ) {
        // `state` plays two roles here: it is the state this call receives,
        // and it is the next state of the pending transition. The driver's
        // call sequence makes the two numerically identical.
        let prev_next_features = self.basis.project(state);

        if let Some(pending) = self.pending.take() {
            // Deferred update for the pending step, now that `action` is
            // known to be the one the policy actually selected next.
            let td_error = pending.reward
                + self.gamma * self.model.value(action, &prev_next_features)
                - self.model.value(pending.action, &pending.features);
            self.model
                .accumulate(pending.action, self.alpha * td_error, &pending.features);

            if next_is_terminal {
                // No further call will arrive this episode, so the current
                // step settles immediately: the bootstrap value beyond a
                // terminal state is exactly zero, and the current call's
                // reward feeds the error.
                let terminal_error =
                    reward - self.model.value(action, &prev_next_features);
                self.model.accumulate(
                    action,
                    self.alpha * terminal_error,
                    &prev_next_features,
                );
            }
        }

        self.pending = Some(PendingStep {
            action,
            reward,
            features: prev_next_features,
        });
    }

    fn begin_episode(&mut self) {
        self.pending = None;
    }

    fn name(&self) -> &str {
        "Sarsa"
    }
}
