//! Q-learning agent (off-policy one-step TD control)

use rand::rngs::StdRng;

use crate::{
    basis::FourierBasis,
    error::Result,
    ports::Agent,
    td::{LinearQ, TdConfig, epsilon_greedy},
};

/// Q-learning agent over Fourier basis features.
///
/// Learns toward the optimal value function by bootstrapping from the
/// maximum next-state value, regardless of the action the policy actually
/// takes next.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    basis: FourierBasis,
    model: LinearQ,
    alpha: f64,
    gamma: f64,
    epsilon: f64,
    /// Features of the state the next `train` call will receive. Populated
    /// from the previous call's next-state projection so chained transitions
    /// within an episode never recompute it; `None` at episode start.
    cached_features: Option<Vec<f64>>,
}

impl QLearningAgent {
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
            cached_features: None,
        })
    }

    /// Read access to the learned model, for inspection in tests and tools.
    pub fn model(&self) -> &LinearQ {
        &self.model
    }
}

impl Agent for QLearningAgent {
    fn select_action(&mut self, state: &[f64], rng: &mut StdRng) -> usize {
        let features = self.basis.project(state);
        epsilon_greedy(&self.model, &features, self.epsilon, rng)
    }

    fn train(
        &mut self,
        state: &[f64],
        action: usize,
        reward: f64,
        next_state: &[f64],
        next_is_terminal: bool,
    ) {
        // Only the first transition of an episode projects the current
        // state; afterwards it arrives cached from the previous call.
        let features = match self.cached_features.take() {
            Some(features) => features,
            None => self.basis.project(state),
        };

        // q(terminal, a') = 0, so a terminal transition's target is the
        // reward alone and the next-state projection is skipped entirely.
        let (target, next_features) = if next_is_terminal {
            (reward, None)
        } else {
            let next_features = self.basis.project(next_state);
            let target = reward + self.gamma * self.model.max_value(&next_features);
            (target, Some(next_features))
        };

        let td_error = target - self.model.value(action, &features);
        self.model.accumulate(action, self.alpha * td_error, &features);

        self.cached_features = next_features;
    }

    fn begin_episode(&mut self) {
        self.cached_features = None;
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::dot;

    fn config() -> TdConfig {
        TdConfig {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.0,
            independent_order: 1,
            dependent_order: 1,
        }
    }

    #[test]
    fn non_terminal_update_matches_closed_form() {
        let mut agent = QLearningAgent::new(2, 2, &config()).unwrap();
        agent.begin_episode();

        let s = [0.2, 0.4];
        let s_next = [0.3, 0.5];
        let phi = agent.basis.project(&s);
        let phi_next = agent.basis.project(&s_next);

        // Zero weights: q(s,a) = 0 and max q(s',.) = 0, so the TD error is
        // the reward and the update is alpha * r * phi(s).
        let reward = -1.0;
        agent.train(&s, 0, reward, &s_next, false);

        let expected_scale = 0.1 * reward;
        for (i, &f) in phi.iter().enumerate() {
            let mut one_hot = vec![0.0; phi.len()];
            one_hot[i] = 1.0;
            let w_i = agent.model.value(0, &one_hot);
            assert!(
                (w_i - expected_scale * f).abs() < 1e-12,
                "weight {i} diverged from the closed-form update"
            );
        }
        // Second update now bootstraps from the learned next-state value.
        let max_next = agent.model.max_value(&phi_next);
        let before = agent.model.value(0, &phi_next);
        let expected_error = reward + 0.9 * max_next - before;
        agent.train(&s_next, 0, reward, &s_next, false);
        let after = agent.model.value(0, &phi_next);
        let expected_after = before + 0.1 * expected_error * dot(&phi_next, &phi_next);
        assert!((after - expected_after).abs() < 1e-9);
    }

    #[test]
    fn terminal_update_does_not_bootstrap() {
        let mut agent = QLearningAgent::new(1, 2, &config()).unwrap();
        agent.begin_episode();

        // Seed action 1 with a large next-state value that must be ignored.
        let s = [0.5];
        let phi = agent.basis.project(&s);
        agent.model.accumulate(1, 10.0, &phi);

        let reward = 2.0;
        agent.train(&s, 0, reward, &s, true);

        // Target is the bare reward: w[0] = alpha * r * phi.
        let q = agent.model.value(0, &phi);
        let expected = 0.1 * reward * dot(&phi, &phi);
        assert!((q - expected).abs() < 1e-12);
    }

    #[test]
    fn episode_boundary_invalidates_the_feature_cache() {
        let mut agent = QLearningAgent::new(1, 1, &config()).unwrap();
        agent.begin_episode();
        agent.train(&[0.1], 0, -1.0, &[0.2], false);
        assert!(agent.cached_features.is_some());
        agent.begin_episode();
        assert!(agent.cached_features.is_none());
    }

    #[test]
    fn terminal_transition_leaves_no_cache() {
        let mut agent = QLearningAgent::new(1, 1, &config()).unwrap();
        agent.begin_episode();
        agent.train(&[0.1], 0, -1.0, &[0.2], true);
        assert!(agent.cached_features.is_none());
    }

    #[test]
    fn rejects_invalid_epsilon() {
        let bad = TdConfig {
            epsilon: -0.2,
            ..config()
        };
        assert!(QLearningAgent::new(2, 2, &bad).is_err());
    }
}
