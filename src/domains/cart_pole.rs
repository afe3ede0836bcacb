//! Pole balancing domain
//!
//! A pole hinged to a cart on a bounded track. The controller pushes the
//! cart left or right with a fixed-magnitude force; the episode ends when
//! the pole falls past a threshold angle, the cart leaves the track, or the
//! time limit elapses. Reward is +1 per step, so longer balancing earns
//! more.

use std::f64::consts::PI;

use rand::rngs::StdRng;

use crate::{
    domains::check_action,
    error::Result,
    ports::Environment,
    utils::{normalize, sign, wrap_pos_neg_pi},
};

const SIM_STEPS: usize = 10;
const DT: f64 = 0.02;
const FORCE_MAX: f64 = 10.0;
const POLE_HALF_LENGTH: f64 = 0.5;
const GRAVITY: f64 = 9.8;
const POLE_MASS: f64 = 0.1;
const CART_MASS: f64 = 1.0;
const CART_FRICTION: f64 = 0.0005;
const POLE_FRICTION: f64 = 0.000002;

// State variable ranges used for clamping and normalization.
const X_MIN: f64 = -2.4;
const X_MAX: f64 = 2.4;
const V_MIN: f64 = -10.0;
const V_MAX: f64 = 10.0;
const THETA_MIN: f64 = -PI / 12.0;
const THETA_MAX: f64 = PI / 12.0;
const OMEGA_MIN: f64 = -PI;
const OMEGA_MAX: f64 = PI;

// The failure angle is tighter than the normalization range.
const THETA_FAIL: f64 = PI / 15.0;
const TIME_LIMIT: f64 = 20.0 + 10.0 * DT;

/// Cart-pole balancing task: 4 state variables, 2 actions (push left or
/// right).
#[derive(Debug, Clone)]
pub struct CartPole {
    x: f64,
    v: f64,
    theta: f64,
    omega: f64,
    t: f64,
}

impl CartPole {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            v: 0.0,
            theta: 0.0,
            omega: 0.0,
            t: 0.0,
        }
    }
}

impl Default for CartPole {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for CartPole {
    fn state_dim(&self) -> usize {
        4
    }

    fn num_actions(&self) -> usize {
        2
    }

    fn begin_episode(&mut self, _rng: &mut StdRng) {
        self.x = 0.0;
        self.v = 0.0;
        self.theta = 0.0;
        self.omega = 0.0;
        self.t = 0.0;
    }

    fn state(&self, _rng: &mut StdRng) -> Vec<f64> {
        vec![
            normalize(self.x, X_MIN, X_MAX),
            normalize(self.v, V_MIN, V_MAX),
            normalize(self.theta, THETA_MIN, THETA_MAX),
            normalize(self.omega, OMEGA_MIN, OMEGA_MAX),
        ]
    }

    fn step(&mut self, action: usize, _rng: &mut StdRng) -> Result<f64> {
        check_action(action, self.num_actions())?;
        let force = (2.0 * action as f64 - 1.0) * FORCE_MAX;
        let sub_dt = DT / SIM_STEPS as f64;
        let total_mass = POLE_MASS + CART_MASS;

        for _ in 0..SIM_STEPS {
            let cos_theta = self.theta.cos();
            let sin_theta = self.theta.sin();
            let omega_dot = (GRAVITY * sin_theta
                + cos_theta
                    * (CART_FRICTION * sign(self.v)
                        - force
                        - POLE_MASS * POLE_HALF_LENGTH * self.omega * self.omega * sin_theta)
                    / total_mass
                - POLE_FRICTION * self.omega / (POLE_MASS * POLE_HALF_LENGTH))
                / (POLE_HALF_LENGTH
                    * (4.0 / 3.0 - POLE_MASS / total_mass * cos_theta * cos_theta));
            let v_dot = (force
                + POLE_MASS
                    * POLE_HALF_LENGTH
                    * (self.omega * self.omega * sin_theta - omega_dot * cos_theta)
                - CART_FRICTION * sign(self.v))
                / total_mass;

            self.theta += sub_dt * self.omega;
            self.omega += sub_dt * omega_dot;
            self.x += sub_dt * self.v;
            self.v += sub_dt * v_dot;
            self.theta = wrap_pos_neg_pi(self.theta);
            self.t += sub_dt;
        }

        self.x = self.x.clamp(X_MIN, X_MAX);
        self.v = self.v.clamp(V_MIN, V_MAX);
        self.theta = self.theta.clamp(THETA_MIN, THETA_MAX);
        self.omega = self.omega.clamp(OMEGA_MIN, OMEGA_MAX);

        Ok(1.0)
    }

    fn is_terminal(&self) -> bool {
        self.theta.abs() > THETA_FAIL || self.x.abs() >= X_MAX || self.t >= TIME_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn starts_balanced_and_non_terminal() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut env = CartPole::new();
        env.begin_episode(&mut rng);
        assert!(!env.is_terminal());
        // The all-zero physical state normalizes to the interval midpoint.
        let state = env.state(&mut rng);
        assert_eq!(state.len(), 4);
        for s in state {
            assert!((s - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_push_eventually_fails() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut env = CartPole::new();
        env.begin_episode(&mut rng);
        let mut steps = 0;
        while !env.is_terminal() {
            assert_eq!(env.step(1, &mut rng).unwrap(), 1.0);
            steps += 1;
            assert!(steps < 2000, "constant push should topple the pole");
        }
        // The pole falls long before the time limit.
        assert!(env.theta.abs() > THETA_FAIL);
    }

    #[test]
    fn time_limit_terminates_long_episodes() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut env = CartPole::new();
        env.begin_episode(&mut rng);
        env.t = TIME_LIMIT;
        assert!(env.is_terminal());
    }

    #[test]
    fn state_stays_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut env = CartPole::new();
        env.begin_episode(&mut rng);
        for i in 0..50 {
            if env.is_terminal() {
                break;
            }
            env.step(i % 2, &mut rng).unwrap();
            for s in env.state(&mut rng) {
                assert!((0.0..=1.0).contains(&s));
            }
        }
    }

    #[test]
    fn rejects_out_of_range_action() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut env = CartPole::new();
        env.begin_episode(&mut rng);
        assert!(env.step(2, &mut rng).is_err());
    }
}
