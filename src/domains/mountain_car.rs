//! Mountain car domain
//!
//! An under-powered car in a valley must rock back and forth to build
//! enough momentum to reach the right hilltop. Reward is -1 per step, so
//! shorter episodes score higher.

use rand::rngs::StdRng;

use crate::{domains::check_action, error::Result, ports::Environment, utils::normalize};

const X_MIN: f64 = -1.2;
const X_MAX: f64 = 0.5;
const V_MIN: f64 = -0.07;
const V_MAX: f64 = 0.07;

/// Mountain car task: 2 state variables (position, velocity), 3 actions
/// (reverse, coast, forward).
#[derive(Debug, Clone)]
pub struct MountainCar {
    x: f64,
    v: f64,
}

impl MountainCar {
    pub fn new() -> Self {
        Self { x: -0.5, v: 0.0 }
    }
}

impl Default for MountainCar {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for MountainCar {
    fn state_dim(&self) -> usize {
        2
    }

    fn num_actions(&self) -> usize {
        3
    }

    fn begin_episode(&mut self, _rng: &mut StdRng) {
        self.x = -0.5;
        self.v = 0.0;
    }

    fn state(&self, _rng: &mut StdRng) -> Vec<f64> {
        vec![
            normalize(self.x, X_MIN, X_MAX),
            normalize(self.v, V_MIN, V_MAX),
        ]
    }

    fn step(&mut self, action: usize, _rng: &mut StdRng) -> Result<f64> {
        check_action(action, self.num_actions())?;
        let thrust = action as f64 - 1.0; // {-1, 0, 1}
        self.v = (self.v + 0.001 * thrust - 0.0025 * (3.0 * self.x).cos()).clamp(V_MIN, V_MAX);
        self.x += self.v;
        if self.x < X_MIN {
            self.x = X_MIN;
            self.v = 0.0; // inelastic collision with the left wall
        }
        if self.x > X_MAX {
            self.x = X_MAX;
        }
        Ok(-1.0)
    }

    fn is_terminal(&self) -> bool {
        self.x >= X_MAX
    }
}
