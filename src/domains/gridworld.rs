//! Grid navigation domain
//!
//! A 5x5 grid with deterministic moves. The state is a one-hot encoding of
//! the agent's cell, which together with a dependent order of zero makes
//! the linear agents exactly tabular on this domain.

use rand::rngs::StdRng;

use crate::{domains::check_action, error::Result, ports::Environment};

const SIZE: i32 = 5;

/// 5x5 grid world. Start at (0, 0), goal at (4, 4), reward -1 per step.
#[derive(Debug, Clone)]
pub struct Gridworld {
    x: i32,
    y: i32,
}

impl Gridworld {
    pub fn new() -> Self {
        Self { x: 0, y: 0 }
    }
}

impl Default for Gridworld {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for Gridworld {
    fn state_dim(&self) -> usize {
        (SIZE * SIZE) as usize
    }

    fn num_actions(&self) -> usize {
        4 // up, down, left, right
    }

    fn begin_episode(&mut self, _rng: &mut StdRng) {
        self.x = 0;
        self.y = 0;
    }

    fn state(&self, _rng: &mut StdRng) -> Vec<f64> {
        let mut result = vec![0.0; self.state_dim()];
        result[(self.x + self.y * SIZE) as usize] = 1.0;
        result
    }

    fn step(&mut self, action: usize, _rng: &mut StdRng) -> Result<f64> {
        check_action(action, self.num_actions())?;
        // (0, 0) is the bottom-left corner; moves always succeed and walls
        // clamp.
        match action {
            0 => self.y += 1,
            1 => self.y -= 1,
            2 => self.x -= 1,
            _ => self.x += 1,
        }
        self.x = self.x.clamp(0, SIZE - 1);
        self.y = self.y.clamp(0, SIZE - 1);
        Ok(-1.0)
    }

    fn is_terminal(&self) -> bool {
        self.x == SIZE - 1 && self.y == SIZE - 1
    }
}
