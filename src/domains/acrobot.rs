//! Acrobot domain
//!
//! A two-link pendulum actuated only at the elbow joint must swing its tip
//! above the height of the first link. Dynamics are integrated with
//! fourth-order Runge-Kutta. Reward is -0.1 per step and +10 on the
//! transition into the terminal state.

use std::f64::consts::PI;

use rand::rngs::StdRng;

use crate::{
    domains::check_action,
    error::Result,
    ports::Environment,
    utils::{normalize, wrap_pos_neg_pi},
};

const LINK_MASS_1: f64 = 1.0;
const LINK_MASS_2: f64 = 1.0;
const LINK_LENGTH_1: f64 = 1.0;
const LINK_LENGTH_2: f64 = 1.0;
const LINK_COM_1: f64 = 0.5;
const LINK_COM_2: f64 = 0.5;
const LINK_INERTIA_1: f64 = 1.0;
const LINK_INERTIA_2: f64 = 1.0;
const GRAVITY: f64 = 9.8;
const TORQUE_MAX: f64 = 1.0;
const DT: f64 = 0.2;
const SIM_STEPS: usize = 10;

const THETA1_DOT_MAX: f64 = 4.0 * PI;
const THETA2_DOT_MAX: f64 = 9.0 * PI;

/// Acrobot swing-up task: 4 state variables, 3 actions (elbow torque
/// -1/0/+1).
#[derive(Debug, Clone)]
pub struct Acrobot {
    theta1: f64,
    theta2: f64,
    theta1_dot: f64,
    theta2_dot: f64,
    t: f64,
}

impl Acrobot {
    pub fn new() -> Self {
        Self {
            theta1: 0.0,
            theta2: 0.0,
            theta1_dot: 0.0,
            theta2_dot: 0.0,
            t: 0.0,
        }
    }

    /// Equations of motion: time derivative of [theta1, theta2, theta1_dot,
    /// theta2_dot] under the given elbow torque.
    fn dynamics(s: [f64; 4], torque: f64) -> [f64; 4] {
        let d1 = LINK_MASS_1 * LINK_COM_1 * LINK_COM_1
            + LINK_MASS_2
                * (LINK_LENGTH_1 * LINK_LENGTH_1
                    + LINK_COM_2 * LINK_COM_2
                    + 2.0 * LINK_LENGTH_1 * LINK_COM_2 * s[1].cos())
            + LINK_INERTIA_1
            + LINK_INERTIA_2;
        let d2 = LINK_MASS_2
            * (LINK_COM_2 * LINK_COM_2 + LINK_LENGTH_1 * LINK_COM_2 * s[1].cos())
            + LINK_INERTIA_2;
        let phi2 = LINK_MASS_2 * LINK_COM_2 * GRAVITY * (s[0] + s[1] - PI / 2.0).cos();
        let phi1 = -LINK_MASS_2 * LINK_LENGTH_1 * LINK_COM_2 * s[3] * s[3] * s[1].sin()
            - 2.0 * LINK_MASS_2 * LINK_LENGTH_1 * LINK_COM_2 * s[3] * s[2] * s[1].sin()
            + (LINK_MASS_1 * LINK_COM_1 + LINK_MASS_2 * LINK_LENGTH_1)
                * GRAVITY
                * (s[0] - PI / 2.0).cos()
            + phi2;
        let accel2 = (torque + (d2 / d1) * phi1
            - LINK_MASS_2 * LINK_LENGTH_1 * LINK_COM_2 * s[2] * s[2] * s[1].sin()
            - phi2)
            / (LINK_MASS_2 * LINK_COM_2 * LINK_COM_2 + LINK_INERTIA_2 - d2 * d2 / d1);
        let accel1 = -(d2 * accel2 + phi1) / d1;
        [s[2], s[3], accel1, accel2]
    }
}

impl Default for Acrobot {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for Acrobot {
    fn state_dim(&self) -> usize {
        4
    }

    fn num_actions(&self) -> usize {
        3
    }

    fn begin_episode(&mut self, _rng: &mut StdRng) {
        self.theta1 = 0.0;
        self.theta2 = 0.0;
        self.theta1_dot = 0.0;
        self.theta2_dot = 0.0;
        self.t = 0.0;
    }

    fn state(&self, _rng: &mut StdRng) -> Vec<f64> {
        vec![
            normalize(self.theta1, -PI, PI),
            normalize(self.theta2, -PI, PI),
            normalize(self.theta1_dot, -THETA1_DOT_MAX, THETA1_DOT_MAX),
            normalize(self.theta2_dot, -THETA2_DOT_MAX, THETA2_DOT_MAX),
        ]
    }

    fn step(&mut self, action: usize, _rng: &mut StdRng) -> Result<f64> {
        check_action(action, self.num_actions())?;
        let torque = (action as f64 - 1.0) * TORQUE_MAX;
        let h = DT / SIM_STEPS as f64;

        let mut s = [self.theta1, self.theta2, self.theta1_dot, self.theta2_dot];
        for _ in 0..SIM_STEPS {
            let k1 = Self::dynamics(s, torque);
            let k2 = Self::dynamics(rk_step(s, k1, h / 2.0), torque);
            let k3 = Self::dynamics(rk_step(s, k2, h / 2.0), torque);
            let k4 = Self::dynamics(rk_step(s, k3, h), torque);
            for j in 0..4 {
                s[j] += (h / 6.0) * (k1[j] + 2.0 * (k2[j] + k3[j]) + k4[j]);
            }
        }

        self.theta1 = wrap_pos_neg_pi(s[0]);
        self.theta2 = wrap_pos_neg_pi(s[1]);
        self.theta1_dot = s[2].clamp(-THETA1_DOT_MAX, THETA1_DOT_MAX);
        self.theta2_dot = s[3].clamp(-THETA2_DOT_MAX, THETA2_DOT_MAX);
        self.t += DT;

        if self.is_terminal() {
            Ok(10.0)
        } else {
            Ok(-0.1)
        }
    }

    fn is_terminal(&self) -> bool {
        let elbow_y = -LINK_LENGTH_1 * self.theta1.cos();
        let tip_y = elbow_y - LINK_LENGTH_2 * (self.theta1 + self.theta2).cos();
        tip_y > LINK_LENGTH_1
    }
}

/// Euler sub-step used inside the Runge-Kutta stages.
fn rk_step(s: [f64; 4], k: [f64; 4], h: f64) -> [f64; 4] {
    [
        s[0] + h * k[0],
        s[1] + h * k[1],
        s[2] + h * k[2],
        s[3] + h * k[3],
    ]
}
