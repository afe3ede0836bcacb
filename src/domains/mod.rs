//! Fixed simulation domains
//!
//! Four classic control environments implementing the
//! [`Environment`](crate::ports::Environment) port: a 5x5 grid navigation
//! task, pole balancing on a cart, the under-powered mountain car, and the
//! two-link acrobot. All four are deterministic; their states are reported
//! normalized to `[0, 1]` per element.

pub mod acrobot;
pub mod cart_pole;
pub mod gridworld;
pub mod mountain_car;

pub use acrobot::Acrobot;
pub use cart_pole::CartPole;
pub use gridworld::Gridworld;
pub use mountain_car::MountainCar;

use crate::error::{Error, Result};

/// Shared precondition for `step`: reject out-of-range actions instead of
/// clamping them, so a buggy caller fails loudly.
pub(crate) fn check_action(action: usize, num_actions: usize) -> Result<()> {
    if action >= num_actions {
        return Err(Error::InvalidAction {
            action,
            num_actions,
        });
    }
    Ok(())
}
