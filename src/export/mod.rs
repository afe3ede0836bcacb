//! Export of experiment results to delimited files

pub mod curves;

pub use curves::{write_learning_curves, write_sweep_outcomes};
