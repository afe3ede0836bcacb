//! CLI infrastructure for the tdlab toolkit
//!
//! This module provides the command-line interface for running experiments
//! and hyperparameter sweeps over the shipped domains.

pub mod commands;
