//! CSV export for learning curves and sweep outcomes
//!
//! Learning curves are written one row per episode index, with a mean
//! column and a standard-deviation column (for error bars) per agent.

use std::path::Path;

use crate::{
    error::Result,
    pipeline::{LearningCurve, SweepOutcome},
};

/// Write one or more named learning curves to a CSV file.
///
/// Columns: `episode`, then the mean discounted return per agent, then the
/// standard deviation per agent. All curves must cover the same number of
/// episodes; rows are truncated to the shortest curve if they do not.
pub fn write_learning_curves<P: AsRef<Path>>(
    path: P,
    curves: &[(String, LearningCurve)],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["episode".to_string()];
    header.extend(curves.iter().map(|(name, _)| name.clone()));
    header.extend(curves.iter().map(|(name, _)| format!("stddev {name}")));
    writer.write_record(&header)?;

    let episodes = curves
        .iter()
        .map(|(_, curve)| curve.mean.len())
        .min()
        .unwrap_or(0);
    for episode in 0..episodes {
        let mut record = vec![episode.to_string()];
        for (_, curve) in curves {
            record.push(curve.mean[episode].to_string());
        }
        for (_, curve) in curves {
            record.push(curve.variance[episode].sqrt().to_string());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write sweep outcomes to a CSV file, one row per configuration.
pub fn write_sweep_outcomes<P: AsRef<Path>>(path: P, outcomes: &[SweepOutcome]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "alpha",
        "gamma",
        "epsilon",
        "independent order",
        "dependent order",
        "final mean",
        "final stddev",
    ])?;
    for outcome in outcomes {
        writer.write_record(&[
            outcome.config.alpha.to_string(),
            outcome.config.gamma.to_string(),
            outcome.config.epsilon.to_string(),
            outcome.config.independent_order.to_string(),
            outcome.config.dependent_order.to_string(),
            outcome.final_mean.to_string(),
            outcome.final_std_dev.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
