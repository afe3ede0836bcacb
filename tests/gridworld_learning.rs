//! End-to-end learning tests on the grid domain
//!
//! The 5x5 grid's one-hot state with a dependent order of zero makes the
//! linear agents exactly tabular, which gives sharp expectations: the
//! representation can encode any tabular value function, and both agents
//! should improve substantially over an agent lifetime.

use tdlab::{
    Experiment, ExperimentConfig, FourierBasis, LinearQ, QLearningAgent, SarsaAgent, TdConfig,
    domains::Gridworld,
};

#[test]
fn one_hot_basis_can_represent_an_arbitrary_tabular_value_function() {
    let cells = 25;
    let basis = FourierBasis::new(cells, 1, 0).unwrap();
    // Features for a one-hot state are 1 everywhere except the matching
    // per-dimension term, which flips to -1. Solving that linear system:
    // w[j+1] = -v[j] / 2 and the constant weight cancels the sum.
    let targets: Vec<f64> = (0..cells).map(|j| (j as f64) * 1.5 - 7.0).collect();

    let mut weights = vec![0.0; basis.feature_count()];
    for (j, &v) in targets.iter().enumerate() {
        weights[j + 1] = -v / 2.0;
    }
    weights[0] = -weights.iter().sum::<f64>();

    let mut model = LinearQ::new(1, basis.feature_count());
    for (i, &w) in weights.iter().enumerate() {
        let mut unit = vec![0.0; basis.feature_count()];
        unit[i] = 1.0;
        model.accumulate(0, w, &unit);
    }

    for (j, &v) in targets.iter().enumerate() {
        let mut state = vec![0.0; cells];
        state[j] = 1.0;
        let q = model.value(0, &basis.project(&state));
        assert!(
            (q - v).abs() < 1e-9,
            "cell {j}: represented {q}, wanted {v}"
        );
    }
}

fn tabular_config() -> TdConfig {
    TdConfig {
        alpha: 0.1,
        gamma: 1.0,
        epsilon: 0.05,
        independent_order: 1,
        dependent_order: 0,
    }
}

fn learning_experiment() -> ExperimentConfig {
    ExperimentConfig {
        trials: 4,
        episodes: 50,
        max_steps: 1_000,
        discount: 1.0,
    }
}

fn late_minus_early(curve: &tdlab::LearningCurve) -> (f64, f64) {
    let early: f64 = curve.mean[..5].iter().sum::<f64>() / 5.0;
    let late: f64 = curve.mean[curve.mean.len() - 5..].iter().sum::<f64>() / 5.0;
    (early, late)
}

#[test]
fn q_learning_improves_on_the_grid() {
    let env = Gridworld::new();
    let (state_dim, num_actions) = env_dims(&env);
    let agent = QLearningAgent::new(state_dim, num_actions, &tabular_config()).unwrap();
    let curve = Experiment::new(learning_experiment())
        .run(&agent, &env)
        .unwrap();

    let (early, late) = late_minus_early(&curve);
    assert!(
        late > early,
        "late episodes ({late:.1}) should beat early episodes ({early:.1})"
    );
    // The optimal policy needs 8 steps; a trained greedy-ish agent should
    // be well clear of the random-walk regime.
    assert!(late > -60.0, "late-episode mean {late:.1} still random-walk-like");
}

#[test]
fn sarsa_improves_on_the_grid() {
    let env = Gridworld::new();
    let (state_dim, num_actions) = env_dims(&env);
    let agent = SarsaAgent::new(state_dim, num_actions, &tabular_config()).unwrap();
    let curve = Experiment::new(learning_experiment())
        .run(&agent, &env)
        .unwrap();

    let (early, late) = late_minus_early(&curve);
    assert!(
        late > early,
        "late episodes ({late:.1}) should beat early episodes ({early:.1})"
    );
    assert!(late > -60.0, "late-episode mean {late:.1} still random-walk-like");
}

fn env_dims(env: &Gridworld) -> (usize, usize) {
    use tdlab::Environment;
    (env.state_dim(), env.num_actions())
}
