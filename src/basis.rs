//! Fourier basis feature expansion
//!
//! Maps a normalized state vector to a fixed-length feature vector of
//! cosines of integer-frequency combinations of the state dimensions. A
//! linear model over these features can approximate smooth value functions;
//! the dependent order controls coupling across dimensions while the
//! independent order adds cheap per-dimension resolution.

use std::f64::consts::PI;

use crate::{
    error::{Error, Result},
    utils::dot,
};

/// Fourier basis over a fixed state dimension.
///
/// The coefficient table is built once at construction and never changes.
/// It has two regions: a coupled region enumerating every integer frequency
/// combination in `[0, dependent_order]^state_dim`, and an independent
/// region adding single-dimension terms of order
/// `dependent_order+1 ..= independent_order` for each dimension. Terms that
/// would appear in both regions are counted once.
///
/// With `dependent_order = 0` and a one-hot input vector the projection
/// degenerates to a tabular representation: each feature responds to exactly
/// one input cell. The grid domain relies on this.
#[derive(Debug, Clone)]
pub struct FourierBasis {
    state_dim: usize,
    coefficients: Vec<Vec<f64>>,
}

impl FourierBasis {
    /// Build the basis for the given state dimension and orders.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a zero state dimension
    /// and [`Error::InvalidBasisOrders`] when the independent order is below
    /// the dependent order (the independent region would be negative-sized).
    pub fn new(
        state_dim: usize,
        independent_order: usize,
        dependent_order: usize,
    ) -> Result<Self> {
        if state_dim == 0 {
            return Err(Error::InvalidConfiguration {
                message: "Fourier basis requires a state dimension of at least 1".to_string(),
            });
        }
        if independent_order < dependent_order {
            return Err(Error::InvalidBasisOrders {
                independent: independent_order,
                dependent: dependent_order,
            });
        }

        let coupled_terms = (dependent_order + 1).pow(state_dim as u32);
        let independent_terms = (independent_order - dependent_order) * state_dim;
        let mut coefficients = Vec::with_capacity(coupled_terms + independent_terms);

        // Coupled region: every combination in [0, dependent_order]^state_dim,
        // enumerated in little-endian mixed-radix order.
        let mut counter = vec![0.0; state_dim];
        for _ in 0..coupled_terms {
            coefficients.push(counter.clone());
            increment_counter(&mut counter, dependent_order);
        }

        // Independent region: higher single-dimension frequencies. Starting
        // at dependent_order + 1 keeps the two regions disjoint.
        for dim in 0..state_dim {
            for order in dependent_order + 1..=independent_order {
                let mut term = vec![0.0; state_dim];
                term[dim] = order as f64;
                coefficients.push(term);
            }
        }

        Ok(Self {
            state_dim,
            coefficients,
        })
    }

    /// Number of features produced by [`project`](Self::project).
    ///
    /// Equals `d*i + (d0+1)^d - d*min(i, d0)` for state dimension `d`,
    /// independent order `i`, and dependent order `d0`.
    pub fn feature_count(&self) -> usize {
        self.coefficients.len()
    }

    /// State dimension this basis was built for.
    pub fn state_dim(&self) -> usize {
        self.state_dim
    }

    /// Project a normalized state vector into feature space.
    ///
    /// Feature `i` is `cos(PI * dot(c_i, state))`. Pure and deterministic.
    /// The state length must match the basis state dimension.
    pub fn project(&self, state: &[f64]) -> Vec<f64> {
        assert_eq!(
            state.len(),
            self.state_dim,
            "state length {} does not match basis dimension {}",
            state.len(),
            self.state_dim
        );
        self.coefficients
            .iter()
            .map(|c| (PI * dot(c, state)).cos())
            .collect()
    }
}

/// Increment a little-endian counter in base `max_digit + 1`.
fn increment_counter(digits: &mut [f64], max_digit: usize) {
    for digit in digits.iter_mut() {
        *digit += 1.0;
        if *digit <= max_digit as f64 {
            break;
        }
        *digit = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_count(d: usize, i: usize, d0: usize) -> usize {
        d * i + (d0 + 1).pow(d as u32) - d * i.min(d0)
    }

    #[test]
    fn feature_count_matches_closed_form() {
        for (d, i, d0) in [(1, 3, 0), (2, 5, 2), (2, 1, 1), (4, 4, 0), (3, 3, 3)] {
            let basis = FourierBasis::new(d, i, d0).unwrap();
            assert_eq!(
                basis.feature_count(),
                expected_count(d, i, d0),
                "count mismatch for d={d}, i={i}, d0={d0}"
            );
        }
    }

    #[test]
    fn projection_has_feature_count_length() {
        let basis = FourierBasis::new(2, 3, 1).unwrap();
        let features = basis.project(&[0.25, 0.75]);
        assert_eq!(features.len(), basis.feature_count());
    }

    #[test]
    fn projection_is_deterministic() {
        let basis = FourierBasis::new(3, 4, 2).unwrap();
        let state = [0.1, 0.6, 0.9];
        assert_eq!(basis.project(&state), basis.project(&state));
    }

    #[test]
    fn coupled_region_enumerates_mixed_radix_order() {
        let basis = FourierBasis::new(2, 1, 1).unwrap();
        // [0,1]^2 in little-endian order, no independent terms since i == d0.
        assert_eq!(
            basis.coefficients,
            vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 1.0],
            ]
        );
    }

    #[test]
    fn constant_term_is_always_one() {
        let basis = FourierBasis::new(2, 2, 1).unwrap();
        let features = basis.project(&[0.3, 0.8]);
        // The all-zero coefficient row yields cos(0) = 1.
        assert_eq!(features[0], 1.0);
    }

    #[test]
    fn independent_terms_use_single_dimensions() {
        let basis = FourierBasis::new(2, 3, 1).unwrap();
        // 4 coupled terms, then per-dimension orders 2 and 3.
        assert_eq!(basis.coefficients[4], vec![2.0, 0.0]);
        assert_eq!(basis.coefficients[5], vec![3.0, 0.0]);
        assert_eq!(basis.coefficients[6], vec![0.0, 2.0]);
        assert_eq!(basis.coefficients[7], vec![0.0, 3.0]);
    }

    #[test]
    fn tabular_degenerate_case_separates_one_hot_states() {
        // dependent_order = 0 with one-hot inputs: feature j+1 is
        // cos(PI * state[j]), so each state flips a distinct feature sign.
        let n = 4;
        let basis = FourierBasis::new(n, 1, 0).unwrap();
        for cell in 0..n {
            let mut state = vec![0.0; n];
            state[cell] = 1.0;
            let features = basis.project(&state);
            for (j, &f) in features.iter().skip(1).enumerate() {
                let expected = if j == cell { -1.0 } else { 1.0 };
                assert!((f - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn rejects_independent_below_dependent() {
        assert!(matches!(
            FourierBasis::new(2, 1, 3),
            Err(Error::InvalidBasisOrders {
                independent: 1,
                dependent: 3
            })
        ));
    }

    #[test]
    fn rejects_zero_state_dimension() {
        assert!(matches!(
            FourierBasis::new(0, 2, 1),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
