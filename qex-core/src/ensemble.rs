//! Validação de ensembles
//!
//! An [`Ensemble`] pairs validated states of one common dimension with a
//! probability vector. It is built per call and never mutated afterwards.
//!
//! Checks run in a fixed order so that the first reported error is stable:
//! emptiness, each state (in order), dimensions, then probabilities.

use crate::config::Tolerances;
use crate::error::{ProbabilityDefect, StateError, StateResult};
use crate::state::{QuantumState, StateInput};

/// Ensemble validado: estados + probabilidades a priori
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    states: Vec<QuantumState>,
    probabilities: Vec<f64>,
    dim: usize,
}

impl Ensemble {
    /// Valida entradas e probabilidades.
    ///
    /// `probabilities = None` assigns `1/n` to each of the `n` states.
    pub fn new<I>(inputs: I, probabilities: Option<&[f64]>, tol: &Tolerances) -> StateResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<StateInput>,
    {
        let states = inputs
            .into_iter()
            .enumerate()
            .map(|(i, input)| QuantumState::from_input(input.into(), tol).map_err(|e| e.at(i)))
            .collect::<StateResult<Vec<_>>>()?;
        Self::from_states(states, probabilities, tol)
    }

    /// Monta o ensemble a partir de estados já validados
    pub fn from_states(
        states: Vec<QuantumState>,
        probabilities: Option<&[f64]>,
        tol: &Tolerances,
    ) -> StateResult<Self> {
        let first = states.first().ok_or(StateError::EmptyEnsemble)?;
        let dim = first.dim();

        if let Some((index, state)) = states.iter().enumerate().find(|(_, s)| s.dim() != dim) {
            return Err(StateError::DimensionMismatch {
                index,
                expected: dim,
                found: state.dim(),
            });
        }

        let probabilities = match probabilities {
            Some(p) => validate_probabilities(p, states.len(), tol.probability)?,
            None => uniform(states.len()),
        };

        Ok(Self {
            states,
            probabilities,
            dim,
        })
    }

    /// Número de estados
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false for a constructed ensemble.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Dimensão comum d
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn states(&self) -> &[QuantumState] {
        &self.states
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Pares (p_i, ρ_i)
    pub fn iter(&self) -> impl Iterator<Item = (f64, &QuantumState)> {
        self.probabilities.iter().copied().zip(self.states.iter())
    }
}

/// Distribuição uniforme 1/n
pub fn uniform(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}

fn validate_probabilities(p: &[f64], states: usize, tol: f64) -> StateResult<Vec<f64>> {
    let invalid = |defect| StateError::InvalidProbability { defect };

    if p.len() != states {
        return Err(invalid(ProbabilityDefect::LengthMismatch {
            states,
            probabilities: p.len(),
        }));
    }
    for (index, &value) in p.iter().enumerate() {
        if !value.is_finite() {
            return Err(invalid(ProbabilityDefect::NonFinite { index }));
        }
        if value < 0.0 {
            return Err(invalid(ProbabilityDefect::Negative { index, value }));
        }
    }
    let sum: f64 = p.iter().sum();
    if (sum - 1.0).abs() > tol {
        return Err(invalid(ProbabilityDefect::BadSum { sum }));
    }
    Ok(p.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateDefect;
    use crate::linalg::{c, CMatrix};
    use crate::states::basis;

    fn tol() -> Tolerances {
        Tolerances::default()
    }

    #[test]
    fn test_uniform_default() {
        let ens = Ensemble::new([basis(3, 0), basis(3, 1), basis(3, 2)], None, &tol()).unwrap();
        assert_eq!(ens.len(), 3);
        assert_eq!(ens.dim(), 3);
        for &p in ens.probabilities() {
            assert!((p - 1.0 / 3.0).abs() < 1e-15);
        }
    }

    #[test]
    fn test_empty_rejected() {
        let inputs: Vec<StateInput> = Vec::new();
        assert_eq!(Ensemble::new(inputs, None, &tol()), Err(StateError::EmptyEnsemble));
    }

    #[test]
    fn test_single_state_valid() {
        let ens = Ensemble::new([basis(2, 0)], None, &tol()).unwrap();
        assert_eq!(ens.probabilities(), &[1.0]);
    }

    #[test]
    fn test_dimension_mismatch_names_index() {
        let err = Ensemble::new([basis(2, 0), basis(2, 1), basis(3, 0)], None, &tol()).unwrap_err();
        assert_eq!(
            err,
            StateError::DimensionMismatch {
                index: 2,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_invalid_state_names_index() {
        let bad = StateInput::FromMatrix(CMatrix::identity(2, 2));
        let err = Ensemble::new(vec![basis(2, 0).into(), bad], None, &tol()).unwrap_err();
        match err {
            StateError::InvalidState { index, defect } => {
                assert_eq!(index, Some(1));
                assert!(matches!(defect, StateDefect::NonUnitTrace { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_probability_length_mismatch() {
        let err = Ensemble::new([basis(2, 0)], Some(&[0.5, 0.5][..]), &tol()).unwrap_err();
        assert_eq!(
            err,
            StateError::InvalidProbability {
                defect: ProbabilityDefect::LengthMismatch {
                    states: 1,
                    probabilities: 2
                }
            }
        );
    }

    #[test]
    fn test_probability_bad_sum() {
        let err = Ensemble::new([basis(2, 0), basis(2, 1)], Some(&[0.25, 0.25][..]), &tol()).unwrap_err();
        assert!(matches!(
            err,
            StateError::InvalidProbability {
                defect: ProbabilityDefect::BadSum { .. }
            }
        ));
    }

    #[test]
    fn test_probability_negative() {
        let err = Ensemble::new([basis(2, 0), basis(2, 1)], Some(&[1.5, -0.5][..]), &tol()).unwrap_err();
        assert_eq!(
            err,
            StateError::InvalidProbability {
                defect: ProbabilityDefect::Negative { index: 1, value: -0.5 }
            }
        );
    }

    #[test]
    fn test_probability_sum_within_tolerance() {
        let p = [0.5 + 1e-9, 0.5];
        assert!(Ensemble::new([basis(2, 0), basis(2, 1)], Some(&p[..]), &tol()).is_ok());
    }

    #[test]
    fn test_mixed_inputs() {
        let rho = StateInput::matrix(2, &[c(0.5, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.5, 0.0)]);
        let ens = Ensemble::new(vec![basis(2, 0).into(), rho], Some(&[0.3, 0.7][..]), &tol()).unwrap();
        let pairs: Vec<f64> = ens.iter().map(|(p, _)| p).collect();
        assert_eq!(pairs, vec![0.3, 0.7]);
    }
}
