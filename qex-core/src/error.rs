//! Tipos de erro para qex-core
//!
//! Every validation failure names the invariant that broke and, when the
//! failure belongs to one ensemble member, the index of that member.

use std::fmt;
use thiserror::Error;

/// Resultado customizado para validação de estados
pub type StateResult<T> = Result<T, StateError>;

/// Erros de validação de estados e ensembles
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    #[error("Invalid state{}: {defect}", at_index(.index))]
    InvalidState {
        index: Option<usize>,
        defect: StateDefect,
    },

    #[error("Dimension mismatch at state {index}: expected {expected}x{expected}, got {found}x{found}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Empty ensemble: at least one state is required")]
    EmptyEnsemble,

    #[error("Invalid probability vector: {defect}")]
    InvalidProbability { defect: ProbabilityDefect },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid ensemble document: {0}")]
    Document(String),
}

impl StateError {
    /// Attaches the ensemble position to a single-state or document failure.
    pub fn at(self, position: usize) -> Self {
        match self {
            StateError::InvalidState { defect, .. } => StateError::InvalidState {
                index: Some(position),
                defect,
            },
            StateError::Document(reason) => StateError::Document(format!("state {position}: {reason}")),
            other => other,
        }
    }

    pub(crate) fn state(defect: StateDefect) -> Self {
        StateError::InvalidState { index: None, defect }
    }
}

fn at_index(index: &Option<usize>) -> String {
    index.map(|i| format!(" at index {i}")).unwrap_or_default()
}

/// Propriedade violada por um estado individual
#[derive(Debug, Clone, PartialEq)]
pub enum StateDefect {
    /// Zero-length vector or 0x0 matrix
    ZeroDimension,
    NotSquare { rows: usize, cols: usize },
    NonFinite,
    NonUnitNorm { norm: f64 },
    NonHermitian { deviation: f64 },
    NegativeEigenvalue { eigenvalue: f64 },
    NonUnitTrace { trace: f64 },
}

impl fmt::Display for StateDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateDefect::ZeroDimension => write!(f, "state has dimension 0"),
            StateDefect::NotSquare { rows, cols } => {
                write!(f, "density matrix must be square, got {rows}x{cols}")
            }
            StateDefect::NonFinite => write!(f, "entries contain NaN or Inf"),
            StateDefect::NonUnitNorm { norm } => {
                write!(f, "state vector is not normalized (||v|| = {norm})")
            }
            StateDefect::NonHermitian { deviation } => {
                write!(f, "matrix is not Hermitian (max |ρ - ρ†| = {deviation:e})")
            }
            StateDefect::NegativeEigenvalue { eigenvalue } => {
                write!(f, "matrix is not positive semidefinite (eigenvalue {eigenvalue:e})")
            }
            StateDefect::NonUnitTrace { trace } => {
                write!(f, "matrix does not have unit trace (tr ρ = {trace})")
            }
        }
    }
}

/// Propriedade violada pelo vetor de probabilidades
#[derive(Debug, Clone, PartialEq)]
pub enum ProbabilityDefect {
    LengthMismatch { states: usize, probabilities: usize },
    Negative { index: usize, value: f64 },
    NonFinite { index: usize },
    BadSum { sum: f64 },
}

impl fmt::Display for ProbabilityDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbabilityDefect::LengthMismatch { states, probabilities } => write!(
                f,
                "{states} states but {probabilities} probabilities"
            ),
            ProbabilityDefect::Negative { index, value } => {
                write!(f, "probability at index {index} is negative ({value})")
            }
            ProbabilityDefect::NonFinite { index } => {
                write!(f, "probability at index {index} is not finite")
            }
            ProbabilityDefect::BadSum { sum } => {
                write!(f, "probabilities must sum to 1.0, got {sum}")
            }
        }
    }
}
