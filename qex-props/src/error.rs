//! Tipos de erro para qex-props

use qex_core::StateError;
use thiserror::Error;

/// Resultado customizado para as checagens estruturais
pub type PropsResult<T> = Result<T, PropsError>;

/// Erros das checagens de rank de Schmidt e MUB
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropsError {
    #[error("Validation error: {0}")]
    State(#[from] StateError),

    #[error("Local dimensions {d_a}×{d_b} do not factor state dimension {dim}")]
    DimensionSplit { dim: usize, d_a: usize, d_b: usize },

    #[error("MUB check needs at least 2 bases, got {found}")]
    TooFewBases { found: usize },

    #[error("Basis {basis} has {found} vectors, expected {expected}")]
    BasisSize {
        basis: usize,
        expected: usize,
        found: usize,
    },

    #[error("Vector {vector} of basis {basis} has length {found}, expected {expected}")]
    VectorLength {
        basis: usize,
        vector: usize,
        expected: usize,
        found: usize,
    },
}
