//! Tipos de erro para qex-exclusion

use qex_core::StateError;
use thiserror::Error;

/// Resultado customizado para exclusão conclusiva
pub type ExclusionResult<T> = Result<T, ExclusionError>;

/// Erros que podem ocorrer no cálculo de exclusão conclusiva
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExclusionError {
    #[error("Validation error: {0}")]
    State(#[from] StateError),

    /// Only reachable when validation was bypassed; never expected otherwise.
    #[error("Solver {backend} reported the exclusion program infeasible")]
    SolverInfeasible { backend: String },

    #[error("Solver {backend} failed: {reason}")]
    SolverFailure { backend: String, reason: String },

    #[error("Exclusion solve cancelled")]
    Cancelled,

    #[error("Invalid solver configuration: {0}")]
    Config(String),
}
