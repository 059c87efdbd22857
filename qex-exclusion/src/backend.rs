//! Interface mínima de backend cônico
//!
//! A backend receives a [`ConicProgram`] and reports how it terminated plus
//! the objective values it reached. It speaks its own vocabulary
//! ([`Termination`]); translating that into the crate's status taxonomy is
//! the adapter's job and happens nowhere else.

use std::fmt;

use qex_core::CMatrix;

use crate::cancel::CancelToken;
use crate::program::ConicProgram;

/// Como o backend terminou
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// Target accuracy reached
    Converged,
    /// Iteration budget exhausted first
    IterationLimit,
    /// No further progress possible at working precision
    Stalled,
    /// No point satisfies the equality constraint
    Infeasible,
    /// Falha numérica irrecuperável
    NumericalFailure(String),
    /// Cancelamento observado
    Interrupted,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged => write!(f, "converged"),
            Self::IterationLimit => write!(f, "iteration limit reached"),
            Self::Stalled => write!(f, "stalled"),
            Self::Infeasible => write!(f, "infeasible"),
            Self::NumericalFailure(reason) => write!(f, "numerical failure: {reason}"),
            Self::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Relatório bruto do backend
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReport {
    pub termination: Termination,
    pub primal_objective: f64,
    /// Certified lower bound on the optimum when finite
    pub dual_objective: f64,
    /// max |Σ X_i - R|, NaN without operators
    pub residual: f64,
    /// Passos de Newton (ou equivalente) executados
    pub iterations: usize,
    /// Primal operators X_i, empty unless the solve produced them
    pub operators: Vec<CMatrix>,
}

impl BackendReport {
    /// Relatório sem solução utilizável
    pub fn terminated(termination: Termination, iterations: usize) -> Self {
        Self {
            termination,
            primal_objective: f64::NAN,
            dual_objective: f64::NAN,
            residual: f64::NAN,
            iterations,
            operators: Vec::new(),
        }
    }

    /// |primal - dual|
    pub fn gap(&self) -> f64 {
        (self.primal_objective - self.dual_objective).abs()
    }
}

/// Backend de SDP substituível
pub trait ConicBackend: Send + Sync {
    /// Nome para logs e relatórios
    fn name(&self) -> &str;

    /// Solve `program`, polling `cancel` between iterations.
    fn submit(&self, program: &ConicProgram, cancel: &CancelToken) -> BackendReport;
}
