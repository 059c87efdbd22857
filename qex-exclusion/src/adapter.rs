//! Adaptador do backend cônico
//!
//! Único ponto onde os términos do backend viram [`SolverStatus`]. No retry
//! happens here: an imprecise run is classified, never resubmitted.

use std::fmt;

use serde::Serialize;

use crate::backend::{BackendReport, ConicBackend, Termination};
use crate::cancel::CancelToken;
use crate::config::AcceptanceSettings;
use crate::program::ConicProgram;

/// Status do resultado do solver
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverStatus {
    Optimal,
    /// Accepted, with a numerical warning
    Inaccurate,
    Infeasible,
    Error(String),
    Cancelled,
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimal => write!(f, "solved-optimal"),
            Self::Inaccurate => write!(f, "solved-inaccurate"),
            Self::Infeasible => write!(f, "infeasible"),
            Self::Error(reason) => write!(f, "solver-error ({reason})"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Resultado efêmero de uma submissão
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub status: SolverStatus,
    /// Dual objective: a lower bound on the optimum
    pub value: f64,
    pub primal: f64,
    pub gap: f64,
    pub iterations: usize,
    pub backend: String,
}

/// Envolve um backend injetado
pub struct SolverAdapter {
    backend: Box<dyn ConicBackend>,
    acceptance: AcceptanceSettings,
}

impl fmt::Debug for SolverAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverAdapter")
            .field("backend", &self.backend.name())
            .field("acceptance", &self.acceptance)
            .finish()
    }
}

impl SolverAdapter {
    pub fn new(backend: Box<dyn ConicBackend>, acceptance: AcceptanceSettings) -> Self {
        Self {
            backend,
            acceptance,
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn acceptance(&self) -> &AcceptanceSettings {
        &self.acceptance
    }

    /// Submete o programa e classifica o relatório
    pub fn run(&self, program: &ConicProgram, cancel: &CancelToken) -> SolverOutcome {
        let report = self.backend.submit(program, cancel);
        let status = classify(&report, &self.acceptance);
        tracing::debug!(
            backend = self.backend.name(),
            termination = %report.termination,
            %status,
            "backend report classified"
        );
        SolverOutcome {
            gap: report.gap(),
            value: report.dual_objective,
            primal: report.primal_objective,
            iterations: report.iterations,
            backend: self.backend.name().to_string(),
            status,
        }
    }
}

fn classify(report: &BackendReport, acceptance: &AcceptanceSettings) -> SolverStatus {
    match &report.termination {
        Termination::Interrupted => SolverStatus::Cancelled,
        Termination::Infeasible => SolverStatus::Infeasible,
        Termination::NumericalFailure(reason) => SolverStatus::Error(reason.clone()),
        termination @ (Termination::Converged | Termination::IterationLimit | Termination::Stalled) => {
            if !report.primal_objective.is_finite() || !report.dual_objective.is_finite() {
                return SolverStatus::Error(format!("{termination} with non-finite objective"));
            }
            // the gap only certifies the dual value when Σ X_i = R holds
            if !report.residual.is_finite() {
                return SolverStatus::Error(format!("{termination} without a completeness residual"));
            }
            let gap = report.gap();
            let error = gap.max(report.residual);
            if *termination == Termination::Converged && error <= acceptance.optimal_gap {
                SolverStatus::Optimal
            } else if error <= acceptance.inaccurate_gap {
                SolverStatus::Inaccurate
            } else {
                SolverStatus::Error(format!(
                    "{termination} with duality gap {gap:.3e} and completeness residual {:.3e}",
                    report.residual
                ))
            }
        }
    }
}
