//! Interpretação do resultado
//!
//! Turns a [`SolverOutcome`] into an [`ExclusionReport`] or an error. The
//! probability is always clipped into `[0, 1]`.

use std::fmt;

use serde::Serialize;

use crate::adapter::{SolverOutcome, SolverStatus};
use crate::error::{ExclusionError, ExclusionResult};

/// Resultado aceito, mas impreciso
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverNumericalWarning {
    pub backend: String,
    pub gap: f64,
}

impl fmt::Display for SolverNumericalWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "solver {} returned an inaccurate optimum (duality gap {:.2e})",
            self.backend, self.gap
        )
    }
}

/// Relatório da exclusão conclusiva
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExclusionReport {
    /// Optimal residual error probability, in [0, 1]
    pub probability: f64,
    pub status: SolverStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<SolverNumericalWarning>,
    pub gap: f64,
    pub iterations: usize,
    pub backend: String,
    /// True when the single-state shortcut answered without a solve
    pub fast_path: bool,
}

impl ExclusionReport {
    /// Ensemble de um único estado: valor exato 1
    pub fn trivial() -> Self {
        Self {
            probability: 1.0,
            status: SolverStatus::Optimal,
            warning: None,
            gap: 0.0,
            iterations: 0,
            backend: "fast-path".to_string(),
            fast_path: true,
        }
    }

    pub fn is_accurate(&self) -> bool {
        self.warning.is_none()
    }
}

/// Converte o resultado do adaptador
pub fn interpret(outcome: SolverOutcome) -> ExclusionResult<ExclusionReport> {
    let warning = match outcome.status {
        SolverStatus::Optimal => None,
        SolverStatus::Inaccurate => {
            let warning = SolverNumericalWarning {
                backend: outcome.backend.clone(),
                gap: outcome.gap,
            };
            tracing::warn!(value = outcome.value, "{warning}");
            Some(warning)
        }
        SolverStatus::Infeasible => {
            return Err(ExclusionError::SolverInfeasible {
                backend: outcome.backend,
            });
        }
        SolverStatus::Error(reason) => {
            return Err(ExclusionError::SolverFailure {
                backend: outcome.backend,
                reason,
            });
        }
        SolverStatus::Cancelled => return Err(ExclusionError::Cancelled),
    };

    let status = if warning.is_some() {
        SolverStatus::Inaccurate
    } else {
        SolverStatus::Optimal
    };
    Ok(ExclusionReport {
        probability: outcome.value.clamp(0.0, 1.0),
        status,
        warning,
        gap: outcome.gap,
        iterations: outcome.iterations,
        backend: outcome.backend,
        fast_path: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: SolverStatus, value: f64) -> SolverOutcome {
        SolverOutcome {
            status,
            value,
            primal: value,
            gap: 2e-5,
            iterations: 12,
            backend: "mock".to_string(),
        }
    }

    #[test]
    fn test_clipping() {
        let report = interpret(outcome(SolverStatus::Optimal, -3e-9)).unwrap();
        assert_eq!(report.probability, 0.0);
        let report = interpret(outcome(SolverStatus::Optimal, 1.0 + 1e-9)).unwrap();
        assert_eq!(report.probability, 1.0);
    }

    #[test]
    fn test_inaccurate_carries_warning() {
        let report = interpret(outcome(SolverStatus::Inaccurate, 0.3)).unwrap();
        assert!(!report.is_accurate());
        assert_eq!(report.status, SolverStatus::Inaccurate);
        assert!(report.warning.unwrap().to_string().contains("mock"));
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            interpret(outcome(SolverStatus::Infeasible, 0.0)),
            Err(ExclusionError::SolverInfeasible {
                backend: "mock".to_string()
            })
        );
        assert_eq!(
            interpret(outcome(SolverStatus::Cancelled, 0.0)),
            Err(ExclusionError::Cancelled)
        );
        assert!(matches!(
            interpret(outcome(SolverStatus::Error("boom".to_string()), 0.0)),
            Err(ExclusionError::SolverFailure { .. })
        ));
    }

    #[test]
    fn test_trivial_report() {
        let report = ExclusionReport::trivial();
        assert_eq!(report.probability, 1.0);
        assert!(report.fast_path);
        assert!(report.is_accurate());
    }
}
