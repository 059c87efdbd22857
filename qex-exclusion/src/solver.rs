//! Orquestração da exclusão conclusiva
//!
//! ```text
//! states ─▶ Ensemble::new ─▶ fast path (n = 1) ─────────────────▶ 1
//!                       └──▶ ConicProgram ─▶ SolverAdapter ─▶ interpret ─▶ [0, 1]
//! ```
//!
//! Validation always completes before a program is built, so invalid input
//! never reaches a backend.

use qex_core::{Ensemble, StateInput};

use crate::adapter::SolverAdapter;
use crate::backend::ConicBackend;
use crate::barrier::BarrierBackend;
use crate::cancel::CancelToken;
use crate::config::ExclusionConfig;
use crate::error::{ExclusionError, ExclusionResult};
use crate::interpret::{interpret, ExclusionReport};
use crate::program::ConicProgram;

/// Solver de exclusão conclusiva
#[derive(Debug)]
pub struct ExclusionSolver {
    config: ExclusionConfig,
    adapter: SolverAdapter,
}

impl Default for ExclusionSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ExclusionSolver {
    /// Configuração padrão + backend de barreira
    pub fn new() -> Self {
        let config = ExclusionConfig::default();
        Self {
            adapter: SolverAdapter::new(Box::new(BarrierBackend::new(config.barrier)), config.acceptance),
            config,
        }
    }

    /// Backend de barreira com a configuração dada
    pub fn with_config(config: ExclusionConfig) -> ExclusionResult<Self> {
        Self::with_backend(config, Box::new(BarrierBackend::new(config.barrier)))
    }

    /// Injeta um backend arbitrário
    pub fn with_backend(config: ExclusionConfig, backend: Box<dyn ConicBackend>) -> ExclusionResult<Self> {
        config.validate()?;
        Ok(Self {
            adapter: SolverAdapter::new(backend, config.acceptance),
            config,
        })
    }

    pub fn config(&self) -> &ExclusionConfig {
        &self.config
    }

    pub fn backend_name(&self) -> &str {
        self.adapter.backend_name()
    }

    /// Valida e resolve
    pub fn solve<I>(&self, states: I, probabilities: Option<&[f64]>) -> ExclusionResult<ExclusionReport>
    where
        I: IntoIterator,
        I::Item: Into<StateInput>,
    {
        self.solve_with_cancel(states, probabilities, &CancelToken::new())
    }

    pub fn solve_with_cancel<I>(
        &self,
        states: I,
        probabilities: Option<&[f64]>,
        cancel: &CancelToken,
    ) -> ExclusionResult<ExclusionReport>
    where
        I: IntoIterator,
        I::Item: Into<StateInput>,
    {
        let ensemble = Ensemble::new(states, probabilities, &self.config.tolerances)?;
        self.solve_ensemble(&ensemble, cancel)
    }

    /// Resolve um ensemble já validado
    pub fn solve_ensemble(&self, ensemble: &Ensemble, cancel: &CancelToken) -> ExclusionResult<ExclusionReport> {
        let span = tracing::info_span!(
            "exclusion",
            states = ensemble.len(),
            dim = ensemble.dim(),
            backend = self.adapter.backend_name()
        );
        let _guard = span.enter();

        if cancel.is_cancelled() {
            return Err(ExclusionError::Cancelled);
        }
        if ensemble.len() == 1 {
            tracing::debug!("single state, skipping optimization");
            return Ok(ExclusionReport::trivial());
        }

        let program = ConicProgram::exclusion(ensemble);
        let report = interpret(self.adapter.run(&program, cancel))?;
        tracing::info!(
            probability = report.probability,
            iterations = report.iterations,
            gap = report.gap,
            "exclusion solved"
        );
        Ok(report)
    }

    /// Apenas o valor
    pub fn probability<I>(&self, states: I, probabilities: Option<&[f64]>) -> ExclusionResult<f64>
    where
        I: IntoIterator,
        I::Item: Into<StateInput>,
    {
        self.solve(states, probabilities).map(|report| report.probability)
    }
}

/// Probabilidade ótima de exclusão conclusiva com a configuração padrão.
///
/// `probabilities = None` weights the states uniformly.
///
/// ```
/// use qex_core::bell;
/// use qex_exclusion::conclusive_state_exclusion;
///
/// let states: Vec<_> = (0..3).filter_map(bell).collect();
/// let value = conclusive_state_exclusion(states, None).unwrap();
/// assert!(value < 1e-6);
/// ```
pub fn conclusive_state_exclusion<I>(states: I, probabilities: Option<&[f64]>) -> ExclusionResult<f64>
where
    I: IntoIterator,
    I::Item: Into<StateInput>,
{
    ExclusionSolver::new().probability(states, probabilities)
}
