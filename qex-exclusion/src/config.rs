//! Configuração do solver de exclusão
//!
//! ```toml
//! [tolerances]
//! probability = 1e-6
//!
//! [barrier]
//! gap_tolerance = 1e-8
//! barrier_growth = 10.0
//!
//! [acceptance]
//! optimal_gap = 1e-6
//! inaccurate_gap = 1e-4
//! ```

use std::fs;
use std::path::Path;

use qex_core::{Tolerances, ENV_TOLERANCES};
use serde::{Deserialize, Serialize};

use crate::error::{ExclusionError, ExclusionResult};

/// Parâmetros do método de barreira (backend embutido)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrierSettings {
    /// Stop once the central-path duality gap bound n·d/t falls below this
    pub gap_tolerance: f64,
    /// t inicial
    pub initial_barrier: f64,
    /// Fator de crescimento de t entre centralizações
    pub barrier_growth: f64,
    /// Centering ends when λ²/2 (Newton decrement) falls below this
    pub centering_tolerance: f64,
    /// Passos de Newton por centralização
    pub max_centering_steps: usize,
    /// Passos de Newton no total
    pub max_iterations: usize,
    /// Constante de Armijo
    pub armijo: f64,
    /// Fator de redução do passo na busca linear
    pub backtrack: f64,
    /// Menor passo aceito antes de declarar estagnação
    pub min_step: f64,
}

impl Default for BarrierSettings {
    fn default() -> Self {
        Self {
            gap_tolerance: 1e-8,
            initial_barrier: 1.0,
            barrier_growth: 10.0,
            centering_tolerance: 1e-12,
            max_centering_steps: 200,
            max_iterations: 2_000,
            armijo: 0.25,
            backtrack: 0.5,
            min_step: 1e-12,
        }
    }
}

/// Limiares usados pelo adaptador para classificar o resultado do backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptanceSettings {
    /// |primal - dual| at or below this is reported as solved-optimal
    pub optimal_gap: f64,
    /// |primal - dual| above this is a solver error; in between, solved-inaccurate
    pub inaccurate_gap: f64,
}

impl Default for AcceptanceSettings {
    fn default() -> Self {
        Self {
            optimal_gap: 1e-6,
            inaccurate_gap: 1e-4,
        }
    }
}

/// Configuração completa
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    pub tolerances: Tolerances,
    pub barrier: BarrierSettings,
    pub acceptance: AcceptanceSettings,
}

impl ExclusionConfig {
    /// Tolerâncias do ambiente (`QEX_*`, lidas uma vez), demais campos padrão
    pub fn from_env() -> Self {
        Self {
            tolerances: *ENV_TOLERANCES,
            ..Self::default()
        }
    }

    /// Parse a configuration from a TOML string
    pub fn from_toml_str(content: &str) -> ExclusionResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ExclusionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> ExclusionResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ExclusionError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> ExclusionResult<String> {
        toml::to_string_pretty(self).map_err(|e| ExclusionError::Config(e.to_string()))
    }

    pub fn validate(&self) -> ExclusionResult<()> {
        self.tolerances.validate()?;

        let b = &self.barrier;
        let positive = [
            ("barrier.gap_tolerance", b.gap_tolerance),
            ("barrier.initial_barrier", b.initial_barrier),
            ("barrier.centering_tolerance", b.centering_tolerance),
            ("barrier.min_step", b.min_step),
            ("acceptance.optimal_gap", self.acceptance.optimal_gap),
            ("acceptance.inaccurate_gap", self.acceptance.inaccurate_gap),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ExclusionError::Config(format!(
                    "`{name}` must be a finite positive number, got {value}"
                )));
            }
        }
        if !b.barrier_growth.is_finite() || b.barrier_growth <= 1.0 {
            return Err(ExclusionError::Config(format!(
                "`barrier.barrier_growth` must be greater than 1, got {}",
                b.barrier_growth
            )));
        }
        if !(b.armijo > 0.0 && b.armijo < 0.5) {
            return Err(ExclusionError::Config(format!(
                "`barrier.armijo` must lie in (0, 0.5), got {}",
                b.armijo
            )));
        }
        if !(b.backtrack > 0.0 && b.backtrack < 1.0) {
            return Err(ExclusionError::Config(format!(
                "`barrier.backtrack` must lie in (0, 1), got {}",
                b.backtrack
            )));
        }
        if b.max_centering_steps == 0 || b.max_iterations == 0 {
            return Err(ExclusionError::Config(
                "iteration limits must be at least 1".to_string(),
            ));
        }
        if self.acceptance.inaccurate_gap < self.acceptance.optimal_gap {
            return Err(ExclusionError::Config(
                "`acceptance.inaccurate_gap` must not be smaller than `acceptance.optimal_gap`"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
