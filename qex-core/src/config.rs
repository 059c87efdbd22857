//! Tolerâncias numéricas
//!
//! All comparisons against exact invariants (unit norm, Hermiticity, unit
//! trace, probability sums, zero singular values) go through [`Tolerances`].
//! Defaults are fixed constants; [`Tolerances::from_env`] layers `QEX_*`
//! environment variables (and a `.env` file, if present) on top of them.
//!
//! ## Environment Variables
//! - `QEX_NORM_TOL`: vector norm tolerance (default: 1e-6)
//! - `QEX_HERMITIAN_TOL`: max |ρ - ρ†| entry (default: 1e-8)
//! - `QEX_EIGENVALUE_TOL`: most negative eigenvalue allowed (default: 1e-8)
//! - `QEX_TRACE_TOL`: |tr ρ - 1| (default: 1e-6)
//! - `QEX_PROBABILITY_TOL`: |Σ p - 1| (default: 1e-6)
//! - `QEX_RANK_TOL`: singular values at or below this count as zero (default: 1e-8)
//! - `QEX_MUB_TOL`: |⟨u|v⟩|² vs 1/d (default: 1e-6)

use std::env;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{StateError, StateResult};

pub const DEFAULT_NORM_TOL: f64 = 1e-6;
pub const DEFAULT_HERMITIAN_TOL: f64 = 1e-8;
pub const DEFAULT_EIGENVALUE_TOL: f64 = 1e-8;
pub const DEFAULT_TRACE_TOL: f64 = 1e-6;
pub const DEFAULT_PROBABILITY_TOL: f64 = 1e-6;
pub const DEFAULT_RANK_TOL: f64 = 1e-8;
pub const DEFAULT_MUB_TOL: f64 = 1e-6;

static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

fn env_f64(key: &str) -> Option<f64> {
    ensure_loaded();
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Tolerâncias usadas na validação de estados, ensembles e checagens estruturais
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// |‖v‖ - 1| aceito para vetores de estado
    pub norm: f64,
    /// Maior desvio |ρ_ij - conj(ρ_ji)| aceito
    pub hermitian: f64,
    /// Autovalor mais negativo aceito (em módulo)
    pub eigenvalue: f64,
    /// |tr ρ - 1| aceito
    pub trace: f64,
    /// |Σ p_i - 1| aceito
    pub probability: f64,
    /// Valores singulares <= rank são tratados como zero
    pub rank: f64,
    /// |(|⟨u|v⟩|² - 1/d)| aceito na checagem de MUB
    pub mub: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            norm: DEFAULT_NORM_TOL,
            hermitian: DEFAULT_HERMITIAN_TOL,
            eigenvalue: DEFAULT_EIGENVALUE_TOL,
            trace: DEFAULT_TRACE_TOL,
            probability: DEFAULT_PROBABILITY_TOL,
            rank: DEFAULT_RANK_TOL,
            mub: DEFAULT_MUB_TOL,
        }
    }
}

impl Tolerances {
    /// Defaults overridden by `QEX_*` environment variables.
    pub fn from_env() -> Self {
        let mut tol = Self::default();
        if let Some(v) = env_f64("QEX_NORM_TOL") {
            tol.norm = v;
        }
        if let Some(v) = env_f64("QEX_HERMITIAN_TOL") {
            tol.hermitian = v;
        }
        if let Some(v) = env_f64("QEX_EIGENVALUE_TOL") {
            tol.eigenvalue = v;
        }
        if let Some(v) = env_f64("QEX_TRACE_TOL") {
            tol.trace = v;
        }
        if let Some(v) = env_f64("QEX_PROBABILITY_TOL") {
            tol.probability = v;
        }
        if let Some(v) = env_f64("QEX_RANK_TOL") {
            tol.rank = v;
        }
        if let Some(v) = env_f64("QEX_MUB_TOL") {
            tol.mub = v;
        }
        tol
    }

    /// Rejects negative, NaN or infinite tolerances.
    pub fn validate(&self) -> StateResult<()> {
        let fields = [
            ("norm", self.norm),
            ("hermitian", self.hermitian),
            ("eigenvalue", self.eigenvalue),
            ("trace", self.trace),
            ("probability", self.probability),
            ("rank", self.rank),
            ("mub", self.mub),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(StateError::Config(format!(
                    "tolerance `{name}` must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Tolerâncias do ambiente, carregadas uma vez
pub static ENV_TOLERANCES: Lazy<Tolerances> = Lazy::new(Tolerances::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_in_documented_range() {
        let tol = Tolerances::default();
        assert_eq!(tol.probability, 1e-6);
        assert!(tol.hermitian <= 1e-6 && tol.hermitian >= 1e-10);
        assert!(tol.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative() {
        let tol = Tolerances {
            rank: -1.0,
            ..Tolerances::default()
        };
        assert!(matches!(tol.validate(), Err(StateError::Config(_))));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let tol: Tolerances = toml::from_str("probability = 1e-3").unwrap();
        assert_eq!(tol.probability, 1e-3);
        assert_eq!(tol.norm, DEFAULT_NORM_TOL);
    }
}
