//! Programa cônico de exclusão
//!
//! The backends see a single program family:
//!
//! ```text
//! minimize    Σ_i Re tr(C_i X_i)
//! subject to  Σ_i X_i = R
//!             X_i ⪰ 0,  X_i Hermitian d×d
//! ```
//!
//! For conclusive exclusion `C_i = p_i ρ_i` and `R = I_d`: each `X_i` is the
//! measurement operator whose outcome rules out state `i`, and the objective
//! is the probability that the outcome names the state actually prepared.

use num_complex::Complex64;
use qex_core::linalg::{self, CMatrix};
use qex_core::Ensemble;

/// Programa SDP em blocos
#[derive(Debug, Clone, PartialEq)]
pub struct ConicProgram {
    dim: usize,
    costs: Vec<CMatrix>,
    rhs: CMatrix,
}

impl ConicProgram {
    /// Monta um programa bruto, sem validação.
    ///
    /// Backends must cope with malformed programs (no blocks, mismatched
    /// block sizes) by reporting a status, not by panicking.
    pub fn new(dim: usize, costs: Vec<CMatrix>, rhs: CMatrix) -> Self {
        Self { dim, costs, rhs }
    }

    /// Programa de exclusão conclusiva para um ensemble validado
    pub fn exclusion(ensemble: &Ensemble) -> Self {
        let dim = ensemble.dim();
        let costs = ensemble
            .iter()
            .map(|(p, state)| state.matrix() * Complex64::new(p, 0.0))
            .collect();
        Self::new(dim, costs, CMatrix::identity(dim, dim))
    }

    /// Dimensão d de cada bloco
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Número de blocos PSD (variáveis)
    pub fn block_count(&self) -> usize {
        self.costs.len()
    }

    /// Coeficientes C_i do objetivo
    pub fn costs(&self) -> &[CMatrix] {
        &self.costs
    }

    /// Lado direito R da restrição de completude
    pub fn rhs(&self) -> &CMatrix {
        &self.rhs
    }

    /// Every block and the right-hand side are `dim × dim`.
    pub fn is_well_formed(&self) -> bool {
        let square = |m: &CMatrix| m.nrows() == self.dim && m.ncols() == self.dim;
        self.dim > 0 && square(&self.rhs) && self.costs.iter().all(square)
    }

    /// Σ_i Re tr(C_i X_i)
    pub fn objective(&self, operators: &[CMatrix]) -> f64 {
        self.costs
            .iter()
            .zip(operators)
            .map(|(c, x)| linalg::trace_product(c, x).re)
            .sum()
    }

    /// max |(Σ_i X_i - R)_jk|
    pub fn completeness_residual(&self, operators: &[CMatrix]) -> f64 {
        let mut sum = -self.rhs.clone();
        for x in operators {
            sum += x;
        }
        sum.iter().map(|z| z.norm()).fold(0.0, f64::max)
    }
}
