//! Representação canônica de estados quânticos
//!
//! Inputs arrive either as a state vector or as a density matrix
//! ([`StateInput`]); both are resolved once, at ingestion, into a
//! [`QuantumState`]: a d×d Hermitian, positive semidefinite, trace-one
//! matrix. Nothing downstream distinguishes the two forms again.

use crate::config::Tolerances;
use crate::error::{StateDefect, StateError, StateResult};
use crate::linalg::{self, C64, CMatrix, CVector};

/// Entrada de estado antes da validação
#[derive(Debug, Clone, PartialEq)]
pub enum StateInput {
    /// Vetor de estado |ψ⟩ (norma 1)
    FromVector(CVector),
    /// Matriz densidade ρ
    FromMatrix(CMatrix),
}

impl StateInput {
    /// Vetor a partir de amplitudes
    pub fn vector(amplitudes: &[C64]) -> Self {
        StateInput::FromVector(CVector::from_column_slice(amplitudes))
    }

    /// Matriz a partir de entradas em ordem row-major
    pub fn matrix(dim: usize, row_major: &[C64]) -> Self {
        StateInput::FromMatrix(CMatrix::from_row_slice(dim, dim, row_major))
    }

    /// Dimensão do espaço de Hilbert implicada pela entrada
    pub fn dim(&self) -> usize {
        match self {
            StateInput::FromVector(v) => v.len(),
            StateInput::FromMatrix(m) => m.nrows(),
        }
    }
}

impl From<CVector> for StateInput {
    fn from(v: CVector) -> Self {
        StateInput::FromVector(v)
    }
}

impl From<CMatrix> for StateInput {
    fn from(m: CMatrix) -> Self {
        StateInput::FromMatrix(m)
    }
}

impl From<QuantumState> for StateInput {
    fn from(state: QuantumState) -> Self {
        StateInput::FromMatrix(state.rho)
    }
}

/// Operador densidade validado
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumState {
    rho: CMatrix,
}

impl QuantumState {
    /// Valida e canoniza uma entrada
    pub fn from_input(input: StateInput, tol: &Tolerances) -> StateResult<Self> {
        match input {
            StateInput::FromVector(v) => Self::from_vector(&v, tol),
            StateInput::FromMatrix(m) => Self::from_matrix(m, tol),
        }
    }

    /// ρ = |ψ⟩⟨ψ| for a unit vector |ψ⟩.
    pub fn from_vector(v: &CVector, tol: &Tolerances) -> StateResult<Self> {
        if v.is_empty() {
            return Err(StateError::state(StateDefect::ZeroDimension));
        }
        if !v.iter().all(|z| z.re.is_finite() && z.im.is_finite()) {
            return Err(StateError::state(StateDefect::NonFinite));
        }
        let norm = v.norm();
        if (norm - 1.0).abs() > tol.norm {
            return Err(StateError::state(StateDefect::NonUnitNorm { norm }));
        }
        Ok(Self {
            rho: linalg::outer(v),
        })
    }

    /// Accepts ρ as-is after checking Hermiticity, trace and spectrum.
    pub fn from_matrix(m: CMatrix, tol: &Tolerances) -> StateResult<Self> {
        if m.nrows() != m.ncols() {
            return Err(StateError::state(StateDefect::NotSquare {
                rows: m.nrows(),
                cols: m.ncols(),
            }));
        }
        if m.nrows() == 0 {
            return Err(StateError::state(StateDefect::ZeroDimension));
        }
        if !linalg::is_finite(&m) {
            return Err(StateError::state(StateDefect::NonFinite));
        }

        let deviation = linalg::hermitian_deviation(&m);
        if deviation > tol.hermitian {
            return Err(StateError::state(StateDefect::NonHermitian { deviation }));
        }

        let trace = m.trace().re;
        if (trace - 1.0).abs() > tol.trace {
            return Err(StateError::state(StateDefect::NonUnitTrace { trace }));
        }

        // Ascending order: the first eigenvalue is the most negative one.
        let min_eigenvalue = linalg::hermitian_eigenvalues(&m)
            .first()
            .copied()
            .unwrap_or(0.0);
        if min_eigenvalue < -tol.eigenvalue {
            return Err(StateError::state(StateDefect::NegativeEigenvalue {
                eigenvalue: min_eigenvalue,
            }));
        }

        Ok(Self { rho: m })
    }

    /// Dimensão d
    pub fn dim(&self) -> usize {
        self.rho.nrows()
    }

    /// Matriz densidade
    pub fn matrix(&self) -> &CMatrix {
        &self.rho
    }

    /// Consome o estado retornando a matriz
    pub fn into_matrix(self) -> CMatrix {
        self.rho
    }

    /// tr(ρ²)
    pub fn purity(&self) -> f64 {
        linalg::trace_product(&self.rho, &self.rho).re
    }

    /// Estado puro dentro da tolerância?
    pub fn is_pure(&self, tol: f64) -> bool {
        (self.purity() - 1.0).abs() <= tol
    }
}
