//! Rank de Schmidt
//!
//! ```text
//! vector  |ψ⟩ ∈ C^{d_A·d_B}  ─reshape─▶  Ψ[a, b] = ψ[a·d_B + b]       (d_A × d_B)
//! matrix  ρ                   ─realign─▶  R[(a,a'), (b,b')] = ρ[(a,b), (a',b')]   (d_A² × d_B²)
//! ```
//!
//! The rank of `Ψ` is the Schmidt rank proper; the rank of `R` is the
//! operator Schmidt rank (1 for a product state, 4 for a two-qubit Bell
//! state).

use qex_core::linalg::{self, CMatrix, CVector};
use qex_core::{QuantumState, StateInput, Tolerances};

use crate::error::{PropsError, PropsResult};

/// Dimensões locais padrão: d_A = round(√d), d_B = d / d_A
pub fn default_split(dim: usize) -> (usize, usize) {
    let d_a = ((dim as f64).sqrt().round() as usize).max(1);
    (d_a, dim / d_a)
}

fn resolve_split(dim: usize, dims: Option<(usize, usize)>) -> PropsResult<(usize, usize)> {
    let (d_a, d_b) = dims.unwrap_or_else(|| default_split(dim));
    if d_a == 0 || d_b == 0 || d_a * d_b != dim {
        return Err(PropsError::DimensionSplit { dim, d_a, d_b });
    }
    Ok((d_a, d_b))
}

/// Matriz de coeficientes d_A × d_B de um vetor bipartido
pub fn coefficient_matrix(v: &CVector, d_a: usize, d_b: usize) -> CMatrix {
    CMatrix::from_fn(d_a, d_b, |a, b| v[a * d_b + b])
}

/// Realinhamento d_A² × d_B² de um operador bipartido
pub fn realign(rho: &CMatrix, d_a: usize, d_b: usize) -> CMatrix {
    CMatrix::from_fn(d_a * d_a, d_b * d_b, |row, col| {
        let (a, a_prime) = (row / d_a, row % d_a);
        let (b, b_prime) = (col / d_b, col % d_b);
        rho[(a * d_b + b, a_prime * d_b + b_prime)]
    })
}

/// Coeficientes de Schmidt (decrescentes) de um vetor de estado
pub fn schmidt_coefficients(
    v: &CVector,
    dims: Option<(usize, usize)>,
    tol: &Tolerances,
) -> PropsResult<Vec<f64>> {
    QuantumState::from_vector(v, tol)?;
    let (d_a, d_b) = resolve_split(v.len(), dims)?;
    Ok(linalg::singular_values(&coefficient_matrix(v, d_a, d_b)))
}

/// Rank de Schmidt de um estado (vetor ou matriz densidade).
///
/// Singular values at or below `tol.rank` count as zero; the result is at
/// least 1 for any valid state.
pub fn schmidt_rank(
    state: &StateInput,
    dims: Option<(usize, usize)>,
    tol: &Tolerances,
) -> PropsResult<usize> {
    let (d_a, d_b) = resolve_split(state.dim(), dims)?;
    let reshaped = match state {
        StateInput::FromVector(v) => {
            QuantumState::from_vector(v, tol)?;
            coefficient_matrix(v, d_a, d_b)
        }
        StateInput::FromMatrix(m) => {
            let rho = QuantumState::from_matrix(m.clone(), tol)?;
            realign(rho.matrix(), d_a, d_b)
        }
    };
    let rank = linalg::numerical_rank(&reshaped, tol.rank);
    tracing::trace!(d_a, d_b, rank, "schmidt rank");
    Ok(rank)
}
