//! Bases mutuamente não-enviesadas (MUB)
//!
//! Bases `{u_i}` and `{v_j}` of C^d are mutually unbiased when
//! `|⟨u_i|v_j⟩|² = 1/d` for every pair of vectors across them.

use qex_core::{CVector, Tolerances};

use crate::error::{PropsError, PropsResult};

/// Checa a forma da entrada e devolve a dimensão d
fn check_shape(bases: &[Vec<CVector>]) -> PropsResult<usize> {
    if bases.len() < 2 {
        return Err(PropsError::TooFewBases { found: bases.len() });
    }
    let dim = bases[0].first().map(|v| v.len()).unwrap_or(0);
    if dim == 0 {
        return Err(PropsError::BasisSize {
            basis: 0,
            expected: 1,
            found: bases[0].len(),
        });
    }
    for (basis, group) in bases.iter().enumerate() {
        if group.len() != dim {
            return Err(PropsError::BasisSize {
                basis,
                expected: dim,
                found: group.len(),
            });
        }
        if let Some((vector, v)) = group.iter().enumerate().find(|(_, v)| v.len() != dim) {
            return Err(PropsError::VectorLength {
                basis,
                vector,
                expected: dim,
                found: v.len(),
            });
        }
    }
    Ok(dim)
}

/// ⟨u_i|u_j⟩ = δ_ij dentro da tolerância
pub fn is_orthonormal(group: &[CVector], tol: f64) -> bool {
    group.iter().enumerate().all(|(i, u)| {
        group.iter().enumerate().all(|(j, v)| {
            let expected = if i == j { 1.0 } else { 0.0 };
            (u.dotc(v).norm() - expected).abs() <= tol
        })
    })
}

/// Todas as bases são ortonormais e mutuamente não-enviesadas?
///
/// Malformed input (fewer than two bases, a basis without exactly d
/// vectors, a vector of the wrong length) is an error; a basis that is not
/// orthonormal makes the answer `false`.
pub fn is_mub(bases: &[Vec<CVector>], tol: &Tolerances) -> PropsResult<bool> {
    let dim = check_shape(bases)?;
    let eps = tol.mub;

    if let Some(index) = bases.iter().position(|group| !is_orthonormal(group, eps)) {
        tracing::debug!(basis = index, "basis is not orthonormal");
        return Ok(false);
    }

    let target = 1.0 / dim as f64;
    for (i, first) in bases.iter().enumerate() {
        for (j, second) in bases.iter().enumerate().skip(i + 1) {
            let unbiased = first
                .iter()
                .all(|u| second.iter().all(|v| (u.dotc(v).norm_sqr() - target).abs() <= eps));
            if !unbiased {
                tracing::debug!(first = i, second = j, "bases are biased");
                return Ok(false);
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qex_core::linalg::c;
    use qex_core::basis;

    fn fourier(dim: usize) -> Vec<CVector> {
        let omega = std::f64::consts::TAU / dim as f64;
        let norm = 1.0 / (dim as f64).sqrt();
        (0..dim)
            .map(|k| {
                CVector::from_iterator(
                    dim,
                    (0..dim).map(|j| c(0.0, omega * (j * k) as f64).exp() * norm),
                )
            })
            .collect()
    }

    #[test]
    fn test_computational_and_fourier_dim_3() {
        let standard: Vec<CVector> = (0..3).map(|i| basis(3, i)).collect();
        assert!(is_mub(&[standard, fourier(3)], &Tolerances::default()).unwrap());
    }

    #[test]
    fn test_same_basis_twice_is_biased() {
        let standard: Vec<CVector> = (0..2).map(|i| basis(2, i)).collect();
        assert!(!is_mub(&[standard.clone(), standard], &Tolerances::default()).unwrap());
    }

    #[test]
    fn test_non_orthonormal_group_is_false() {
        let standard: Vec<CVector> = (0..2).map(|i| basis(2, i)).collect();
        let skewed = vec![basis(2, 0), basis(2, 0)];
        assert!(!is_orthonormal(&skewed, 1e-6));
        assert!(!is_mub(&[standard, skewed], &Tolerances::default()).unwrap());
    }

    #[test]
    fn test_shape_errors() {
        let tol = Tolerances::default();
        let standard: Vec<CVector> = (0..2).map(|i| basis(2, i)).collect();
        assert_eq!(
            is_mub(&[standard.clone()], &tol),
            Err(PropsError::TooFewBases { found: 1 })
        );
        assert_eq!(
            is_mub(&[standard.clone(), vec![basis(2, 0)]], &tol),
            Err(PropsError::BasisSize {
                basis: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            is_mub(&[standard, vec![basis(2, 0), basis(3, 0)]], &tol),
            Err(PropsError::VectorLength {
                basis: 1,
                vector: 1,
                expected: 2,
                found: 3
            })
        );
    }
}
