//! Álgebra linear complexa sobre `nalgebra`
//!
//! Small dense helpers shared by the state representation, the exclusion
//! program and the structural checks. Matrices are `DMatrix<C64>`.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;
use num_traits::Zero;

/// Complex scalar used across QEX
pub type C64 = Complex64;
/// Dense complex matrix
pub type CMatrix = DMatrix<C64>;
/// Dense complex column vector
pub type CVector = DVector<C64>;

#[inline]
pub fn c(re: f64, im: f64) -> C64 {
    C64::new(re, im)
}

/// Kronecker product A ⊗ B
pub fn kron(a: &CMatrix, b: &CMatrix) -> CMatrix {
    let (ar, ac) = (a.nrows(), a.ncols());
    let (br, bc) = (b.nrows(), b.ncols());
    let mut out = CMatrix::zeros(ar * br, ac * bc);
    for i in 0..ar {
        for j in 0..ac {
            let aij = a[(i, j)];
            if aij.is_zero() {
                continue;
            }
            for k in 0..br {
                for l in 0..bc {
                    out[(i * br + k, j * bc + l)] = aij * b[(k, l)];
                }
            }
        }
    }
    out
}

/// Kronecker product of column vectors u ⊗ v
pub fn kron_vec(u: &CVector, v: &CVector) -> CVector {
    let mut out = CVector::zeros(u.len() * v.len());
    for (i, ui) in u.iter().enumerate() {
        for (j, vj) in v.iter().enumerate() {
            out[i * v.len() + j] = ui * vj;
        }
    }
    out
}

/// |v⟩⟨v|
pub fn outer(v: &CVector) -> CMatrix {
    v * v.adjoint()
}

/// max_ij |A_ij - conj(A_ji)|
pub fn hermitian_deviation(m: &CMatrix) -> f64 {
    let n = m.nrows();
    let mut worst = 0.0_f64;
    for i in 0..n {
        for j in i..n {
            worst = worst.max((m[(i, j)] - m[(j, i)].conj()).norm());
        }
    }
    worst
}

/// (A + A†) / 2
pub fn hermitian_part(m: &CMatrix) -> CMatrix {
    (m + m.adjoint()) * c(0.5, 0.0)
}

/// tr(A B) without forming the product.
pub fn trace_product(a: &CMatrix, b: &CMatrix) -> C64 {
    debug_assert_eq!(a.ncols(), b.nrows());
    debug_assert_eq!(a.nrows(), b.ncols());
    let mut acc = c(0.0, 0.0);
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            acc += a[(i, j)] * b[(j, i)];
        }
    }
    acc
}

/// Eigenvalues of a Hermitian matrix, ascending.
///
/// Only the lower triangle is read; callers check Hermiticity first.
pub fn hermitian_eigenvalues(m: &CMatrix) -> Vec<f64> {
    let mut values: Vec<f64> = m.symmetric_eigenvalues().iter().copied().collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

/// Singular values, descending.
pub fn singular_values(m: &CMatrix) -> Vec<f64> {
    let mut values: Vec<f64> = m.singular_values().iter().copied().collect();
    values.sort_by(|a, b| b.total_cmp(a));
    values
}

/// Number of singular values strictly above `tol`.
pub fn numerical_rank(m: &CMatrix, tol: f64) -> usize {
    singular_values(m).into_iter().filter(|&s| s > tol).count()
}

pub fn is_finite(m: &CMatrix) -> bool {
    m.iter().all(|z| z.re.is_finite() && z.im.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kron_identity() {
        let i2 = CMatrix::identity(2, 2);
        let k = kron(&i2, &i2);
        assert_eq!(k, CMatrix::identity(4, 4));
    }

    #[test]
    fn test_kron_vec_matches_kron() {
        let u = CVector::from_vec(vec![c(1.0, 0.0), c(0.0, 2.0)]);
        let v = CVector::from_vec(vec![c(3.0, 0.0), c(1.0, -1.0)]);
        let as_mats = kron(
            &CMatrix::from_column_slice(2, 1, u.as_slice()),
            &CMatrix::from_column_slice(2, 1, v.as_slice()),
        );
        let w = kron_vec(&u, &v);
        for i in 0..4 {
            assert!((as_mats[(i, 0)] - w[i]).norm() < 1e-12);
        }
    }

    #[test]
    fn test_hermitian_deviation() {
        let mut m = CMatrix::identity(2, 2);
        m[(0, 1)] = c(0.0, 1.0);
        m[(1, 0)] = c(0.0, -1.0);
        assert!(hermitian_deviation(&m) < 1e-15);
        m[(1, 0)] = c(0.0, 1.0);
        assert!((hermitian_deviation(&m) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_eigenvalues_complex_hermitian() {
        // Pauli Y: eigenvalues ±1
        let mut y = CMatrix::zeros(2, 2);
        y[(0, 1)] = c(0.0, -1.0);
        y[(1, 0)] = c(0.0, 1.0);
        let ev = hermitian_eigenvalues(&y);
        assert!((ev[0] + 1.0).abs() < 1e-12);
        assert!((ev[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_trace_product() {
        let a = CMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0), c(4.0, 0.0)]);
        let b = CMatrix::from_row_slice(2, 2, &[c(0.0, 1.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)]);
        let expected = (&a * &b).trace();
        assert!((trace_product(&a, &b) - expected).norm() < 1e-12);
    }

    #[test]
    fn test_numerical_rank() {
        let v = CVector::from_vec(vec![c(1.0, 0.0), c(0.0, 0.0)]);
        assert_eq!(numerical_rank(&outer(&v), 1e-10), 1);
        assert_eq!(numerical_rank(&CMatrix::identity(3, 3), 1e-10), 3);
    }
}
