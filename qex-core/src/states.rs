//! # Estados padrão — base computacional e estados de Bell
//!
//! ```text
//! |Φ+⟩ = (|00⟩ + |11⟩) / √2     bell(0)
//! |Φ-⟩ = (|00⟩ - |11⟩) / √2     bell(1)
//! |Ψ+⟩ = (|01⟩ + |10⟩) / √2     bell(2)
//! |Ψ-⟩ = (|01⟩ - |10⟩) / √2     bell(3)
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

use crate::linalg::{c, kron_vec, outer, CMatrix, CVector};

/// Vetor |i⟩ da base computacional de dimensão `dim`.
///
/// An out-of-range index yields the zero vector, which the state validator
/// rejects as non-normalized.
pub fn basis(dim: usize, index: usize) -> CVector {
    let mut v = CVector::zeros(dim);
    if index < dim {
        v[index] = c(1.0, 0.0);
    }
    v
}

/// Estado de Bell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BellState {
    /// |Φ+⟩ = (|00⟩ + |11⟩) / √2
    #[default]
    PhiPlus,
    /// |Φ-⟩ = (|00⟩ - |11⟩) / √2
    PhiMinus,
    /// |Ψ+⟩ = (|01⟩ + |10⟩) / √2
    PsiPlus,
    /// |Ψ-⟩ = (|01⟩ - |10⟩) / √2
    PsiMinus,
}

impl BellState {
    pub const ALL: [BellState; 4] = [
        BellState::PhiPlus,
        BellState::PhiMinus,
        BellState::PsiPlus,
        BellState::PsiMinus,
    ];

    /// Cria a partir do índice 0..=3
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Fase relativa (-1 ou +1)
    pub fn phase(&self) -> f64 {
        match self {
            Self::PhiPlus | Self::PsiPlus => 1.0,
            Self::PhiMinus | Self::PsiMinus => -1.0,
        }
    }

    /// Paridade (mesmo ou diferente)
    pub fn parity(&self) -> bool {
        match self {
            // Phi: mesma paridade (00 ou 11)
            Self::PhiPlus | Self::PhiMinus => true,
            // Psi: paridade diferente (01 ou 10)
            Self::PsiPlus | Self::PsiMinus => false,
        }
    }

    /// Vetor de estado em C⁴
    pub fn vector(&self) -> CVector {
        let (e0, e1) = (basis(2, 0), basis(2, 1));
        let (first, second) = if self.parity() {
            (kron_vec(&e0, &e0), kron_vec(&e1, &e1))
        } else {
            (kron_vec(&e0, &e1), kron_vec(&e1, &e0))
        };
        (first + second * c(self.phase(), 0.0)) * c(FRAC_1_SQRT_2, 0.0)
    }

    /// Matriz densidade |β⟩⟨β|
    pub fn density(&self) -> CMatrix {
        outer(&self.vector())
    }

    /// Nome em notação bra-ket
    pub fn name(&self) -> &'static str {
        match self {
            Self::PhiPlus => "|Φ+⟩",
            Self::PhiMinus => "|Φ-⟩",
            Self::PsiPlus => "|Ψ+⟩",
            Self::PsiMinus => "|Ψ-⟩",
        }
    }
}

impl fmt::Display for BellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Estado de Bell pelo índice (0 = Φ+, 1 = Φ-, 2 = Ψ+, 3 = Ψ-)
pub fn bell(index: usize) -> Option<CVector> {
    BellState::from_index(index).map(|b| b.vector())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis() {
        let e2 = basis(3, 2);
        assert_eq!(e2[2], c(1.0, 0.0));
        assert_eq!(e2.norm(), 1.0);
        assert_eq!(basis(2, 5).norm(), 0.0);
    }

    #[test]
    fn test_bell_orthonormal() {
        for a in BellState::ALL {
            for b in BellState::ALL {
                let overlap = a.vector().dotc(&b.vector()).norm();
                let expected = if a == b { 1.0 } else { 0.0 };
                assert!((overlap - expected).abs() < 1e-12, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_bell_amplitudes() {
        let phi_minus = BellState::PhiMinus.vector();
        assert!((phi_minus[0].re - FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((phi_minus[3].re + FRAC_1_SQRT_2).abs() < 1e-12);
        let psi_plus = BellState::PsiPlus.vector();
        assert!((psi_plus[1].re - FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((psi_plus[2].re - FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_bell_index() {
        assert_eq!(BellState::from_index(0), Some(BellState::PhiPlus));
        assert_eq!(BellState::from_index(3), Some(BellState::PsiMinus));
        assert!(bell(4).is_none());
    }

    #[test]
    fn test_bell_density_trace() {
        let rho = BellState::PsiMinus.density();
        assert!((rho.trace().re - 1.0).abs() < 1e-12);
    }
}
