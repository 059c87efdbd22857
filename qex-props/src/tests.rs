//! Testes integrados para qex-props

use std::f64::consts::FRAC_1_SQRT_2;

use qex_core::linalg::{kron_vec, outer};
use qex_core::prelude::*;

use crate::*;

fn h(a: &CVector, b: &CVector, phase: C64) -> CVector {
    (a + b * phase) * c(FRAC_1_SQRT_2, 0.0)
}

#[test]
fn test_schmidt_rank_bell_state() {
    let rho = BellState::PhiPlus.density();
    let rank = schmidt_rank(&StateInput::FromMatrix(rho), None, &Tolerances::default()).unwrap();
    assert!(rank > 1);
}

#[test]
fn test_schmidt_rank_singlet_state() {
    let (e0, e1) = (basis(2, 0), basis(2, 1));
    let singlet = (kron_vec(&e0, &e1) - kron_vec(&e1, &e0)) * c(FRAC_1_SQRT_2, 0.0);
    let rank = schmidt_rank(&StateInput::FromMatrix(outer(&singlet)), None, &Tolerances::default()).unwrap();
    assert!(rank > 1);
}

#[test]
fn test_schmidt_rank_separable_state() {
    let (e0, e1) = (basis(2, 0), basis(2, 1));
    // ½(|00⟩ - |01⟩ - |10⟩ + |11⟩) = |-⟩|-⟩
    let v = (kron_vec(&e0, &e0) - kron_vec(&e0, &e1) - kron_vec(&e1, &e0) + kron_vec(&e1, &e1)) * c(0.5, 0.0);
    let tol = Tolerances::default();
    assert_eq!(schmidt_rank(&StateInput::FromMatrix(outer(&v)), None, &tol).unwrap(), 1);
    assert_eq!(schmidt_rank(&StateInput::FromVector(v), None, &tol).unwrap(), 1);
}

#[test]
fn test_schmidt_rank_rejects_invalid_state() {
    let tol = Tolerances::default();
    let unnormalized = CVector::from_vec(vec![c(1.0, 0.0); 4]);
    assert!(matches!(
        schmidt_rank(&StateInput::FromVector(unnormalized), None, &tol),
        Err(PropsError::State(_))
    ));
}

#[test]
fn test_rank_tolerance_is_configurable() {
    // √(1 - ε²)|00⟩ + ε|11⟩ has rank 2 only while ε is above the tolerance
    let small: f64 = 1e-6;
    let big = (1.0 - small * small).sqrt();
    let v = CVector::from_vec(vec![c(big, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(small, 0.0)]);
    let input = StateInput::FromVector(v);
    assert_eq!(schmidt_rank(&input, None, &Tolerances::default()).unwrap(), 2);
    let loose = Tolerances {
        rank: 1e-4,
        ..Tolerances::default()
    };
    assert_eq!(schmidt_rank(&input, None, &loose).unwrap(), 1);
}

#[test]
fn test_is_mub_dim_2() {
    let (e0, e1) = (basis(2, 0), basis(2, 1));
    let mubs = vec![
        vec![e0.clone(), e1.clone()],
        vec![h(&e0, &e1, c(1.0, 0.0)), h(&e0, &e1, c(-1.0, 0.0))],
        vec![h(&e0, &e1, c(0.0, 1.0)), h(&e0, &e1, c(0.0, -1.0))],
    ];
    assert!(is_mub(&mubs, &Tolerances::default()).unwrap());
}

#[test]
fn test_is_not_mub_dim_2() {
    let (e0, e1) = (basis(2, 0), basis(2, 1));
    let mubs = vec![
        vec![e0.clone(), e1.clone()],
        vec![h(&e0, &e1, c(1.0, 0.0)), e1.clone()],
        vec![h(&e0, &e1, c(0.0, 1.0)), e0.clone()],
    ];
    assert!(!is_mub(&mubs, &Tolerances::default()).unwrap());
}

#[test]
fn test_is_mub_invalid_input_len() {
    let single = vec![vec![basis(2, 0)]];
    assert_eq!(
        is_mub(&single, &Tolerances::default()),
        Err(PropsError::TooFewBases { found: 1 })
    );
}
