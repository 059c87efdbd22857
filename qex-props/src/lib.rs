//! # 🔬 qex-props — Propriedades Estruturais
//!
//! Checagens fechadas, sem otimização, sobre a mesma representação de
//! estados do `qex-core`:
//!
//! - [`schmidt_rank`]: rank numérico após reshape (vetor) ou realinhamento
//!   (matriz densidade)
//! - [`is_mub`]: bases mutuamente não-enviesadas
//!
//! ## Computational Complexity
//!
//! **Schmidt rank — one SVD:**
//! - vector: d_A × d_B
//! - matrix: d_A² × d_B²
//!
//! **MUB — O(k² · d³):**
//! - k bases, d² inner products of length d per pair
//!
//! ## Exemplo
//!
//! ```
//! use qex_core::{BellState, StateInput, Tolerances};
//! use qex_props::schmidt_rank;
//!
//! let tol = Tolerances::default();
//! let bell = StateInput::FromVector(BellState::PhiPlus.vector());
//! assert_eq!(schmidt_rank(&bell, None, &tol).unwrap(), 2);
//! ```

pub mod error;
pub mod mub;
pub mod schmidt;

pub use error::{PropsError, PropsResult};
pub use mub::{is_mub, is_orthonormal};
pub use schmidt::{default_split, realign, schmidt_coefficients, schmidt_rank};

#[cfg(test)]
mod tests;
