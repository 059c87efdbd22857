//! # ⚛️ qex-core — Estados, Ensembles e Tolerâncias
//!
//! Representação canônica de estados quânticos compartilhada pelos crates QEX.
//! Vetores de estado e matrizes densidade são validados uma única vez e
//! convertidos em [`QuantumState`]; listas de estados viram um [`Ensemble`]
//! com probabilidades a priori.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          Ensemble                               │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  StateInput (FromVector | FromMatrix)     │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  QuantumState (ρ = ρ†, ρ ⪰ 0, tr ρ = 1)   │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Probabilities (p_i ≥ 0, Σ p_i = 1)       │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qex_core::{bell, Ensemble, Tolerances};
//!
//! let states = (0..3).filter_map(bell);
//! let ensemble = Ensemble::new(states, None, &Tolerances::default()).unwrap();
//! assert_eq!(ensemble.dim(), 4);
//! assert_eq!(ensemble.len(), 3);
//! ```

pub mod config;
pub mod document;
pub mod ensemble;
pub mod error;
pub mod linalg;
pub mod state;
pub mod states;

pub use config::{Tolerances, ENV_TOLERANCES};
pub use document::{BasesDocument, EnsembleDocument, Entry, StateRecord};
pub use ensemble::{uniform, Ensemble};
pub use error::{ProbabilityDefect, StateDefect, StateError, StateResult};
pub use linalg::{C64, CMatrix, CVector};
pub use state::{QuantumState, StateInput};
pub use states::{basis, bell, BellState};

/// Imports comuns
pub mod prelude {
    pub use crate::linalg::{c, C64, CMatrix, CVector};
    pub use crate::{basis, bell, BellState, Ensemble, QuantumState, StateInput, Tolerances};
}
