//! # 🚫 qex-exclusion — Exclusão Conclusiva de Estados
//!
//! Calcula a probabilidade ótima de exclusão conclusiva de um ensemble
//! `{p_i, ρ_i}`: a medição `{E_i}` com `Σ E_i = I` que minimiza
//!
//! ```text
//! P_err = Σ_i p_i · Re tr(ρ_i E_i)
//! ```
//!
//! the probability that the outcome names the state actually prepared. A
//! value of 0 means some state can always be ruled out with certainty.
//!
//! ## Computational Complexity
//!
//! **Barrier backend — O(K · n · d⁶):**
//! - K = Newton steps (tens to a few hundred)
//! - n = ensemble size, d = state dimension
//! - the Newton system has d² unknowns
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          ExclusionSolver                        │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Ensemble validation (qex-core)           │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  ConicProgram (C_i = p_i ρ_i, R = I)      │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  SolverAdapter ─▶ dyn ConicBackend        │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  interpret ─▶ ExclusionReport             │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qex_core::{basis, bell};
//! use qex_exclusion::ExclusionSolver;
//!
//! let solver = ExclusionSolver::new();
//!
//! let single = solver.solve([bell(0).unwrap()], None).unwrap();
//! assert_eq!(single.probability, 1.0);
//!
//! let pair = solver.solve([basis(2, 0), basis(2, 0)], None).unwrap();
//! assert!((pair.probability - 0.5).abs() < 1e-6);
//! ```

pub mod adapter;
pub mod backend;
pub mod barrier;
pub mod cancel;
pub mod config;
pub mod error;
pub mod interpret;
pub mod program;
pub mod solver;

pub use adapter::{SolverAdapter, SolverOutcome, SolverStatus};
pub use backend::{BackendReport, ConicBackend, Termination};
pub use barrier::BarrierBackend;
pub use cancel::CancelToken;
pub use config::{AcceptanceSettings, BarrierSettings, ExclusionConfig};
pub use error::{ExclusionError, ExclusionResult};
pub use interpret::{ExclusionReport, SolverNumericalWarning};
pub use program::ConicProgram;
pub use solver::{conclusive_state_exclusion, ExclusionSolver};
