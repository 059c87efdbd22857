//! Cancelamento cooperativo
//!
//! The backend polls the token once per Newton step; a cancelled solve
//! returns [`ExclusionError::Cancelled`](crate::ExclusionError::Cancelled)
//! and never a partial value.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Token de cancelamento compartilhável entre threads
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Cria token não cancelado
    pub fn new() -> Self {
        Self::default()
    }

    /// Solicita cancelamento
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Cancelamento solicitado?
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
