//! Store seam
//!
//! The store owns the authoritative copy of every explorer model and
//! applies dispatched update records; the orchestrator only reads through
//! this trait. Lookup is synchronous: it is a pure read of
//! already-materialized local state, not a network call.
//!
//! Note: Implementations are in the explorer-stores crate

use crate::types::Explorer;

/// Point-lookup capability over the authoritative model state.
pub trait ExplorerStore: Send + Sync {
    /// Return the current model for `id`, if any.
    fn get(&self, id: &str) -> Option<Explorer>;
}
