//! # Explorer Stores
//!
//! Minimal in-process implementations of the explorer-core seams.
//!
//! This crate provides:
//! - BroadcastDispatcher / RecordingDispatcher
//! - InMemory ExplorerStore (with a dispatch-record reducer)
//! - InMemory Persistence

mod dispatcher;
mod explorer_store;
mod persistence;

pub use dispatcher::{BroadcastDispatcher, RecordingDispatcher};
pub use explorer_store::InMemoryExplorerStore;
pub use persistence::InMemoryPersistence;

// Re-export core seams for convenience
pub use explorer_core::dispatch::{DispatchError, DispatchRecord, Dispatcher};
pub use explorer_core::persistence::{Persistence, PersistenceError};
pub use explorer_core::store::ExplorerStore;
