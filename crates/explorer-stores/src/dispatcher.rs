//! Dispatcher implementations.
//!
//! `BroadcastDispatcher` pushes records to live subscribers;
//! `RecordingDispatcher` additionally captures every record in
//! submission order for deterministic assertions.

use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::broadcast;

use explorer_core::dispatch::{DispatchError, DispatchRecord, Dispatcher};

/// In-process dispatch channel based on tokio broadcast channels.
pub struct BroadcastDispatcher {
    tx: broadcast::Sender<DispatchRecord>,
    capacity: usize,
}

impl BroadcastDispatcher {
    /// Create a new broadcast dispatcher with channel capacity.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Return the configured channel capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BroadcastDispatcher {
    fn default() -> Self {
        // Default capacity for local subscribers.
        Self::new(1024)
    }
}

#[async_trait]
impl Dispatcher for BroadcastDispatcher {
    async fn dispatch(&self, record: DispatchRecord) -> Result<(), DispatchError> {
        // "No receiver" is a non-error; records are fire-and-forget.
        match self.tx.send(record) {
            Ok(_) => Ok(()),
            Err(broadcast::error::SendError(_)) => Ok(()),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<DispatchRecord> {
        self.tx.subscribe()
    }
}

/// Dispatcher that records every dispatched record in submission order,
/// on top of live broadcast delivery.
pub struct RecordingDispatcher {
    inner: BroadcastDispatcher,
    records: Mutex<Vec<DispatchRecord>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self {
            inner: BroadcastDispatcher::default(),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Every record dispatched so far, in submission order.
    pub fn records(&self) -> Vec<DispatchRecord> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Wire-level action types of the dispatched records, in order.
    pub fn action_types(&self) -> Vec<&'static str> {
        self.records().iter().map(|r| r.action_type()).collect()
    }

    /// Drop all captured records.
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl Default for RecordingDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Dispatcher for RecordingDispatcher {
    async fn dispatch(&self, record: DispatchRecord) -> Result<(), DispatchError> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());
        self.inner.dispatch(record).await
    }

    fn subscribe(&self) -> broadcast::Receiver<DispatchRecord> {
        self.inner.subscribe()
    }
}
