//! In-memory batch store.
//!
//! Suitable for tests and single-process hosts; durable hosts implement
//! [`BatchStore`] over their own key/value storage instead.

use crate::batch::InvalidationBatch;
use crate::error::StoreError;
use crate::traits::BatchStore;
use async_trait::async_trait;
use parking_lot::Mutex;

/// [`BatchStore`] holding the single batch slot in process memory.
#[derive(Debug, Default)]
pub struct MemoryBatchStore {
    slot: Mutex<Option<InvalidationBatch>>,
}

impl MemoryBatchStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BatchStore for MemoryBatchStore {
    async fn load(&self) -> Result<Option<InvalidationBatch>, StoreError> {
        Ok(self.slot.lock().clone())
    }

    async fn save(&self, batch: &InvalidationBatch) -> Result<(), StoreError> {
        *self.slot.lock() = Some(batch.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock() = None;
        Ok(())
    }
}
