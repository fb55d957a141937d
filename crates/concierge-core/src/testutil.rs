//! In-memory snapshot store used by the component tests.

use std::sync::{Arc, Mutex};

use concierge_types::error::StoreError;

use crate::store::SnapshotStore;

/// Snapshot store backed by a shared vector.
///
/// Clones share the same backing vector, so a test can keep a handle and
/// inspect what a component flushed. `failing()` simulates an unwritable
/// medium.
pub(crate) struct MemorySnapshotStore<T> {
    records: Arc<Mutex<Vec<T>>>,
    fail_writes: bool,
}

impl<T> MemorySnapshotStore<T> {
    pub(crate) fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub(crate) fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            fail_writes: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            fail_writes: true,
        }
    }
}

impl<T: Clone> MemorySnapshotStore<T> {
    /// Current contents of the backing vector.
    pub(crate) fn records(&self) -> Vec<T> {
        self.records.lock().unwrap().clone()
    }
}

impl<T> Clone for MemorySnapshotStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            fail_writes: self.fail_writes,
        }
    }
}

impl<T: Clone + Send + Sync> SnapshotStore<T> for MemorySnapshotStore<T> {
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.records())
    }

    async fn replace_all(&self, records: &[T]) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io(std::io::Error::other("write refused")));
        }
        *self.records.lock().unwrap() = records.to_vec();
        Ok(())
    }
}
