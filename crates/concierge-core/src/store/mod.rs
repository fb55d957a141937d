//! Snapshot store trait.
//!
//! The durable record-store contract: load everything at startup, then
//! atomically replace the full contents on every flush. There are no
//! partial or incremental writes.

use concierge_types::error::StoreError;

/// Trait for durable full-snapshot record storage.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in concierge-infra (e.g. `JsonSnapshotStore`).
pub trait SnapshotStore<T>: Send + Sync {
    /// Load all records.
    ///
    /// Returns an empty sequence when no backing file exists yet, creating
    /// an empty one. Callers treat a failure here as fatal: durability
    /// cannot be guaranteed without a successful startup load.
    fn load(&self) -> impl std::future::Future<Output = Result<Vec<T>, StoreError>> + Send;

    /// Atomically overwrite the backing file with a full snapshot.
    fn replace_all(
        &self,
        records: &[T],
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
