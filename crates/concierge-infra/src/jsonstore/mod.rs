//! JSON flat-file snapshot store.
//!
//! One pretty-printed JSON array per file, human-readable and UTF-8.
//! `replace_all` writes the full snapshot to a sibling temp file and renames
//! it over the target, so a crash mid-write can never leave a half-written
//! array behind.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use concierge_core::store::SnapshotStore;
use concierge_types::error::StoreError;

/// Snapshot store backed by one JSON file.
pub struct JsonSnapshotStore<T> {
    path: PathBuf,
    marker: PhantomData<fn() -> T>,
}

impl<T> JsonSnapshotStore<T> {
    /// Store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            marker: PhantomData,
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl<T> SnapshotStore<T> for JsonSnapshotStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|err| StoreError::Corrupt {
                path: self.path.display().to_string(),
                message: err.to_string(),
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                if let Some(parent) = self.path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&self.path, "[]").await?;
                Ok(Vec::new())
            }
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    async fn replace_all(&self, records: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|err| StoreError::Io(std::io::Error::other(err)))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json.as_bytes()).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct TestRecord {
        id: String,
        count: u32,
    }

    fn record(id: &str, count: u32) -> TestRecord {
        TestRecord {
            id: id.to_string(),
            count,
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_creates_empty_one() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        let store: JsonSnapshotStore<TestRecord> = JsonSnapshotStore::new(&path);

        let records = store.load().await.unwrap();
        assert!(records.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_replace_all_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store: JsonSnapshotStore<TestRecord> =
            JsonSnapshotStore::new(dir.path().join("records.json"));

        let records = vec![record("a", 1), record("b", 2)];
        store.replace_all(&records).await.unwrap();
        assert_eq!(store.load().await.unwrap(), records);
    }

    #[tokio::test]
    async fn test_replace_all_overwrites_full_contents() {
        let dir = TempDir::new().unwrap();
        let store: JsonSnapshotStore<TestRecord> =
            JsonSnapshotStore::new(dir.path().join("records.json"));

        store.replace_all(&[record("a", 1)]).await.unwrap();
        store.replace_all(&[record("b", 2)]).await.unwrap();

        let records = store.load().await.unwrap();
        assert_eq!(records, vec![record("b", 2)]);
    }

    #[tokio::test]
    async fn test_output_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        let store: JsonSnapshotStore<TestRecord> = JsonSnapshotStore::new(&path);

        store.replace_all(&[record("a", 1)]).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains('\n'));
        assert!(content.contains("  \"id\": \"a\""));
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        let store: JsonSnapshotStore<TestRecord> = JsonSnapshotStore::new(&path);

        store.replace_all(&[record("a", 1)]).await.unwrap();
        assert!(!dir.path().join("records.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, "this is not json").unwrap();
        let store: JsonSnapshotStore<TestRecord> = JsonSnapshotStore::new(&path);

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_load_creates_missing_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("records.json");
        let store: JsonSnapshotStore<TestRecord> = JsonSnapshotStore::new(&path);

        let records = store.load().await.unwrap();
        assert!(records.is_empty());
        assert!(path.exists());
    }
}
