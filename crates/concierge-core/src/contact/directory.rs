//! Contact directory.
//!
//! An append-only log of visitor contact submissions, at most one per
//! session. The duplicate policy is first-write-wins: a second submission
//! for the same chat id fails with `AlreadyExists` and leaves the stored
//! record intact.

use std::sync::Mutex;

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::warn;

use concierge_types::chat::ContactInfo;
use concierge_types::contact::ContactRecord;
use concierge_types::error::{ContactError, StoreError};

use crate::contact::ContactLookup;
use crate::store::SnapshotStore;

/// Owns the visitor contact log and its per-session index.
pub struct ContactDirectory<S> {
    by_chat: DashMap<String, ContactRecord>,
    /// Records in submission order (the persisted log order).
    log: Mutex<Vec<ContactRecord>>,
    store: S,
    flush_lock: tokio::sync::Mutex<()>,
}

impl<S: SnapshotStore<ContactRecord>> ContactDirectory<S> {
    /// Load the directory from its backing store.
    pub async fn load(store: S) -> Result<Self, StoreError> {
        let records = store.load().await?;
        let by_chat = DashMap::new();
        for record in &records {
            by_chat.insert(record.chat_id.clone(), record.clone());
        }
        Ok(Self {
            by_chat,
            log: Mutex::new(records),
            store,
            flush_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Record contact details for a session, first-write-wins.
    ///
    /// The existence check and the insert happen in one step on the map
    /// entry, so concurrent submissions for the same chat id cannot both
    /// win. The winning record is appended to the log and flushed.
    pub async fn submit(
        &self,
        chat_id: &str,
        name: &str,
        number: &str,
    ) -> Result<ContactRecord, ContactError> {
        let record = ContactRecord {
            chat_id: chat_id.to_string(),
            name: name.to_string(),
            number: number.to_string(),
            submitted_at: Utc::now(),
        };

        match self.by_chat.entry(chat_id.to_string()) {
            Entry::Occupied(_) => return Err(ContactError::AlreadyExists(chat_id.to_string())),
            Entry::Vacant(vacant) => {
                vacant.insert(record.clone());
            }
        }

        self.log
            .lock()
            .expect("contact log lock poisoned")
            .push(record.clone());

        self.flush().await;
        Ok(record)
    }

    /// Contact record for a chat id.
    pub fn get(&self, chat_id: &str) -> Option<ContactRecord> {
        self.by_chat.get(chat_id).map(|r| r.clone())
    }

    /// All records in submission order.
    pub fn list_all(&self) -> Vec<ContactRecord> {
        self.log.lock().expect("contact log lock poisoned").clone()
    }

    /// Number of submitted records.
    pub fn contact_count(&self) -> usize {
        self.log.lock().expect("contact log lock poisoned").len()
    }

    /// Flush the contact log.
    ///
    /// Write failures are logged; the in-memory log stays authoritative
    /// until the next successful flush.
    pub async fn flush(&self) {
        let _guard = self.flush_lock.lock().await;
        let records = self.list_all();
        if let Err(err) = self.store.replace_all(&records).await {
            warn!(error = %err, "failed to flush contact log");
        }
    }
}

impl<S: SnapshotStore<ContactRecord>> ContactLookup for ContactDirectory<S> {
    fn contact_info(&self, chat_id: &str) -> Option<ContactInfo> {
        self.by_chat.get(chat_id).map(|r| ContactInfo {
            name: r.name.clone(),
            number: r.number.clone(),
        })
    }
}
