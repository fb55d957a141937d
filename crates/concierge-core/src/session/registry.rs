//! Session registry.
//!
//! Owns the full set of chat sessions and their append-only message
//! sequences. Every mutating endpoint funnels through
//! [`SessionRegistry::append`], so message ordering and counter bookkeeping
//! are centralized and cannot be skipped by a caller.
//!
//! Concurrency: sessions live in a `DashMap`, so appends to the same chat
//! id serialize on the entry guard while different sessions never contend.
//! Each backing file has its own flush mutex held across snapshot-build and
//! write, which keeps flushed snapshots monotonic. No entry guard is ever
//! held across an await point.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, warn};
use uuid::Uuid;

use concierge_types::chat::{
    ChatIdRecord, ChatMessage, ChatSession, MessageRole, SessionRecord,
};
use concierge_types::error::{SessionError, StoreError};

use crate::analytics::AnalyticsCounters;
use crate::contact::ContactLookup;
use crate::store::SnapshotStore;

/// Fixed marker appended when an operator takes over a conversation.
const MANUAL_START_MARKER: &str = "Manual chat continued";

/// Fixed marker appended when the assistant resumes a conversation.
const MANUAL_END_MARKER: &str = "Automate chat continued";

/// Owns session lifecycles, persisted through two snapshot stores: the
/// chat-id index and the full-history file.
pub struct SessionRegistry<I, H> {
    sessions: DashMap<String, ChatSession>,
    /// Chat ids in creation order (the persisted index order).
    id_order: Mutex<Vec<String>>,
    counters: Arc<AnalyticsCounters>,
    contacts: Arc<dyn ContactLookup>,
    id_store: I,
    history_store: H,
    id_flush: tokio::sync::Mutex<()>,
    history_flush: tokio::sync::Mutex<()>,
}

impl<I, H> SessionRegistry<I, H>
where
    I: SnapshotStore<ChatIdRecord>,
    H: SnapshotStore<SessionRecord>,
{
    /// Load the registry from its two backing stores.
    ///
    /// The id index is authoritative for the session set and its creation
    /// order; message sequences are restored from the history snapshot. A
    /// history entry missing from the index is re-adopted rather than
    /// dropped -- the index flush may have failed after the history flush
    /// succeeded.
    pub async fn load(
        id_store: I,
        history_store: H,
        counters: Arc<AnalyticsCounters>,
        contacts: Arc<dyn ContactLookup>,
    ) -> Result<Self, StoreError> {
        let ids = id_store.load().await?;
        let histories = history_store.load().await?;

        let sessions = DashMap::new();
        let mut order = Vec::with_capacity(ids.len());
        for record in ids {
            sessions.insert(
                record.chat_id.clone(),
                ChatSession::new(record.chat_id.clone(), record.timestamp),
            );
            order.push(record.chat_id);
        }
        for record in histories {
            match sessions.entry(record.chat_id.clone()) {
                Entry::Occupied(mut occupied) => {
                    occupied.get_mut().messages = record.messages;
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(ChatSession {
                        chat_id: record.chat_id.clone(),
                        created_at: record.timestamp,
                        messages: record.messages,
                    });
                    order.push(record.chat_id);
                }
            }
        }

        Ok(Self {
            sessions,
            id_order: Mutex::new(order),
            counters,
            contacts,
            id_store,
            history_store,
            id_flush: tokio::sync::Mutex::new(()),
            history_flush: tokio::sync::Mutex::new(()),
        })
    }

    /// Resolve an existing session or create one.
    ///
    /// An empty or absent id asks the registry to generate a fresh unique
    /// id. Creating a session flushes the id index before returning;
    /// resolving an existing one is a pure read, so calling this twice with
    /// the same id never duplicates an index entry.
    pub async fn get_or_create(&self, chat_id: Option<&str>) -> ChatSession {
        let requested = chat_id.map(str::trim).filter(|s| !s.is_empty());
        let id = match requested {
            Some(id) => id.to_string(),
            None => self.generate_id(),
        };

        let (session, created) = match self.sessions.entry(id.clone()) {
            Entry::Occupied(occupied) => (occupied.get().clone(), false),
            Entry::Vacant(vacant) => {
                let session = ChatSession::new(id.clone(), Utc::now());
                vacant.insert(session.clone());
                (session, true)
            }
        };

        if created {
            self.id_order
                .lock()
                .expect("id order lock poisoned")
                .push(id);
            debug!(chat_id = %session.chat_id, "created chat session");
            self.flush_ids().await;
        }
        session
    }

    /// Append one message to a session, creating the session if needed.
    ///
    /// Returns the effective chat id and the updated message sequence. The
    /// entry guard is held for the push, so concurrent appends to the same
    /// session are strictly ordered; the guard is released before the
    /// history flush.
    pub async fn append(
        &self,
        chat_id: Option<&str>,
        role: MessageRole,
        content: impl Into<String>,
    ) -> (String, Vec<ChatMessage>) {
        let session = self.get_or_create(chat_id).await;
        let id = session.chat_id;

        let messages = {
            let mut entry = self
                .sessions
                .get_mut(&id)
                .expect("session exists: sessions are never removed");
            entry.messages.push(ChatMessage {
                role,
                content: content.into(),
            });
            entry.messages.clone()
        };
        self.counters.record_message();

        self.flush_histories().await;
        (id, messages)
    }

    /// Append the manual-takeover marker and count the activation.
    pub async fn begin_manual(&self, chat_id: Option<&str>) -> (String, Vec<ChatMessage>) {
        let out = self
            .append(chat_id, MessageRole::Assistant, MANUAL_START_MARKER)
            .await;
        self.counters.record_manual_mode();
        out
    }

    /// Append the automated-resume marker.
    pub async fn end_manual(&self, chat_id: Option<&str>) -> (String, Vec<ChatMessage>) {
        self.append(chat_id, MessageRole::Assistant, MANUAL_END_MARKER)
            .await
    }

    /// Get a session by id.
    pub fn get(&self, chat_id: &str) -> Result<ChatSession, SessionError> {
        self.sessions
            .get(chat_id)
            .map(|s| s.clone())
            .ok_or_else(|| SessionError::NotFound(chat_id.to_string()))
    }

    /// All known chat ids in creation order.
    pub fn list_ids(&self) -> Vec<String> {
        self.id_order
            .lock()
            .expect("id order lock poisoned")
            .clone()
    }

    /// Number of known sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// The shared usage counters.
    pub fn counters(&self) -> &AnalyticsCounters {
        &self.counters
    }

    /// Full-history records in creation order, with each session's contact
    /// details embedded (empty strings when none were submitted).
    pub fn history_records(&self) -> Vec<SessionRecord> {
        self.list_ids()
            .into_iter()
            .filter_map(|id| {
                let session = self.sessions.get(&id)?;
                let user_data = self.contacts.contact_info(&id).unwrap_or_default();
                Some(SessionRecord {
                    chat_id: session.chat_id.clone(),
                    timestamp: session.created_at,
                    messages: session.messages.clone(),
                    user_data,
                })
            })
            .collect()
    }

    /// Flush the chat-id index.
    ///
    /// Write failures are logged; the in-memory state stays authoritative
    /// until the next successful flush.
    pub async fn flush_ids(&self) {
        let _guard = self.id_flush.lock().await;
        let records = self.id_records();
        if let Err(err) = self.id_store.replace_all(&records).await {
            warn!(error = %err, "failed to flush chat id index");
        }
    }

    /// Flush the full-history snapshot.
    pub async fn flush_histories(&self) {
        let _guard = self.history_flush.lock().await;
        let records = self.history_records();
        if let Err(err) = self.history_store.replace_all(&records).await {
            warn!(error = %err, "failed to flush chat histories");
        }
    }

    fn id_records(&self) -> Vec<ChatIdRecord> {
        self.list_ids()
            .into_iter()
            .filter_map(|id| {
                let created_at = self.sessions.get(&id).map(|s| s.created_at)?;
                Some(ChatIdRecord {
                    chat_id: id,
                    timestamp: created_at,
                })
            })
            .collect()
    }

    /// Generate a fresh chat id: UUID v7 in simple form, with an explicit
    /// collision check against the registry before acceptance.
    fn generate_id(&self) -> String {
        loop {
            let id = Uuid::now_v7().simple().to_string();
            if !self.sessions.contains_key(&id) {
                return id;
            }
        }
    }
}
