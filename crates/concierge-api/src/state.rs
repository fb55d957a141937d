//! Application state wiring all components together.
//!
//! Components are generic over store/lookup traits, but AppState pins them
//! to the concrete infra implementations and owns the Arcs shared by every
//! request handler.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use secrecy::SecretString;

use concierge_core::analytics::AnalyticsCounters;
use concierge_core::contact::{ContactDirectory, ContactLookup};
use concierge_core::knowledge::KnowledgeBase;
use concierge_core::session::SessionRegistry;
use concierge_infra::config::{ServerConfig, resolve_api_key};
use concierge_infra::gateway::OpenAiGateway;
use concierge_infra::jsonstore::JsonSnapshotStore;
use concierge_infra::paths;
use concierge_types::chat::{ChatIdRecord, SessionRecord};
use concierge_types::contact::ContactRecord;

/// Concrete type aliases for the component generics pinned to infra.
pub type ConcreteDirectory = ContactDirectory<JsonSnapshotStore<ContactRecord>>;
pub type ConcreteRegistry =
    SessionRegistry<JsonSnapshotStore<ChatIdRecord>, JsonSnapshotStore<SessionRecord>>;

/// Shared application state reachable from every request.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ConcreteRegistry>,
    pub directory: Arc<ConcreteDirectory>,
    pub knowledge: Arc<KnowledgeBase>,
    pub counters: Arc<AnalyticsCounters>,
    pub gateway: Arc<OpenAiGateway>,
    pub config: Arc<ServerConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load persisted state and wire the components.
    ///
    /// A store failure here is fatal: durability cannot be guaranteed
    /// without a successful startup load.
    pub async fn init(data_dir: PathBuf, config: &ServerConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let counters = Arc::new(AnalyticsCounters::new());

        let directory = Arc::new(
            ContactDirectory::load(JsonSnapshotStore::new(paths::user_data_path(&data_dir)))
                .await
                .context("loading contact log")?,
        );

        let registry = Arc::new(
            SessionRegistry::load(
                JsonSnapshotStore::new(paths::chat_ids_path(&data_dir)),
                JsonSnapshotStore::new(paths::chat_histories_path(&data_dir)),
                Arc::clone(&counters),
                Arc::clone(&directory) as Arc<dyn ContactLookup>,
            )
            .await
            .context("loading chat sessions")?,
        );

        let api_key = resolve_api_key().unwrap_or_else(|| {
            tracing::warn!("OPENAI_API_KEY is not set; completion calls will fail");
            SecretString::from(String::new())
        });
        let gateway = Arc::new(OpenAiGateway::new(
            &api_key,
            config.model.clone(),
            Duration::from_secs(config.gateway_timeout_secs),
        ));

        Ok(Self {
            registry,
            directory,
            knowledge: Arc::new(KnowledgeBase::new()),
            counters,
            gateway,
            config: Arc::new(config.clone()),
            data_dir,
        })
    }

    /// Flush every store; used on graceful shutdown.
    pub async fn flush_all(&self) {
        self.registry.flush_ids().await;
        self.registry.flush_histories().await;
        self.directory.flush().await;
    }
}
