//! Service construction and dependency wiring.
//!
//! Everything is built once at startup and shared across requests via
//! `Extension<Arc<AppServices>>` — no ambient global state.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use larder_ai::{
    ChatMemory, ChatModel, InMemoryChatMemory, LlmOrchestrator, ScriptedChatModel, StorageAgent,
};
use larder_infra::{
    InMemoryPantryStore, OpenAiCompatibleModel, PantryService, PantryStore, PostgresChatMemory,
    PostgresPantryStore,
};

pub struct AppServices {
    pantry: PantryService,
    orchestrator: LlmOrchestrator,
}

impl AppServices {
    pub fn new(pantry: PantryService, orchestrator: LlmOrchestrator) -> Self {
        Self {
            pantry,
            orchestrator,
        }
    }

    pub fn pantry(&self) -> &PantryService {
        &self.pantry
    }

    pub fn orchestrator(&self) -> &LlmOrchestrator {
        &self.orchestrator
    }
}

/// Build services from the environment.
///
/// - `USE_PERSISTENT_STORES=true` + `DATABASE_URL`: Postgres pantry store and
///   chat memory (schema created idempotently). Defaults to in-memory
///   (dev/test).
/// - `LARDER_LLM_PROVIDER`: `scripted` (default) or `openai`.
/// - `LARDER_STORE_TIMEOUT_MS`: deadline for individual store calls.
pub async fn build_services() -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    let (store, memory): (Arc<dyn PantryStore>, Arc<dyn ChatMemory>) = if use_persistent {
        match std::env::var("DATABASE_URL") {
            Ok(url) => build_persistent_stores(&url).await,
            Err(_) => {
                tracing::warn!(
                    "USE_PERSISTENT_STORES=true but DATABASE_URL not set, falling back to in-memory"
                );
                build_in_memory_stores()
            }
        }
    } else {
        build_in_memory_stores()
    };

    let store_deadline = std::env::var("LARDER_STORE_TIMEOUT_MS")
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5));

    let pantry = PantryService::with_deadline(store, store_deadline);
    let orchestrator = LlmOrchestrator::new(StorageAgent::new(build_chat_model(), memory));

    AppServices::new(pantry, orchestrator)
}

fn build_in_memory_stores() -> (Arc<dyn PantryStore>, Arc<dyn ChatMemory>) {
    (
        Arc::new(InMemoryPantryStore::new()),
        Arc::new(InMemoryChatMemory::new()),
    )
}

async fn build_persistent_stores(database_url: &str) -> (Arc<dyn PantryStore>, Arc<dyn ChatMemory>) {
    let pool = PgPool::connect(database_url)
        .await
        .expect("failed to connect to Postgres");

    PostgresPantryStore::init_schema(&pool)
        .await
        .expect("failed to initialize pantry schema");
    PostgresChatMemory::init_schema(&pool)
        .await
        .expect("failed to initialize chat memory schema");

    tracing::info!("persistent stores ready");
    (
        Arc::new(PostgresPantryStore::new(pool.clone())),
        Arc::new(PostgresChatMemory::new(pool)),
    )
}

fn build_chat_model() -> Arc<dyn ChatModel> {
    let provider = std::env::var("LARDER_LLM_PROVIDER").unwrap_or_else(|_| "scripted".to_string());

    match provider.as_str() {
        "openai" => {
            let base_url = std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
            let model = std::env::var("OPENAI_MODEL_NAME")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string());
            let api_key = std::env::var("OPENAI_API_KEY").ok();
            let temperature = std::env::var("OPENAI_TEMPERATURE")
                .ok()
                .and_then(|raw| raw.parse::<f32>().ok())
                .unwrap_or(0.0);

            if api_key.is_none() {
                tracing::warn!("OPENAI_API_KEY not set; relying on an unauthenticated endpoint");
            }

            match OpenAiCompatibleModel::new(base_url, model, api_key, temperature) {
                Ok(model) => Arc::new(model),
                Err(e) => {
                    tracing::warn!("failed to build openai client ({e}), using scripted model");
                    Arc::new(ScriptedChatModel::default())
                }
            }
        }
        "scripted" => Arc::new(ScriptedChatModel::default()),
        other => {
            tracing::warn!(provider = %other, "unknown LLM provider, using scripted model");
            Arc::new(ScriptedChatModel::default())
        }
    }
}
