//! Infrastructure layer: database stores, LLM backends, service orchestration.

pub mod ai;
pub mod chat_memory;
pub mod pantry_service;
pub mod pantry_store;

pub use ai::OpenAiCompatibleModel;
pub use chat_memory::PostgresChatMemory;
pub use pantry_service::{PantryService, PantryServiceError};
pub use pantry_store::{InMemoryPantryStore, PantryStore, PantryStoreError, PostgresPantryStore};
