//! `larder-ai`
//!
//! **Responsibility:** LLM subsystem boundary.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It must not depend on pantry aggregates or storage.
//! - It must not mutate domain state.
//! - It exposes a chat facade (`string -> string`), nothing more.
//!
//! Production model backends and durable chat memory live in infra; this
//! crate only defines the traits they implement, plus deterministic in-process
//! implementations for dev and tests.

pub mod agent;
pub mod error;
pub mod memory;
pub mod model;
pub mod orchestrator;

pub use agent::StorageAgent;
pub use error::AiError;
pub use memory::{ChatMemory, ChatMessage, InMemoryChatMemory};
pub use model::{ChatModel, ScriptedChatModel};
pub use orchestrator::LlmOrchestrator;
