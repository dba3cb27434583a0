use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use larder_pantry::{LineItem, PantryEntry};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LineItemRequest {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// Body of both `/pantry/restock` and `/pantry/consume`.
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub items: Vec<LineItemRequest>,
}

impl BatchRequest {
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
            .into_iter()
            .map(|item| LineItem::new(item.name, item.amount, item.unit))
            .collect()
    }
}

/// Body of the simple chat dialect (`/curl/chat`).
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

// -------------------------
// Ollama dialect
// -------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaMessage {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<serde_json::Value>>,
}

/// Incoming Ollama chat request. Unknown fields (options, format,
/// keep_alive) are accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct OllamaChatRequest {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub messages: Vec<OllamaMessage>,
    #[serde(default)]
    pub stream: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct OllamaChatResponse {
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub message: OllamaMessage,
    pub done: bool,
    pub done_reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

impl OllamaChatResponse {
    /// A finished, non-streamed assistant turn.
    pub fn completed(reply: String) -> Self {
        Self {
            model: "larder".to_string(),
            created_at: Utc::now(),
            message: OllamaMessage {
                role: "assistant".to_string(),
                content: reply,
                images: None,
                tool_calls: None,
            },
            done: true,
            done_reason: "stop".to_string(),
            total_duration: None,
            eval_count: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModelDetails {
    pub format: String,
    pub family: String,
    pub families: Vec<String>,
    pub parameter_size: String,
    pub quantization_level: String,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub model: String,
    pub modified_at: DateTime<Utc>,
    pub size: u64,
    pub digest: String,
    pub details: ModelDetails,
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub models: Vec<ModelInfo>,
}

/// The static one-model catalog both `/ollama/api/tags` and `/api/models`
/// advertise. There is no real model registry behind this server; WebUI-style
/// clients just need something to select.
pub fn model_catalog() -> TagsResponse {
    TagsResponse {
        models: vec![ModelInfo {
            name: "larder:latest".to_string(),
            model: "larder:latest".to_string(),
            modified_at: Utc::now(),
            size: 3_817_517_056,
            digest: "sha256:mock".to_string(),
            details: ModelDetails {
                format: "gguf".to_string(),
                family: "larder".to_string(),
                families: vec!["larder".to_string()],
                parameter_size: "7B".to_string(),
                quantization_level: "Q4_K_M".to_string(),
            },
        }],
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn entry_to_json(entry: &PantryEntry) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id.to_string(),
        "name": entry.name,
        "amount": entry.amount,
        "unit": entry.unit,
    })
}

pub fn entries_to_json(entries: &[PantryEntry]) -> serde_json::Value {
    serde_json::Value::Array(entries.iter().map(entry_to_json).collect())
}
