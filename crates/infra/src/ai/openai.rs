//! OpenAI-compatible chat-completions client.
//!
//! Works against the OpenAI API itself or any endpoint speaking the same
//! dialect (Ollama's `/v1`, vLLM, LocalAI). One request per call, no
//! streaming, no retries — failures surface as [`AiError::InferenceFailed`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use larder_ai::{AiError, ChatMessage, ChatModel};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct OpenAiCompatibleModel {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
}

impl OpenAiCompatibleModel {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        temperature: f32,
    ) -> Result<Self, AiError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AiError::Internal(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            temperature,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl ChatModel for OpenAiCompatibleModel {
    async fn chat(&self, system_prompt: &str, history: &[ChatMessage]) -> Result<String, AiError> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(WireMessage {
            role: "system",
            content: system_prompt,
        });
        messages.extend(history.iter().map(|m| WireMessage {
            role: &m.role,
            content: &m.content,
        }));

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let mut request = self.client.post(&url).json(&ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(model = %self.model, turns = history.len(), "chat completion request");

        let response = request
            .send()
            .await
            .map_err(|e| AiError::InferenceFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "chat completion rejected");
            return Err(AiError::InferenceFailed(format!(
                "backend returned {status}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AiError::InferenceFailed(format!("malformed completion: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AiError::InferenceFailed("completion had no content".to_string()))
    }
}
