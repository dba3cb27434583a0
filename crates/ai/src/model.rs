use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AiError;
use crate::memory::ChatMessage;

/// A chat-completion backend.
///
/// Any implementation satisfying this signature is substitutable: a scripted
/// in-process stub, an OpenAI-compatible HTTP endpoint, a local model. Callers
/// surface failures as opaque service errors; no retry policy lives here.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Produce a reply to the conversation so far.
    ///
    /// `history` already includes the latest user message as its last element.
    async fn chat(&self, system_prompt: &str, history: &[ChatMessage]) -> Result<String, AiError>;
}

/// Deterministic model that cycles through a fixed list of replies, ignoring
/// its input. Used for dev wiring and tests, where a real backend would make
/// runs non-reproducible.
pub struct ScriptedChatModel {
    responses: Vec<String>,
    next: Mutex<usize>,
}

impl ScriptedChatModel {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            next: Mutex::new(0),
        }
    }
}

impl Default for ScriptedChatModel {
    fn default() -> Self {
        Self::new(vec![
            "I am a scripted model and quite confused about who I am.".to_string(),
            "Still a scripted model. Still confused.".to_string(),
            "As a confused scripted model, I can only offer generic advice.".to_string(),
        ])
    }
}

#[async_trait]
impl ChatModel for ScriptedChatModel {
    async fn chat(&self, _system_prompt: &str, _history: &[ChatMessage]) -> Result<String, AiError> {
        if self.responses.is_empty() {
            return Err(AiError::InvalidInput("no scripted responses".to_string()));
        }

        let mut next = self
            .next
            .lock()
            .map_err(|_| AiError::Internal("scripted model lock poisoned".to_string()))?;
        let reply = self.responses[*next % self.responses.len()].clone();
        *next += 1;
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_model_cycles_through_replies() {
        let model = ScriptedChatModel::new(vec!["one".to_string(), "two".to_string()]);

        assert_eq!(model.chat("", &[]).await.unwrap(), "one");
        assert_eq!(model.chat("", &[]).await.unwrap(), "two");
        assert_eq!(model.chat("", &[]).await.unwrap(), "one");
    }

    #[tokio::test]
    async fn empty_script_is_an_error() {
        let model = ScriptedChatModel::new(vec![]);
        assert!(model.chat("", &[]).await.is_err());
    }
}
