use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AiError;

/// One message of a conversation, as stored in chat memory and sent to models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Durable conversation history, keyed by an opaque conversation id.
///
/// A trivial get/update/delete contract: an unknown id reads as an empty
/// history, `update_messages` replaces the stored history wholesale.
#[async_trait]
pub trait ChatMemory: Send + Sync {
    async fn get_messages(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, AiError>;

    async fn update_messages(
        &self,
        conversation_id: &str,
        messages: &[ChatMessage],
    ) -> Result<(), AiError>;

    async fn delete_messages(&self, conversation_id: &str) -> Result<(), AiError>;
}

/// In-memory chat memory for dev/test.
#[derive(Debug, Default)]
pub struct InMemoryChatMemory {
    conversations: RwLock<HashMap<String, Vec<ChatMessage>>>,
}

impl InMemoryChatMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatMemory for InMemoryChatMemory {
    async fn get_messages(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, AiError> {
        let conversations = self
            .conversations
            .read()
            .map_err(|_| AiError::Internal("chat memory lock poisoned".to_string()))?;
        Ok(conversations.get(conversation_id).cloned().unwrap_or_default())
    }

    async fn update_messages(
        &self,
        conversation_id: &str,
        messages: &[ChatMessage],
    ) -> Result<(), AiError> {
        let mut conversations = self
            .conversations
            .write()
            .map_err(|_| AiError::Internal("chat memory lock poisoned".to_string()))?;
        conversations.insert(conversation_id.to_string(), messages.to_vec());
        Ok(())
    }

    async fn delete_messages(&self, conversation_id: &str) -> Result<(), AiError> {
        let mut conversations = self
            .conversations
            .write()
            .map_err(|_| AiError::Internal("chat memory lock poisoned".to_string()))?;
        conversations.remove(conversation_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_conversation_reads_empty() {
        let memory = InMemoryChatMemory::new();
        assert!(memory.get_messages("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_history_wholesale() {
        let memory = InMemoryChatMemory::new();

        memory
            .update_messages("talk", &[ChatMessage::user("hi")])
            .await
            .unwrap();
        memory
            .update_messages(
                "talk",
                &[ChatMessage::user("hi"), ChatMessage::assistant("hello")],
            )
            .await
            .unwrap();

        let history = memory.get_messages("talk").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, "assistant");
    }

    #[tokio::test]
    async fn delete_forgets_the_conversation() {
        let memory = InMemoryChatMemory::new();

        memory
            .update_messages("talk", &[ChatMessage::user("hi")])
            .await
            .unwrap();
        memory.delete_messages("talk").await.unwrap();

        assert!(memory.get_messages("talk").await.unwrap().is_empty());
    }
}
