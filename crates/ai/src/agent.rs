use std::sync::Arc;

use crate::error::AiError;
use crate::memory::{ChatMemory, ChatMessage};
use crate::model::ChatModel;

/// System prompt the storage agent runs with.
pub const SYSTEM_PROMPT: &str = "If prompted, tell the user that you're confused and don't \
quite know who or what you are. They should help you understand that better by providing you \
with a proper system prompt.";

/// Conversation id used when the caller does not manage sessions.
const DEFAULT_CONVERSATION: &str = "default";

/// The one agent behind the chat facade.
///
/// Keeps its conversation in durable chat memory: each call loads the stored
/// history, appends the user message, asks the model, appends the reply, and
/// persists the whole history back.
pub struct StorageAgent {
    model: Arc<dyn ChatModel>,
    memory: Arc<dyn ChatMemory>,
    conversation_id: String,
}

impl StorageAgent {
    pub fn new(model: Arc<dyn ChatModel>, memory: Arc<dyn ChatMemory>) -> Self {
        Self {
            model,
            memory,
            conversation_id: DEFAULT_CONVERSATION.to_string(),
        }
    }

    pub async fn chat(&self, user_message: &str) -> Result<String, AiError> {
        let mut history = self.memory.get_messages(&self.conversation_id).await?;
        if history.is_empty() {
            tracing::info!(conversation = %self.conversation_id, "starting new conversation");
        }

        history.push(ChatMessage::user(user_message));
        let reply = self.model.chat(SYSTEM_PROMPT, &history).await?;
        history.push(ChatMessage::assistant(reply.clone()));

        self.memory
            .update_messages(&self.conversation_id, &history)
            .await?;

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryChatMemory;
    use crate::model::ScriptedChatModel;

    #[tokio::test]
    async fn agent_persists_the_exchange() {
        let memory = Arc::new(InMemoryChatMemory::new());
        let agent = StorageAgent::new(
            Arc::new(ScriptedChatModel::new(vec!["hello there".to_string()])),
            memory.clone(),
        );

        let reply = agent.chat("who are you?").await.unwrap();
        assert_eq!(reply, "hello there");

        let history = memory.get_messages("default").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], ChatMessage::user("who are you?"));
        assert_eq!(history[1], ChatMessage::assistant("hello there"));
    }

    #[tokio::test]
    async fn history_grows_across_calls() {
        let memory = Arc::new(InMemoryChatMemory::new());
        let agent = StorageAgent::new(Arc::new(ScriptedChatModel::default()), memory.clone());

        agent.chat("first").await.unwrap();
        agent.chat("second").await.unwrap();

        let history = memory.get_messages("default").await.unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history[2], ChatMessage::user("second".to_string()));
    }
}
