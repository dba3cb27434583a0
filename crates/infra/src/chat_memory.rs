//! Postgres-backed chat memory.
//!
//! One row per conversation id, holding the JSON-serialized message list.
//! The whole history is replaced on every update, matching the
//! [`ChatMemory`] contract.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use larder_ai::{AiError, ChatMemory, ChatMessage};

#[derive(Debug, Clone)]
pub struct PostgresChatMemory {
    pool: PgPool,
}

impl PostgresChatMemory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotently create the chat memory table.
    pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chat_memory (
                id UUID PRIMARY KEY,
                conversation_id TEXT NOT NULL UNIQUE,
                json_messages TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;
        Ok(())
    }
}

fn internal(e: impl std::fmt::Display) -> AiError {
    AiError::Internal(format!("chat memory: {e}"))
}

#[async_trait]
impl ChatMemory for PostgresChatMemory {
    async fn get_messages(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, AiError> {
        let row = sqlx::query("SELECT json_messages FROM chat_memory WHERE conversation_id = $1")
            .bind(conversation_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;

        match row {
            Some(row) => {
                let json: String = row.try_get("json_messages").map_err(internal)?;
                serde_json::from_str(&json).map_err(internal)
            }
            None => {
                tracing::info!(conversation = %conversation_id, "no stored history yet");
                Ok(vec![])
            }
        }
    }

    async fn update_messages(
        &self,
        conversation_id: &str,
        messages: &[ChatMessage],
    ) -> Result<(), AiError> {
        let json = serde_json::to_string(messages).map_err(internal)?;

        sqlx::query(
            r#"
            INSERT INTO chat_memory (id, conversation_id, json_messages)
            VALUES ($1, $2, $3)
            ON CONFLICT (conversation_id)
            DO UPDATE SET json_messages = EXCLUDED.json_messages
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(conversation_id)
        .bind(&json)
        .execute(&self.pool)
        .await
        .map_err(internal)?;

        Ok(())
    }

    async fn delete_messages(&self, conversation_id: &str) -> Result<(), AiError> {
        sqlx::query("DELETE FROM chat_memory WHERE conversation_id = $1")
            .bind(conversation_id)
            .execute(&self.pool)
            .await
            .map_err(internal)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Requires a reachable Postgres; run with:
    //   DATABASE_URL=postgres://... cargo test -p larder-infra -- --ignored
    #[tokio::test]
    #[ignore]
    async fn history_round_trip() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for this test");
        let pool = PgPool::connect(&url).await.expect("connect to postgres");
        PostgresChatMemory::init_schema(&pool).await.expect("init schema");
        let memory = PostgresChatMemory::new(pool);

        let conversation = format!("itest-{}", Uuid::now_v7());
        assert!(memory.get_messages(&conversation).await.unwrap().is_empty());

        let history = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        memory.update_messages(&conversation, &history).await.unwrap();
        assert_eq!(memory.get_messages(&conversation).await.unwrap(), history);

        memory.delete_messages(&conversation).await.unwrap();
        assert!(memory.get_messages(&conversation).await.unwrap().is_empty());
    }
}
