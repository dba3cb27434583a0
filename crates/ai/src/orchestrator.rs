use crate::agent::StorageAgent;
use crate::error::AiError;

/// Entry point the HTTP adapters talk to.
///
/// Doesn't orchestrate much yet — there is only the one storage agent — but
/// it keeps the adapters ignorant of how many agents sit behind the facade.
pub struct LlmOrchestrator {
    storage_agent: StorageAgent,
}

impl LlmOrchestrator {
    pub fn new(storage_agent: StorageAgent) -> Self {
        Self { storage_agent }
    }

    pub async fn call(&self, request: &str) -> Result<String, AiError> {
        self.storage_agent.chat(request).await
    }
}
