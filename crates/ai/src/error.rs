use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("invalid model input: {0}")]
    InvalidInput(String),

    #[error("inference failed: {0}")]
    InferenceFailed(String),

    #[error("internal error: {0}")]
    Internal(String),
}
