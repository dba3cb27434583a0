//! Production LLM backends.

mod openai;

pub use openai::OpenAiCompatibleModel;
