//! Narrow bridge to a text-generation backend.

use async_trait::async_trait;

use crate::LlmError;

/// A single-turn, non-streaming text generator.
///
/// Implemented once per concrete backend; scoring and suggestion code only
/// ever see this trait.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    fn model_name(&self) -> &str;
}
