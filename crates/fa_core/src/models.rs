use async_trait::async_trait;

use crate::Result;

#[async_trait]
pub trait CompletionModel: Send + Sync + std::fmt::Debug {
    /// Returns the name of the model backend
    fn name(&self) -> &str;

    /// Run a single chat completion with a system prompt and a user prompt
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}
