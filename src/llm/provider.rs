use async_trait::async_trait;

use crate::errors::PhishguardError;
use crate::image::InlineImage;

use super::types::LLMResponse;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Run one classification prompt, optionally with a page screenshot
    /// attached. The reply is free-form text expected to contain JSON.
    async fn analyze(
        &self,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<LLMResponse, PhishguardError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}
