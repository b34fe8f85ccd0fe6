use crate::errors::GatewayError;
use async_trait::async_trait;

pub mod gemini_provider;
pub mod mock_provider;

pub use gemini_provider::GeminiProvider;
pub use mock_provider::MockProvider;

/// Text-in, text-out completion endpoint
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short label for logs and the CLI status line
    fn name(&self) -> &str;

    /// Send `prompt` and return the raw text of the first candidate
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}

#[async_trait]
impl<P: CompletionProvider + ?Sized> CompletionProvider for std::sync::Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        (**self).complete(prompt).await
    }
}

#[async_trait]
impl<P: CompletionProvider + ?Sized> CompletionProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        (**self).complete(prompt).await
    }
}
