//! Completion gateway
//!
//! One configured `generateContent` endpoint behind the [`CompletionProvider`]
//! trait, with a bounded timeout and at most one retry on transient failures.
//! [`MockProvider`] is the explicit offline/test stand-in.

pub mod config;
pub mod errors;
pub mod providers;
pub mod retry;

use std::sync::Arc;
use tracing::{info, warn};

pub use config::{GatewayConfig, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
pub use errors::GatewayError;
pub use providers::{CompletionProvider, GeminiProvider, MockProvider};
pub use retry::{execute_with_retry, RetryConfig, RetryableError, MAX_RETRIES_CAP};

/// Pick the provider for this run: the mock when `offline`, otherwise Gemini.
/// A missing API key is an error rather than a silent fallback to the mock.
pub fn provider_from_config(
    config: &GatewayConfig,
    offline: bool,
) -> Result<Arc<dyn CompletionProvider>, GatewayError> {
    if offline {
        info!("Offline mode: using mock completion provider");
        return Ok(Arc::new(MockProvider::offline()));
    }

    match GeminiProvider::new(config) {
        Ok(provider) => {
            info!(model = %provider.model(), timeout = ?config.timeout, "Using Gemini provider");
            Ok(Arc::new(provider))
        }
        Err(e) => {
            warn!("Completion provider unavailable: {}", e);
            Err(e)
        }
    }
}
