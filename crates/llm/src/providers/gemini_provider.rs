use super::CompletionProvider;
use crate::config::GatewayConfig;
use crate::errors::GatewayError;
use crate::retry::{execute_with_retry, RetryConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// `generateContent` client: one POST per attempt, key passed as `?key=`
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    api_key: String,
    model: String,
    endpoint: String,
    client: Client,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl GeminiProvider {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| GatewayError::Config("GEMINI_API_KEY is not set".to_string()))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            model: config.model.clone(),
            endpoint: config.endpoint_url(),
            client,
            timeout: config.timeout,
            retry_config: RetryConfig::new().with_max_retries(config.max_retries),
        })
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_once(
        client: Client,
        endpoint: String,
        api_key: String,
        timeout: Duration,
        request: GeminiRequest,
    ) -> Result<String, GatewayError> {
        let response = client
            .post(&endpoint)
            .query(&[("key", api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::from_reqwest_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Envelope(format!("failed to parse response: {e}")))?;

        envelope.into_text()
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let start_time = Instant::now();
        let request = GeminiRequest::single_prompt(prompt);

        debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "Sending completion request"
        );

        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let api_key = self.api_key.clone();
        let timeout = self.timeout;

        let text = execute_with_retry(&self.retry_config, || {
            Box::pin(Self::send_once(
                client.clone(),
                endpoint.clone(),
                api_key.clone(),
                timeout,
                request.clone(),
            ))
        })
        .await?;

        info!(
            model = %self.model,
            duration_ms = start_time.elapsed().as_millis() as u64,
            response_chars = text.chars().count(),
            "Completion received"
        );

        Ok(text)
    }
}

// generateContent request/response shapes

#[derive(Debug, Clone, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

impl GeminiRequest {
    fn single_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

impl GeminiResponse {
    /// `candidates[0].content.parts[0].text`
    fn into_text(self) -> Result<String, GatewayError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Envelope("no candidates in response".to_string()))?;
        let content = candidate
            .content
            .ok_or_else(|| GatewayError::Envelope("candidate has no content".to_string()))?;
        let part = content
            .parts
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Envelope("content has no parts".to_string()))?;
        part.text
            .ok_or_else(|| GatewayError::Envelope("part has no text".to_string()))
    }
}
