// src/provider/huggingface.rs — Hosted inference router (OpenAI-compatible chat completions)
//
// Speaks the `/chat/completions` wire format and maps HTTP failures onto the
// companion error taxonomy: 401/403 → Authentication, 429 → RateLimited,
// anything else (transport, status, malformed body) → Upstream.

use async_trait::async_trait;
use std::time::Duration;

use super::{ChatRequest, ChatResponse, ModelProvider, TokenUsage};
use crate::infra::config::GatewayConfig;
use crate::infra::errors::CompanionError;

const PROVIDER_ID: &str = "huggingface";

pub struct HuggingFaceProvider {
    token: String,
    base_url: String,
    client: reqwest::Client,
}

impl HuggingFaceProvider {
    pub fn new(token: String, base_url: String, timeout: Duration) -> Result<Self, CompanionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("wellness-companion/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CompanionError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &GatewayConfig, token: String) -> Result<Self, CompanionError> {
        Self::new(
            token,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn upstream(message: impl Into<String>) -> CompanionError {
        CompanionError::Upstream {
            provider: PROVIDER_ID.into(),
            message: message.into(),
        }
    }
}

/// JSON body for a chat-completion call.
fn build_body(request: &ChatRequest) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|m| serde_json::json!({"role": m.role.as_str(), "content": m.content}))
        .collect();

    let mut body = serde_json::json!({
        "model": request.model,
        "messages": messages,
    });
    if let Some(max_tokens) = request.max_tokens {
        body["max_tokens"] = serde_json::json!(max_tokens);
    }
    body
}

/// Extract the first choice's message text. `None` when the body is not a completion.
fn parse_completion(resp: &serde_json::Value) -> Option<ChatResponse> {
    let content = resp["choices"][0]["message"]["content"].as_str()?.to_string();
    let usage = TokenUsage {
        input_tokens: resp["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
        output_tokens: resp["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
    };
    Some(ChatResponse { content, usage })
}

fn status_error(status: reqwest::StatusCode, body: &str) -> CompanionError {
    match status.as_u16() {
        401 | 403 => CompanionError::Authentication {
            provider: PROVIDER_ID.into(),
            message: format!("HTTP {status}: {body}"),
        },
        429 => CompanionError::RateLimited {
            provider: PROVIDER_ID.into(),
        },
        _ => HuggingFaceProvider::upstream(format!("HTTP {status}: {body}")),
    }
}

#[async_trait]
impl ModelProvider for HuggingFaceProvider {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    fn name(&self) -> &str {
        "Hugging Face Inference"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, CompanionError> {
        let body = build_body(&request);

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Self::upstream(format!("Request timed out: {e}"))
                } else {
                    Self::upstream(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &error_body));
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Self::upstream(format!("Failed to parse response: {e}")))?;

        parse_completion(&resp).ok_or_else(|| Self::upstream("Response carried no completion"))
    }
}
