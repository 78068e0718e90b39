//! Local model server provider (Ollama chat API).
//!
//! Posts `{host}/api/chat` with `stream: false` and reads back
//! `message.content`. The response body is navigated loosely: a missing
//! `message` or `content` yields an empty completion instead of an error,
//! since local servers drift in shape between versions.

use async_trait::async_trait;
use resumate_core::config::{DEFAULT_LOCAL_HOST, LOCAL_REQUEST_TIMEOUT};
use resumate_core::error::EvalError;
use resumate_core::provider::Provider;
use resumate_core::types::*;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Local chat provider
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    http: reqwest::Client,
    host: String,
    info: Arc<ProviderInfo>,
}

impl OllamaProvider {
    /// Create a builder for configuration options
    pub fn builder() -> OllamaBuilder {
        OllamaBuilder::default()
    }

    /// Chat endpoint URL
    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.host)
    }

    fn build_body(req: &ChatCompletionRequest) -> OllamaChatRequest<'_> {
        OllamaChatRequest {
            model: &req.model,
            messages: req
                .messages
                .iter()
                .map(|m| OllamaMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: false,
            options: OllamaOptions {
                temperature: req.temperature,
                num_predict: req.max_tokens,
            },
        }
    }

    fn convert_response(model: &str, body: &Value) -> ChatCompletionResponse {
        let content = body
            .pointer("/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let finish_reason = match body.get("done_reason").and_then(Value::as_str) {
            None | Some("stop") => FinishReason::Stop,
            Some("length") => FinishReason::Length,
            Some(other) => FinishReason::Other(other.to_string()),
        };

        let count = |key: &str| {
            body.get(key)
                .and_then(Value::as_u64)
                .map_or(0, |n| n as u32)
        };
        let prompt_tokens = count("prompt_eval_count");
        let completion_tokens = count("eval_count");

        ChatCompletionResponse {
            id: body
                .get("created_at")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            model: body
                .get("model")
                .and_then(Value::as_str)
                .unwrap_or(model)
                .to_string(),
            choices: vec![Choice {
                index: 0,
                message: Message::assistant(content),
                finish_reason,
            }],
            usage: Usage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            },
            created: None,
        }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn info(&self) -> Arc<ProviderInfo> {
        self.info.clone()
    }

    async fn chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, EvalError> {
        let url = self.chat_url();
        tracing::debug!("POST {} model={}", url, req.model);

        let response = self
            .http
            .post(&url)
            .json(&Self::build_body(&req))
            .send()
            .await
            .map_err(EvalError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EvalError::status(status.as_u16(), body));
        }

        let text = response.text().await.map_err(EvalError::from_reqwest)?;
        let body: Value = serde_json::from_str(&text).map_err(|e| {
            EvalError::provider(format!("local server returned a non-JSON body: {}", e))
        })?;

        Ok(Self::convert_response(&req.model, &body))
    }
}

/// Builder for the local provider
#[derive(Default)]
pub struct OllamaBuilder {
    host: Option<String>,
    timeout: Option<Duration>,
}

impl OllamaBuilder {
    /// Set server base URL (defaults to `http://localhost:11434`)
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Override the 120 second request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the provider
    pub fn build(self) -> Result<OllamaProvider, EvalError> {
        let host = self.host.unwrap_or_else(|| DEFAULT_LOCAL_HOST.to_string());
        let host = host.trim().trim_end_matches('/').to_string();
        if host.is_empty() {
            return Err(EvalError::configuration("local host is not set"));
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(LOCAL_REQUEST_TIMEOUT))
            .build()
            .map_err(|e| EvalError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(OllamaProvider {
            http,
            host,
            info: Arc::new(ProviderInfo {
                id: "ollama".to_string(),
                name: "Ollama".to_string(),
            }),
        })
    }
}
