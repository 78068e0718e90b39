//! Configuration-driven chat client.
//!
//! [`ChatClient`] resolves its backend from the [`ClientConfig`] on every
//! call: the provider name is checked, the credential or host is looked up,
//! and a fresh backend client sends the request. Nothing is cached between
//! calls, so a configuration error is reported before any network activity.

use crate::ollama::OllamaProvider;
use crate::openai::OpenAiProvider;
use async_trait::async_trait;
use resumate_core::config::{ClientConfig, ProviderKind};
use resumate_core::error::EvalError;
use resumate_core::provider::Provider;
use resumate_core::types::*;
use std::sync::Arc;

enum Backend {
    Hosted(OpenAiProvider),
    Local(OllamaProvider),
}

/// Chat client dispatching to the configured backend
#[derive(Debug, Clone)]
pub struct ChatClient {
    config: ClientConfig,
}

impl ChatClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn backend(&self) -> Result<Backend, EvalError> {
        match self.config.validate()? {
            ProviderKind::Hosted => {
                let mut builder = OpenAiProvider::builder()
                    .api_key(self.config.resolve_api_key()?)
                    .timeout(self.config.request_timeout);
                if let Some(api_base) = &self.config.api_base {
                    builder = builder.api_base(api_base.as_str());
                }
                Ok(Backend::Hosted(builder.build()?))
            }
            ProviderKind::Local => Ok(Backend::Local(
                OllamaProvider::builder()
                    .host(self.config.host.as_str())
                    .build()?,
            )),
        }
    }

    /// Send messages with the configured model and sampling settings.
    ///
    /// Returns the text of the first completion choice.
    pub async fn chat(&self, messages: Vec<Message>) -> Result<String, EvalError> {
        let settings = self.config.generation();
        let req = ChatCompletionRequest::new(settings.model, messages)
            .with_temperature(settings.temperature)
            .with_max_tokens(settings.max_output_tokens)
            .with_response_format(ResponseFormat::JsonObject)
            .with_stream(false);

        let response = self.chat_completion(req).await?;

        response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| EvalError::provider("No choices in response"))
    }
}

#[async_trait]
impl Provider for ChatClient {
    fn info(&self) -> Arc<ProviderInfo> {
        let (id, name) = match self.config.provider_kind() {
            Ok(ProviderKind::Hosted) => ("openai".to_string(), "OpenAI".to_string()),
            Ok(ProviderKind::Local) => ("ollama".to_string(), "Ollama".to_string()),
            Err(_) => (self.config.provider.clone(), self.config.provider.clone()),
        };
        Arc::new(ProviderInfo { id, name })
    }

    async fn chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, EvalError> {
        match self.backend()? {
            Backend::Hosted(provider) => provider.chat_completion(req).await,
            Backend::Local(provider) => provider.chat_completion(req).await,
        }
    }
}
