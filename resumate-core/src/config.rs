//! Client configuration.
//!
//! A [`ClientConfig`] carries everything a chat backend needs: which
//! provider to talk to, the model and sampling settings, and where to find
//! the host or credential. The provider name stays a raw string so that an
//! unsupported value is reported when a request is attempted, not when the
//! configuration is assembled.

use crate::error::EvalError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default local model server address
pub const DEFAULT_LOCAL_HOST: &str = "http://localhost:11434";

/// Environment variable holding the hosted API key
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Fixed request timeout of the local backend
pub const LOCAL_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Default request timeout of the hosted backend
pub const DEFAULT_HOSTED_TIMEOUT: Duration = Duration::from_secs(120);

/// Supported chat backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Hosted OpenAI-compatible chat-completions API
    Hosted,
    /// Local Ollama-style model server
    Local,
}

impl ProviderKind {
    /// Model used when none is configured
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Hosted => "gpt-4o-mini",
            ProviderKind::Local => "llama3.1:8b",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" | "openai" => Ok(ProviderKind::Hosted),
            "local" | "ollama" => Ok(ProviderKind::Local),
            _ => Err(EvalError::configuration(format!(
                "unsupported provider: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Hosted => f.write_str("openai"),
            ProviderKind::Local => f.write_str("ollama"),
        }
    }
}

/// Generation settings shared by every backend
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: ProviderKind::Hosted.default_model().to_string(),
            temperature: 0.2,
            max_output_tokens: 1200,
        }
    }
}

/// Chat client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// Raw provider name (`api`/`openai` or `local`/`ollama`)
    pub provider: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Base URL of the local model server
    pub host: String,
    /// Explicit hosted API key; falls back to `api_key_env`
    pub api_key: Option<String>,
    pub api_key_env: String,
    /// Base URL override for OpenAI-compatible hosted APIs
    pub api_base: Option<String>,
    /// Timeout applied to hosted API requests
    pub request_timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("host", &self.host)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("api_base", &self.api_base)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(ProviderKind::Hosted.to_string())
    }
}

impl ClientConfig {
    /// Create a configuration for a provider, with that provider's default model
    pub fn new(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        let model = provider
            .parse::<ProviderKind>()
            .map(|kind| kind.default_model().to_string())
            .unwrap_or_default();

        Self {
            provider,
            model,
            temperature: 0.2,
            max_output_tokens: 1200,
            host: DEFAULT_LOCAL_HOST.to_string(),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_base: None,
            request_timeout: DEFAULT_HOSTED_TIMEOUT,
        }
    }

    /// Load configuration from the process environment.
    ///
    /// A `.env` file is read first if present. Recognized variables:
    /// `RESUMATE_PROVIDER`, `RESUMATE_MODEL`, `RESUMATE_TEMPERATURE`,
    /// `RESUMATE_MAX_TOKENS`, `OLLAMA_HOST` and `OPENAI_API_BASE`.
    pub fn from_env() -> Result<Self, EvalError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EvalError> {
        let mut config = Self::new(
            lookup("RESUMATE_PROVIDER").unwrap_or_else(|| ProviderKind::Hosted.to_string()),
        );

        if let Some(model) = lookup("RESUMATE_MODEL") {
            config.model = model;
        }
        if let Some(temperature) = lookup("RESUMATE_TEMPERATURE") {
            config.temperature = temperature.trim().parse().map_err(|_| {
                EvalError::configuration(format!(
                    "RESUMATE_TEMPERATURE must be a number, got '{}'",
                    temperature
                ))
            })?;
        }
        if let Some(max_tokens) = lookup("RESUMATE_MAX_TOKENS") {
            config.max_output_tokens = max_tokens.trim().parse().map_err(|_| {
                EvalError::configuration(format!(
                    "RESUMATE_MAX_TOKENS must be a positive integer, got '{}'",
                    max_tokens
                ))
            })?;
        }
        if let Some(host) = lookup("OLLAMA_HOST") {
            config.host = host;
        }
        config.api_base = lookup("OPENAI_API_BASE");

        Ok(config)
    }

    /// Set model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set max output tokens
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Set local server host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set an explicit hosted API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the environment variable the hosted API key is read from
    pub fn with_api_key_env(mut self, api_key_env: impl Into<String>) -> Self {
        self.api_key_env = api_key_env.into();
        self
    }

    /// Set hosted API base URL (for OpenAI-compatible APIs)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set hosted request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Resolve the provider name
    pub fn provider_kind(&self) -> Result<ProviderKind, EvalError> {
        self.provider.parse()
    }

    /// Settings forwarded with every chat completion request
    pub fn generation(&self) -> GenerationSettings {
        GenerationSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }

    /// Resolve the hosted API key, from the config first and then the environment
    pub fn resolve_api_key(&self) -> Result<String, EvalError> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| EvalError::configuration(format!("{} not set", self.api_key_env)))
    }

    /// Check provider name and value ranges
    pub fn validate(&self) -> Result<ProviderKind, EvalError> {
        let kind = self.provider_kind()?;

        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(EvalError::configuration(format!(
                "temperature must be within [0, 1], got {}",
                self.temperature
            )));
        }
        if self.max_output_tokens == 0 {
            return Err(EvalError::configuration(
                "max_output_tokens must be greater than zero",
            ));
        }
        if self.model.trim().is_empty() {
            return Err(EvalError::configuration("model is required"));
        }
        if kind == ProviderKind::Local && self.host.trim().is_empty() {
            return Err(EvalError::configuration("local host is not set"));
        }

        Ok(kind)
    }
}
