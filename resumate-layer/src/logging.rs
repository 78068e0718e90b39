//! Logging layer for provider operations.

use resumate_core::error::EvalError;
use resumate_core::layer::{ChatHook, Hooked, Layer};
use resumate_core::provider::Provider;
use resumate_core::types::*;
use std::time::Instant;
use uuid::Uuid;

/// Logging layer that logs provider operations.
#[derive(Debug, Clone)]
pub struct LoggingLayer {
    prefix: String,
}

/// Provider wrapped with logging
pub type LoggingProvider<P> = Hooked<P, LoggingLayer>;

impl LoggingLayer {
    /// Create a new logging layer
    pub fn new() -> Self {
        Self {
            prefix: "[resumate]".to_string(),
        }
    }

    /// Create a logging layer with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for LoggingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Provider> Layer<P> for LoggingLayer {
    type Wrapped = LoggingProvider<P>;

    fn layer(&self, inner: P) -> Self::Wrapped {
        Hooked::new(inner, self.clone())
    }
}

/// Request id and start time of one logged completion
#[derive(Debug)]
pub struct RequestTicket {
    id: Uuid,
    started: Instant,
}

impl ChatHook for LoggingLayer {
    type Ticket = RequestTicket;

    fn before(&self, provider: &ProviderInfo, req: &ChatCompletionRequest) -> RequestTicket {
        let id = Uuid::new_v4();
        let prompt_chars: usize = req.messages.iter().map(|m| m.content.len()).sum();

        tracing::debug!(
            "{} chat_completion request: id={}, provider={}, model={}, messages={}, prompt_chars={}",
            self.prefix,
            id,
            provider.id,
            req.model,
            req.messages.len(),
            prompt_chars
        );

        RequestTicket {
            id,
            started: Instant::now(),
        }
    }

    fn after(
        &self,
        ticket: RequestTicket,
        outcome: &Result<ChatCompletionResponse, EvalError>,
    ) {
        let elapsed = ticket.started.elapsed();

        match outcome {
            Ok(response) => {
                tracing::debug!(
                    "{} chat_completion success: id={}, choices={}, tokens={}, elapsed={:?}",
                    self.prefix,
                    ticket.id,
                    response.choices.len(),
                    response.usage.total_tokens,
                    elapsed
                );
            }
            Err(e) if e.is_configuration() => {
                tracing::warn!(
                    "{} chat_completion rejected: id={}, {}",
                    self.prefix,
                    ticket.id,
                    e
                );
            }
            Err(e) => {
                tracing::error!(
                    "{} chat_completion error: id={}, {:?}, elapsed={:?}",
                    self.prefix,
                    ticket.id,
                    e,
                    elapsed
                );
            }
        }
    }
}
