//! Layers wrap a provider with a cross-cutting concern.
//!
//! A [`Layer`] turns one provider into another. Most layers only need to
//! look at a request before it is sent and at the outcome afterwards; those
//! implement [`ChatHook`] and wrap the provider in [`Hooked`].

use crate::error::EvalError;
use crate::provider::Provider;
use crate::types::*;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Wraps an inner provider, producing a new provider.
pub trait Layer<P: Provider> {
    type Wrapped: Provider;

    fn layer(&self, inner: P) -> Self::Wrapped;
}

/// Observer called around every chat completion of a [`Hooked`] provider.
///
/// `before` runs with the request about to be sent and returns a ticket;
/// `after` receives that ticket with the outcome. The outcome itself is
/// passed through untouched.
pub trait ChatHook: Send + Sync + Debug + 'static {
    /// State carried from `before` to `after` for one request
    type Ticket: Send;

    fn before(&self, provider: &ProviderInfo, req: &ChatCompletionRequest) -> Self::Ticket;

    fn after(
        &self,
        ticket: Self::Ticket,
        outcome: &Result<ChatCompletionResponse, EvalError>,
    );
}

/// Provider observed by a [`ChatHook`].
#[derive(Debug)]
pub struct Hooked<P, H> {
    inner: P,
    hook: H,
}

impl<P, H> Hooked<P, H> {
    pub fn new(inner: P, hook: H) -> Self {
        Self { inner, hook }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }
}

#[async_trait]
impl<P: Provider, H: ChatHook> Provider for Hooked<P, H> {
    fn info(&self) -> Arc<ProviderInfo> {
        self.inner.info()
    }

    async fn chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, EvalError> {
        let ticket = self.hook.before(&self.inner.info(), &req);
        let outcome = self.inner.chat_completion(req).await;
        self.hook.after(ticket, &outcome);
        outcome
    }
}
