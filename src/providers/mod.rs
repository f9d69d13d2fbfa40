//! Generation capability boundary: one prompt in, one body of text out.
//!
//! Providers are constructed with all required configuration (credentials,
//! model token, request timeout) so a missing credential fails at startup,
//! never mid-batch. The synthesizer calls [`GenerationProvider::generate`]
//! exactly once per batch; retry policy belongs to the caller.

use anyhow::Result;

mod anthropic;
mod openai;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

/// Trait implemented by concrete text-generation backends.
pub trait GenerationProvider {
    /// Performs a single request/response exchange with the backend.
    fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// The opaque model token this provider was configured with.
    fn model(&self) -> &str;
}

/// Request envelope shared by the various providers.
pub struct GenerationRequest<'a> {
    /// Full prompt text for the single exchange.
    pub prompt: &'a str,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens requested from the backend.
    pub max_tokens: usize,
}
