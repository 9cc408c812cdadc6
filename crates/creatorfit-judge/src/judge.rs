//! The judgment-service seam.

use std::future::Future;

use crate::error::JudgeError;

/// One single-turn completion: a user-role prompt for a given model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    #[must_use]
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A text-completion oracle.
///
/// [`crate::JudgeClient`] talks to a real LLM endpoint; tests substitute a
/// scripted implementation.
pub trait Judge: Send + Sync {
    /// Returns the reply text for `request`.
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = Result<String, JudgeError>> + Send;
}
