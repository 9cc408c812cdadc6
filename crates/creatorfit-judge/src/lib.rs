//! LLM judgment service client.
//!
//! Sends single-message chat completions to an OpenAI-compatible endpoint
//! and returns the raw reply text. Replies are untrusted; parsing and
//! validation belong to the caller.

pub mod client;
pub mod error;
pub mod judge;
pub mod types;

pub use client::JudgeClient;
pub use error::JudgeError;
pub use judge::{CompletionRequest, Judge};
