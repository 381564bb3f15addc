//! Completion-request boundary for confab.
//!
//! The conversation window produces a role-tagged message array; this
//! crate carries it to an OpenAI-compatible chat-completions endpoint.
//! [`CompletionBackend`] is the seam; swap in another provider by
//! implementing it.

/// Backend configuration.
pub mod config;
/// The backend trait and the OpenAI-compatible implementation.
pub mod backend;

pub use backend::{Completion, CompletionBackend, OpenAiBackend};
pub use config::BackendConfig;
