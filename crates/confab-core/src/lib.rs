//! Core types and error definitions for confab.
//!
//! This crate provides the foundational types shared across all confab
//! crates: the role-tagged conversation message, its content union, error
//! handling, and the pluggable token-counting capability.
//!
//! # Main types
//!
//! - [`ConfabError`] — Unified error enum for all confab subsystems.
//! - [`ConfabResult`] — Convenience alias for `Result<T, ConfabError>`.
//! - [`Role`] — Message role (system, human, assistant).
//! - [`Message`] — A single turn within a conversation.
//! - [`Content`] — Plain-text or multi-part message body.
//! - [`TokenCounter`] — Capability trait for estimating token length.

/// Conversation message types.
pub mod message;
/// Token counting implementations.
pub mod token;

pub use message::{Content, ContentPart, ImageRef, Message, Role};
pub use token::{HeuristicCounter, TokenCounter};
#[cfg(feature = "bpe")]
pub use token::BpeCounter;

// --- Error types ---

/// Top-level error type for confab.
///
/// Each variant corresponds to a subsystem that can produce errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfabError {
    /// A configuration value was rejected during validation.
    #[error("Config error: {0}")]
    Config(String),

    /// An operation was invoked while the target was in an invalid state.
    #[error("State error: {0}")]
    State(String),

    /// An error from an outbound HTTP request (e.g. completion API call).
    #[error("HTTP error: {0}")]
    Http(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`ConfabError`].
pub type ConfabResult<T> = Result<T, ConfabError>;
