//! Bounded, token-budget-aware conversation window.
//!
//! [`PromptWindow`] accumulates role-tagged turns for one conversation,
//! seeds a fixed three-message preamble at construction, and evicts the
//! oldest unprotected turn whenever a message-count or estimated-token
//! ceiling is hit. The serialized window is the literal transcript handed
//! to the completion collaborator.
//!
//! One window per conversation: operations are synchronous and assume
//! exclusive access by the owning session.

/// Window configuration.
pub mod config;
/// Bundled prompt fragments per language.
pub mod locales;
/// Content annotation seam.
pub mod marker;
/// The conversation window itself.
pub mod window;

pub use config::PromptConfig;
pub use locales::Lang;
pub use marker::{Marker, NoopMarker};
pub use window::{PromptWindow, PREAMBLE_LEN};
