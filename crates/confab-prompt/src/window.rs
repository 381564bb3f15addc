use crate::config::PromptConfig;
use crate::marker::{Marker, NoopMarker};
use confab_core::{ConfabError, ConfabResult, Content, ContentPart, ImageRef, Message, Role, TokenCounter};
use std::fmt;

/// Number of messages seeded at construction: the system preamble plus
/// the human/assistant seed exchange.
pub const PREAMBLE_LEN: usize = 3;

/// Ordered conversation window with a protected preamble and soft
/// count/token ceilings.
///
/// Insertion order is conversation order. Every `write` runs the eviction
/// check against the window as it stands *before* the new turn exists, so
/// a write may leave the window one message (or one message's tokens)
/// over the nominal ceiling; the next write settles it. At most one turn
/// is evicted per write.
pub struct PromptWindow {
    messages: Vec<Message>,
    config: PromptConfig,
    counter: Box<dyn TokenCounter>,
    marker: Box<dyn Marker>,
}

impl PromptWindow {
    /// Creates a window, validates the config, and seeds the preamble.
    ///
    /// The three seed turns go through the ordinary [`write`](Self::write)
    /// path, marker included.
    pub fn new(config: PromptConfig, counter: Box<dyn TokenCounter>) -> ConfabResult<Self> {
        Self::with_marker(config, counter, Box::new(NoopMarker))
    }

    /// Like [`new`](Self::new), with an explicit annotation pass.
    pub fn with_marker(
        config: PromptConfig,
        counter: Box<dyn TokenCounter>,
        marker: Box<dyn Marker>,
    ) -> ConfabResult<Self> {
        config.validate()?;

        let system = config.resolve_system_prompt();
        let human_seed = format!(
            "{}{}",
            config.lang.seed_human_prompt(&config.human_name),
            config.human_seed
        );
        let bot_seed = format!(
            "{}{}",
            config.lang.seed_assistant_prompt(&config.bot_name),
            config.bot_seed
        );

        let mut window = Self {
            messages: Vec::new(),
            config,
            counter,
            marker,
        };
        window
            .write(Role::System, &system)
            .write(Role::Human, &human_seed)
            .write(Role::Assistant, &bot_seed);
        Ok(window)
    }

    /// Appends a text turn, evicting first when a ceiling is already hit.
    ///
    /// The check runs before the new message exists: when the window holds
    /// `max_messages` entries or its serialized form is at or over
    /// `max_tokens`, exactly one message at `protected_prefix` is removed.
    /// The removal is a no-op while nothing sits past the prefix.
    pub fn write(&mut self, role: Role, content: &str) -> &mut Self {
        self.evict_if_needed();
        let marked = self.marker.mark(content);
        self.messages.push(Message::text(role, marked));
        self
    }

    /// Appends an image turn: the localized vision prompt plus the image
    /// reference as a two-part body.
    ///
    /// Runs the eviction check only when `evict_on_image` is configured;
    /// by default image turns bypass both ceilings. The vision text is
    /// stored verbatim, not marked.
    pub fn write_image(&mut self, role: Role, url: &str) -> &mut Self {
        if self.config.evict_on_image {
            self.evict_if_needed();
        }
        let parts = vec![
            ContentPart::Text {
                text: self.config.lang.vision_prompt().to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageRef {
                    url: url.to_string(),
                },
            },
        ];
        self.messages.push(Message::new(role, Content::Parts(parts)));
        self
    }

    /// Appends `content` to the most recent message in place.
    ///
    /// Fails when the window is empty.
    pub fn patch(&mut self, content: &str) -> ConfabResult<()> {
        let message = self
            .messages
            .last_mut()
            .ok_or_else(|| ConfabError::State("patch on an empty window".to_string()))?;
        message.append_text(content);
        Ok(())
    }

    /// Removes the most recent message; no-op when empty.
    pub fn erase(&mut self) -> &mut Self {
        self.messages.pop();
        self
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The role-tagged message array handed to the completion
    /// collaborator.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages currently held.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the window holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Estimated token length of the serialized window.
    ///
    /// Recomputed on every access, never cached. Bounded by
    /// `max_messages`, so repeated calls stay cheap enough.
    pub fn token_count(&self) -> usize {
        self.counter.count(&self.to_string())
    }

    fn evict_if_needed(&mut self) {
        let at_capacity = self.messages.len() >= self.config.max_messages
            || self.token_count() >= self.config.max_tokens;
        if at_capacity && self.messages.len() > self.config.protected_prefix {
            let evicted = self.messages.remove(self.config.protected_prefix);
            tracing::debug!(
                index = self.config.protected_prefix,
                role = %evicted.role(),
                remaining = self.messages.len(),
                "evicted oldest unprotected turn"
            );
        }
    }
}

impl fmt::Display for PromptWindow {
    /// The full transcript: every message's rendering concatenated in
    /// order, no separator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for message in &self.messages {
            write!(f, "{message}")?;
        }
        Ok(())
    }
}
