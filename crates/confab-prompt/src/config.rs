use crate::locales::Lang;
use crate::window::PREAMBLE_LEN;
use confab_core::{ConfabError, ConfabResult};
use serde::{Deserialize, Serialize};

/// Configuration for a [`crate::PromptWindow`].
///
/// All fields are defaulted in the file format; an explicit struct passed
/// to the constructor, never a global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Message-count ceiling, preamble included. Soft: checked before a
    /// write appends, so the window settles at this size rather than
    /// being clipped to it mid-write.
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
    /// Estimated-token ceiling for the serialized window. Soft in the
    /// same pre-write sense.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    /// Number of leading messages eviction must never touch. At least the
    /// seeded preamble length.
    #[serde(default = "default_protected_prefix")]
    pub protected_prefix: usize,
    /// Whether image writes run the eviction check like text writes do.
    /// Off by default: image turns bypass both ceilings.
    #[serde(default)]
    pub evict_on_image: bool,
    /// Explicit persona text for the system preamble. Wins over
    /// `system_prompt` and the localized fallback when non-empty.
    #[serde(default)]
    pub persona: Option<String>,
    /// Configured default system instruction, used when `persona` is
    /// absent or blank.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Name the human introduces themselves with in the seed turn.
    #[serde(default = "default_human_name")]
    pub human_name: String,
    /// Extra text appended to the seeded human turn.
    #[serde(default)]
    pub human_seed: String,
    /// Name the assistant introduces itself with in the seed turn.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    /// Extra text appended to the seeded assistant turn.
    #[serde(default)]
    pub bot_seed: String,
    /// Language for the localized prompt fragments.
    #[serde(default)]
    pub lang: Lang,
}

fn default_max_messages() -> usize {
    15 + PREAMBLE_LEN
}

fn default_max_tokens() -> usize {
    2048
}

fn default_protected_prefix() -> usize {
    PREAMBLE_LEN
}

fn default_human_name() -> String {
    "Human".to_string()
}

fn default_bot_name() -> String {
    "AI".to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
            max_tokens: default_max_tokens(),
            protected_prefix: default_protected_prefix(),
            evict_on_image: false,
            persona: None,
            system_prompt: None,
            human_name: default_human_name(),
            human_seed: String::new(),
            bot_name: default_bot_name(),
            bot_seed: String::new(),
            lang: Lang::default(),
        }
    }
}

impl PromptConfig {
    /// Rejects ceilings that would break the window invariants.
    ///
    /// A prefix shorter than the seeded preamble would expose seed turns
    /// to eviction; a count ceiling at or below the prefix would leave no
    /// evictable slot and thrash forever; a zero token budget evicts on
    /// every write.
    pub fn validate(&self) -> ConfabResult<()> {
        if self.protected_prefix < PREAMBLE_LEN {
            return Err(ConfabError::Config(format!(
                "protected_prefix must be at least {PREAMBLE_LEN} (the seeded preamble), got {}",
                self.protected_prefix
            )));
        }
        if self.max_messages <= self.protected_prefix {
            return Err(ConfabError::Config(format!(
                "max_messages must exceed protected_prefix ({}), got {}",
                self.protected_prefix, self.max_messages
            )));
        }
        if self.max_tokens == 0 {
            return Err(ConfabError::Config(
                "max_tokens must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The system preamble text: the first non-blank of persona,
    /// configured system prompt, localized fallback.
    pub fn resolve_system_prompt(&self) -> String {
        self.persona
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                self.system_prompt
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
            })
            .unwrap_or_else(|| self.lang.default_system_prompt())
            .to_string()
    }
}
