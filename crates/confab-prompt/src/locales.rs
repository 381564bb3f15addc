use serde::{Deserialize, Serialize};

/// Language of the bundled prompt fragments.
///
/// Pure data, resolved at window construction and image-write time; no
/// runtime lookup beyond a match on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lang {
    /// English.
    #[default]
    En,
    /// Traditional Chinese (Taiwan).
    ZhTw,
}

impl Lang {
    /// Fallback system instruction when neither a persona nor a
    /// configured prompt is set.
    pub fn default_system_prompt(self) -> &'static str {
        match self {
            Lang::En => "You are a helpful assistant. Answer as concisely as you can.",
            Lang::ZhTw => "你是一位樂於助人的助理，請盡量以簡潔的方式回答。",
        }
    }

    /// Template for the seeded human introduction.
    pub fn seed_human_prompt(self, name: &str) -> String {
        match self {
            Lang::En => format!("Hi, my name is {name}. "),
            Lang::ZhTw => format!("你好，我的名字是{name}。"),
        }
    }

    /// Template for the seeded assistant introduction.
    pub fn seed_assistant_prompt(self, name: &str) -> String {
        match self {
            Lang::En => format!("Nice to meet you, I am {name}. "),
            Lang::ZhTw => format!("很高興認識你，我是{name}。"),
        }
    }

    /// Text part paired with every image reference.
    pub fn vision_prompt(self) -> &'static str {
        match self {
            Lang::En => "Please describe this image.",
            Lang::ZhTw => "請描述這張圖片。",
        }
    }
}
