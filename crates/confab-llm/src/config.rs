use serde::{Deserialize, Serialize};

/// Configuration for an OpenAI-compatible completion backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Bearer token for the API.
    pub api_key: String,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Override for the API origin; the provider default when absent.
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Completion-side token cap; the response budget, not the window's
    /// prompt-side ceiling.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

impl BackendConfig {
    /// The API origin requests are sent to.
    pub fn base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or("https://api.openai.com")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: BackendConfig =
            serde_json::from_str(r#"{"api_key": "sk-test"}"#).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url(), "https://api.openai.com");
        assert_eq!(config.max_tokens, 1024);
    }

    #[test]
    fn base_url_override() {
        let config = BackendConfig {
            api_key: "k".into(),
            model: "m".into(),
            api_base_url: Some("http://localhost:8080".into()),
            temperature: 0.0,
            max_tokens: 16,
        };
        assert_eq!(config.base_url(), "http://localhost:8080");
    }
}
