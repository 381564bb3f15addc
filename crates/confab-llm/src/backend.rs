use crate::config::BackendConfig;
use async_trait::async_trait;
use confab_core::{ConfabError, ConfabResult, Message};

/// A completed model response.
#[derive(Debug, Clone)]
pub struct Completion {
    /// The assistant's reply text.
    pub content: String,
    /// Why generation stopped, as reported by the provider.
    pub finish_reason: Option<String>,
    /// Total token usage for the exchange, when reported.
    pub total_tokens: Option<u64>,
}

/// The completion-request collaborator.
///
/// Consumes the window's message array verbatim; [`Message`] serializes
/// to the exact role/content shape the chat API expects.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Requests a completion for the given conversation.
    async fn complete(&self, messages: &[Message]) -> ConfabResult<Completion>;
}

/// OpenAI-compatible chat-completions backend.
///
/// Works against OpenAI itself and any provider that mirrors the
/// `/v1/chat/completions` contract.
pub struct OpenAiBackend {
    config: BackendConfig,
    http: reqwest::Client,
}

impl OpenAiBackend {
    /// Creates a backend with its own HTTP client.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, messages: &[Message]) -> ConfabResult<Completion> {
        let url = format!("{}/v1/chat/completions", self.config.base_url());

        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": messages,
        });

        tracing::debug!(model = %self.config.model, messages = messages.len(), "requesting completion");

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ConfabError::Http(e.to_string()))?;

        let status = resp.status();
        let resp_body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ConfabError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(ConfabError::Http(format!(
                "completion API error {status}: {resp_body}"
            )));
        }

        parse_completion(&resp_body)
    }
}

fn parse_completion(body: &serde_json::Value) -> ConfabResult<Completion> {
    let choice = body
        .get("choices")
        .and_then(|c| c.get(0))
        .ok_or_else(|| ConfabError::Http(format!("malformed completion response: {body}")))?;

    let content = choice
        .pointer("/message/content")
        .and_then(|c| c.as_str())
        .ok_or_else(|| ConfabError::Http(format!("completion without content: {body}")))?
        .to_string();

    let finish_reason = choice
        .get("finish_reason")
        .and_then(|r| r.as_str())
        .map(str::to_string);

    let total_tokens = body.pointer("/usage/total_tokens").and_then(|t| t.as_u64());

    Ok(Completion {
        content,
        finish_reason,
        total_tokens,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_response() {
        let body = serde_json::json!({
            "choices": [{
                "message": {"role": "assistant", "content": "Hello!"},
                "finish_reason": "stop",
            }],
            "usage": {"total_tokens": 42},
        });
        let completion = parse_completion(&body).unwrap();
        assert_eq!(completion.content, "Hello!");
        assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
        assert_eq!(completion.total_tokens, Some(42));
    }

    #[test]
    fn missing_choices_is_an_error() {
        let err = parse_completion(&serde_json::json!({})).unwrap_err();
        assert!(matches!(err, ConfabError::Http(_)));
    }

    #[test]
    fn missing_content_is_an_error() {
        let body = serde_json::json!({"choices": [{"message": {}}]});
        assert!(parse_completion(&body).is_err());
    }
}
