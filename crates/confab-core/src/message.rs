use serde::{Deserialize, Serialize};
use std::fmt;

/// The role of the participant that authored a [`Message`].
///
/// The wire names follow the chat-completions API (`system` / `user` /
/// `assistant`); transcript rendering keeps the spoken name `human`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A system-level instruction or persona prompt.
    System,
    /// The human end-user.
    #[serde(rename = "user")]
    Human,
    /// The AI assistant.
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::System => "system",
            Role::Human => "human",
            Role::Assistant => "assistant",
        };
        f.write_str(name)
    }
}

/// A reference to an image by URL. Image bytes are never fetched or
/// counted; only the reference travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Location of the image.
    pub url: String,
}

/// One element of a multi-part message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// A text fragment.
    Text {
        /// The fragment itself.
        text: String,
    },
    /// An image reference.
    ImageUrl {
        /// The referenced image.
        image_url: ImageRef,
    },
}

/// The body of a [`Message`] — either a plain string or a sequence of
/// typed parts.
///
/// Serializes untagged: a bare JSON string, or an array of part objects,
/// which is exactly the content shape the completion API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// A plain text body.
    Text(String),
    /// A structured sequence of typed parts.
    Parts(Vec<ContentPart>),
}

/// A single turn in a conversation.
///
/// The role is fixed at construction; the content can only grow, via
/// [`Message::append_text`], which the owning buffer applies to its most
/// recent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: Content,
}

impl Message {
    /// Creates a message with the given role and content.
    pub fn new(role: Role, content: Content) -> Self {
        Self { role, content }
    }

    /// Creates a plain-text message.
    pub fn text(role: Role, content: impl Into<String>) -> Self {
        Self::new(role, Content::Text(content.into()))
    }

    /// Creates a plain-text message with [`Role::System`].
    pub fn system(content: impl Into<String>) -> Self {
        Self::text(Role::System, content)
    }

    /// Creates a plain-text message with [`Role::Human`].
    pub fn human(content: impl Into<String>) -> Self {
        Self::text(Role::Human, content)
    }

    /// Creates a plain-text message with [`Role::Assistant`].
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text(Role::Assistant, content)
    }

    /// The author of this message.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The body of this message.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Appends text to the message body in place.
    ///
    /// For a multi-part body the text lands in the last text part; a new
    /// text part is pushed when the sequence holds none.
    pub fn append_text(&mut self, text: &str) {
        match &mut self.content {
            Content::Text(body) => body.push_str(text),
            Content::Parts(parts) => {
                let last_text = parts
                    .iter_mut()
                    .rev()
                    .find_map(|part| match part {
                        ContentPart::Text { text } => Some(text),
                        ContentPart::ImageUrl { .. } => None,
                    });
                match last_text {
                    Some(body) => body.push_str(text),
                    None => parts.push(ContentPart::Text {
                        text: text.to_string(),
                    }),
                }
            }
        }
    }
}

impl fmt::Display for Message {
    /// Renders the turn as `"\n{role}: {body}"`.
    ///
    /// Image parts render as a fixed `[image]` placeholder so that the
    /// transcript stays deterministic and image bytes never reach the
    /// token counter. Concatenating renderings needs no separator; the
    /// leading newline marks each boundary.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}: ", self.role)?;
        match &self.content {
            Content::Text(body) => f.write_str(body),
            Content::Parts(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    match part {
                        ContentPart::Text { text } => f.write_str(text)?,
                        ContentPart::ImageUrl { .. } => f.write_str("[image]")?,
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::Human).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn text_message_wire_shape() {
        let msg = Message::human("Hello");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"role": "user", "content": "Hello"})
        );
    }

    #[test]
    fn parts_message_wire_shape() {
        let msg = Message::new(
            Role::Human,
            Content::Parts(vec![
                ContentPart::Text {
                    text: "Describe this".into(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageRef {
                        url: "https://example.com/cat.png".into(),
                    },
                },
            ]),
        );
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "Describe this"},
                    {"type": "image_url", "image_url": {"url": "https://example.com/cat.png"}},
                ]
            })
        );
    }

    #[test]
    fn content_deserializes_both_shapes() {
        let text: Content = serde_json::from_str("\"plain\"").unwrap();
        assert_eq!(text, Content::Text("plain".into()));

        let parts: Content =
            serde_json::from_str(r#"[{"type": "text", "text": "hi"}]"#).unwrap();
        assert_eq!(parts, Content::Parts(vec![ContentPart::Text { text: "hi".into() }]));
    }

    #[test]
    fn display_prefixes_role() {
        assert_eq!(Message::human("hi").to_string(), "\nhuman: hi");
        assert_eq!(Message::system("be terse").to_string(), "\nsystem: be terse");
    }

    #[test]
    fn display_renders_image_placeholder() {
        let msg = Message::new(
            Role::Human,
            Content::Parts(vec![
                ContentPart::Text {
                    text: "What is this?".into(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageRef {
                        url: "https://example.com/cat.png".into(),
                    },
                },
            ]),
        );
        let rendered = msg.to_string();
        assert_eq!(rendered, "\nhuman: What is this? [image]");
        assert!(!rendered.contains("example.com"));
    }

    #[test]
    fn append_text_grows_plain_body() {
        let mut msg = Message::assistant("Hello");
        msg.append_text(", world");
        assert_eq!(msg.content(), &Content::Text("Hello, world".into()));
    }

    #[test]
    fn append_text_targets_last_text_part() {
        let mut msg = Message::new(
            Role::Assistant,
            Content::Parts(vec![
                ContentPart::Text { text: "one".into() },
                ContentPart::ImageUrl {
                    image_url: ImageRef { url: "u".into() },
                },
            ]),
        );
        msg.append_text(" two");
        assert_eq!(
            msg.content(),
            &Content::Parts(vec![
                ContentPart::Text {
                    text: "one two".into()
                },
                ContentPart::ImageUrl {
                    image_url: ImageRef { url: "u".into() },
                },
            ])
        );
    }

    #[test]
    fn append_text_pushes_part_when_none_exists() {
        let mut msg = Message::new(
            Role::Human,
            Content::Parts(vec![ContentPart::ImageUrl {
                image_url: ImageRef { url: "u".into() },
            }]),
        );
        msg.append_text("caption");
        match msg.content() {
            Content::Parts(parts) => {
                assert_eq!(parts.len(), 2);
                assert_eq!(
                    parts[1],
                    ContentPart::Text {
                        text: "caption".into()
                    }
                );
            }
            Content::Text(_) => panic!("expected parts"),
        }
    }
}
