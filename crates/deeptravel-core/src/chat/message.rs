//! Chat message types.

use serde::{Deserialize, Serialize};

const ASSISTANT_ID_SUFFIX: &str = "-bot";

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message typed (or photographed) by the traveller.
    User,
    /// Reply produced by the assistant backend.
    Assistant,
}

/// A single entry of a chat history.
///
/// Messages are append-only: once stored they are never edited or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Send timestamp in epoch millis; assistant replies append `-bot`.
    pub id: String,
    pub role: MessageRole,
    /// Display text; image-only sends carry a count placeholder.
    pub content: String,
    /// Local references of the images sent with this message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<Vec<String>>,
}

impl Message {
    /// Builds the user message for a send.
    ///
    /// Returns `None` when the trimmed text is empty and no image is attached.
    pub fn user(sent_at_millis: i64, text: &str, image_uris: Vec<String>) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() && image_uris.is_empty() {
            return None;
        }

        let content = if text.is_empty() {
            image_placeholder(image_uris.len())
        } else {
            text.to_string()
        };

        Some(Self {
            id: sent_at_millis.to_string(),
            role: MessageRole::User,
            content,
            image_uris: if image_uris.is_empty() {
                None
            } else {
                Some(image_uris)
            },
        })
    }

    /// Builds the assistant reply paired with the send at `sent_at_millis`.
    pub fn assistant_reply(sent_at_millis: i64, content: impl Into<String>) -> Self {
        Self {
            id: format!("{}{}", sent_at_millis, ASSISTANT_ID_SUFFIX),
            role: MessageRole::Assistant,
            content: content.into(),
            image_uris: None,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    /// Number of images attached to this message.
    pub fn image_count(&self) -> usize {
        self.image_uris.as_ref().map_or(0, Vec::len)
    }
}

/// Content used for a message that only carries images.
pub fn image_placeholder(count: usize) -> String {
    if count == 1 {
        "(1 image)".to_string()
    } else {
        format!("({} images)", count)
    }
}

/// Case-insensitive substring search over message content.
///
/// A blank query matches every message.
pub fn filter_messages<'a>(messages: &'a [Message], query: &str) -> Vec<&'a Message> {
    let query = query.trim();
    if query.is_empty() {
        return messages.iter().collect();
    }

    let keyword = query.to_lowercase();
    messages
        .iter()
        .filter(|m| m.content.to_lowercase().contains(&keyword))
        .collect()
}
