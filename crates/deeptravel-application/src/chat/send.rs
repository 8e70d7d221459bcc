use deeptravel_core::assistant::{AssistantBackend, AssistantRequest};
use deeptravel_core::attachment::{GeoFix, LocationProvider};
use deeptravel_core::chat::Message;
use std::sync::Arc;

use super::session::ChatSession;
use crate::now_millis;

/// Result of a successful send.
#[derive(Debug, Clone, PartialEq)]
pub struct SendOutcome {
    pub user_message: Message,
    /// `None` when the assistant backend failed
    pub reply: Option<Message>,
    pub location: Option<GeoFix>,
}

/// Sends the session's draft and pending attachments.
pub struct ChatSender {
    location: Arc<dyn LocationProvider>,
    assistant: Arc<dyn AssistantBackend>,
}

impl ChatSender {
    pub fn new(location: Arc<dyn LocationProvider>, assistant: Arc<dyn AssistantBackend>) -> Self {
        Self { location, assistant }
    }

    /// Appends the user message (clearing draft and attachments), attaches
    /// a best-effort location fix, and appends the assistant reply to the
    /// history the message was sent from.
    ///
    /// Returns `None` when the draft is blank and nothing is attached.
    pub async fn send(&self, session: &ChatSession, model: &str) -> Option<SendOutcome> {
        let token = session.current_request();

        let Some(committed) = session.commit_draft(now_millis()).await else {
            tracing::debug!("[ChatSender] Nothing to send");
            return None;
        };
        let key = committed.key;

        let location = match self.locate().await {
            Some(fix) if !session.is_current(token) => {
                tracing::debug!("[ChatSender] Discarding stale location fix {:?}", fix);
                None
            }
            fix => fix,
        };

        let request = AssistantRequest {
            text: committed.text,
            images_base64: committed.attachments.into_iter().filter_map(|a| a.base64).collect(),
            location,
            journey_id: key.journey_id.clone(),
            category: key.category,
            model: model.to_string(),
        };

        tracing::info!(
            "[ChatSender] Sending to {} ({} images, location: {})",
            key.storage_key(),
            request.images_base64.len(),
            request.location.is_some()
        );

        let reply = match self.assistant.reply(&request).await {
            Ok(content) => Some(
                session
                    .append_assistant_message_to(&key, now_millis(), content)
                    .await,
            ),
            Err(e) => {
                tracing::warn!("[ChatSender] Assistant reply failed: {}", e);
                None
            }
        };

        Some(SendOutcome {
            user_message: committed.message,
            reply,
            location,
        })
    }

    /// Denied permission or a failed fix both mean "no location".
    async fn locate(&self) -> Option<GeoFix> {
        match self.location.request_permission().await {
            Ok(status) if status.is_granted() => {}
            Ok(_) => {
                tracing::debug!("[ChatSender] Location permission not granted");
                return None;
            }
            Err(e) => {
                tracing::debug!("[ChatSender] Location permission request failed: {}", e);
                return None;
            }
        }

        match self.location.current_position().await {
            Ok(fix) => Some(fix),
            Err(e) => {
                tracing::debug!("[ChatSender] No location fix: {}", e);
                None
            }
        }
    }
}
