use deeptravel_core::attachment::{Attachment, Generation, GenerationCounter};
use deeptravel_core::chat::{ChatHistoryRepository, HistoryKey, Message, filter_messages};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// Point-in-time view of the active chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSnapshot {
    pub key: HistoryKey,
    pub messages: Vec<Message>,
    /// Unsent input text
    pub draft: String,
    /// Processed images waiting to be sent
    pub pending: Vec<Attachment>,
}

impl ChatSnapshot {
    fn empty(key: HistoryKey) -> Self {
        Self {
            key,
            messages: Vec::new(),
            draft: String::new(),
            pending: Vec::new(),
        }
    }
}

/// A user message produced from the draft, with the inputs it consumed.
pub(crate) struct CommittedDraft {
    pub key: HistoryKey,
    pub message: Message,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

/// Owns the single cached history for the active (journey, category) pair.
///
/// Every mutation rewrites the whole history to storage. Asynchronous
/// attachment and location requests carry a [`Generation`]; switching the
/// active key or starting a new request invalidates older tokens.
pub struct ChatSession {
    history: Arc<dyn ChatHistoryRepository>,
    state: watch::Sender<ChatSnapshot>,
    requests: GenerationCounter,
    write_lock: Mutex<()>,
}

impl ChatSession {
    /// Creates a session for `key` and loads its history.
    pub async fn open(history: Arc<dyn ChatHistoryRepository>, key: HistoryKey) -> Self {
        let (state, _) = watch::channel(ChatSnapshot::empty(key.clone()));
        let session = Self {
            history,
            state,
            requests: GenerationCounter::new(),
            write_lock: Mutex::new(()),
        };
        session.switch_to(key).await;
        session
    }

    /// Makes `key` the active history and reloads it.
    ///
    /// Draft and pending attachments are dropped, and in-flight attachment
    /// or location results become stale.
    pub async fn switch_to(&self, key: HistoryKey) {
        self.requests.advance();

        // Appends wait until the new history is in memory
        let _guard = self.write_lock.lock().await;
        self.state.send_modify(|state| *state = ChatSnapshot::empty(key.clone()));

        let messages = self.load_history(&key).await;

        tracing::debug!(
            "[ChatSession] Loaded {} messages for {}",
            messages.len(),
            key.storage_key()
        );
        self.state.send_modify(|state| state.messages = messages);
    }

    /// Reads the stored history of any pair. Missing or unreadable data is
    /// an empty history.
    pub async fn load_history(&self, key: &HistoryKey) -> Vec<Message> {
        match self.history.load_history(key).await {
            Ok(messages) => messages,
            Err(e) => {
                tracing::warn!(
                    "[ChatSession] Failed to load {}: {}",
                    key.storage_key(),
                    e
                );
                Vec::new()
            }
        }
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatSnapshot> {
        self.state.subscribe()
    }

    pub fn key(&self) -> HistoryKey {
        self.state.borrow().key.clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state.borrow().messages.clone()
    }

    /// Messages of the active history whose content contains `query`,
    /// ignoring case. A blank query returns everything.
    pub fn search(&self, query: &str) -> Vec<Message> {
        let state = self.state.borrow();
        filter_messages(&state.messages, query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn set_draft(&self, text: &str) {
        self.state.send_modify(|state| state.draft = text.to_string());
    }

    pub fn draft(&self) -> String {
        self.state.borrow().draft.clone()
    }

    /// Appends one user message. Returns `None` (and stores nothing) when
    /// the text is blank and there are no images.
    pub async fn append_user_message(
        &self,
        sent_at_millis: i64,
        text: &str,
        image_uris: Vec<String>,
    ) -> Option<Message> {
        let message = Message::user(sent_at_millis, text, image_uris)?;
        self.append(message.clone(), false).await;
        Some(message)
    }

    pub async fn append_assistant_message(
        &self,
        sent_at_millis: i64,
        content: impl Into<String>,
    ) -> Message {
        let message = Message::assistant_reply(sent_at_millis, content);
        self.append(message.clone(), false).await;
        message
    }

    /// Appends an assistant reply to the history of `key`.
    ///
    /// When the session has since switched to another pair, the reply goes
    /// straight to storage and the active history is left alone.
    pub async fn append_assistant_message_to(
        &self,
        key: &HistoryKey,
        sent_at_millis: i64,
        content: impl Into<String>,
    ) -> Message {
        let message = Message::assistant_reply(sent_at_millis, content);
        let _guard = self.write_lock.lock().await;

        let is_active = self.state.borrow().key == *key;
        if is_active {
            self.append_locked(message.clone(), false).await;
            return message;
        }

        tracing::debug!(
            "[ChatSession] Storing late reply for inactive {}",
            key.storage_key()
        );
        let mut messages = self.load_history(key).await;
        messages.push(message.clone());
        if let Err(e) = self.history.save_history(key, &messages).await {
            tracing::warn!(
                "[ChatSession] Failed to persist {}: {}",
                key.storage_key(),
                e
            );
        }
        message
    }

    /// Turns the draft and pending attachments into a user message.
    ///
    /// The append clears both inputs in the same state change. Returns
    /// `None` when there was nothing to send.
    pub(crate) async fn commit_draft(&self, sent_at_millis: i64) -> Option<CommittedDraft> {
        let _guard = self.write_lock.lock().await;
        let (key, draft, pending) = {
            let state = self.state.borrow();
            (state.key.clone(), state.draft.clone(), state.pending.clone())
        };

        let image_uris = pending.iter().map(|a| a.uri.clone()).collect();
        let message = Message::user(sent_at_millis, &draft, image_uris)?;
        self.append_locked(message.clone(), true).await;
        Some(CommittedDraft {
            key,
            message,
            text: draft.trim().to_string(),
            attachments: pending,
        })
    }

    async fn append(&self, message: Message, clear_inputs: bool) {
        let _guard = self.write_lock.lock().await;
        self.append_locked(message, clear_inputs).await;
    }

    /// Caller must hold `write_lock`.
    async fn append_locked(&self, message: Message, clear_inputs: bool) {
        let mut key = None;
        let mut messages = Vec::new();
        self.state.send_modify(|state| {
            state.messages.push(message);
            if clear_inputs {
                state.draft.clear();
                state.pending.clear();
            }
            key = Some(state.key.clone());
            messages = state.messages.clone();
        });

        let Some(key) = key else { return };
        if let Err(e) = self.history.save_history(&key, &messages).await {
            tracing::warn!(
                "[ChatSession] Failed to persist {}: {}",
                key.storage_key(),
                e
            );
        }
    }

    pub fn pending_attachments(&self) -> Vec<Attachment> {
        self.state.borrow().pending.clone()
    }

    /// Removes the pending attachment at `index`.
    pub fn remove_attachment(&self, index: usize) -> Option<Attachment> {
        let mut removed = None;
        self.state.send_if_modified(|state| {
            if index < state.pending.len() {
                removed = Some(state.pending.remove(index));
                true
            } else {
                false
            }
        });
        removed
    }

    /// Starts a new capture or library selection: clears pending
    /// attachments and returns a fresh token.
    pub(crate) fn begin_attachment_request(&self) -> Generation {
        let token = self.requests.advance();
        self.state.send_modify(|state| state.pending.clear());
        token
    }

    /// Token for a request that should not invalidate others.
    pub(crate) fn current_request(&self) -> Generation {
        self.requests.current()
    }

    pub(crate) fn is_current(&self, token: Generation) -> bool {
        self.requests.is_current(token)
    }

    /// Adds processed attachments if `token` is still current. Returns how
    /// many were accepted.
    pub(crate) fn accept_attachments(&self, token: Generation, attachments: Vec<Attachment>) -> usize {
        if !self.is_current(token) {
            tracing::debug!(
                "[ChatSession] Discarding {} stale attachments",
                attachments.len()
            );
            return 0;
        }

        let count = attachments.len();
        self.state.send_modify(|state| state.pending.extend(attachments));
        count
    }
}
