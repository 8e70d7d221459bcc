//! Chat domain module.
//!
//! - `category`: the three fixed chat contexts
//! - `message`: message entity, placeholder text and search
//! - `history`: (journey, category) keying and the history repository trait

mod category;
mod history;
mod message;

pub use category::Category;
pub use history::{CHAT_HISTORY_KEY_PREFIX, ChatHistoryRepository, HistoryKey, NO_JOURNEY_SENTINEL};
pub use message::{Message, MessageRole, filter_messages, image_placeholder};
