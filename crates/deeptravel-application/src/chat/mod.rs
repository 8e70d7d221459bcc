//! Chat screen state: the active history, the draft and pending
//! attachments, and the send flow.

mod attachments;
mod precondition;
mod send;
mod session;

pub use attachments::AttachmentPipeline;
pub use precondition::{ChatPrecondition, check_chat_preconditions};
pub use send::{ChatSender, SendOutcome};
pub use session::{ChatSession, ChatSnapshot};
