//! Placeholder assistant used until a real backend is wired in.

use async_trait::async_trait;
use deeptravel_core::assistant::{AssistantBackend, AssistantRequest};
use deeptravel_core::error::Result;

pub const STUB_REPLY: &str = "(Sample assistant reply. A real backend will answer here.)";

/// Answers every request with [`STUB_REPLY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StubAssistant;

#[async_trait]
impl AssistantBackend for StubAssistant {
    async fn reply(&self, request: &AssistantRequest) -> Result<String> {
        tracing::debug!(
            "[StubAssistant] {} request for {:?} with model {}",
            request.category,
            request.journey_id,
            request.model
        );
        Ok(STUB_REPLY.to_string())
    }
}
