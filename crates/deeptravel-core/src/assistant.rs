//! Assistant backend seam.

use async_trait::async_trait;
use serde::Serialize;

use crate::attachment::GeoFix;
use crate::chat::Category;
use crate::error::Result;

/// Everything a send hands to the assistant backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    pub text: String,
    pub images_base64: Vec<String>,
    pub location: Option<GeoFix>,
    pub journey_id: Option<String>,
    pub category: Category,
    pub model: String,
}

/// Produces the assistant reply for a user send.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    async fn reply(&self, request: &AssistantRequest) -> Result<String>;
}
