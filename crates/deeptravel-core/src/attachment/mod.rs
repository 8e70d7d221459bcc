//! Attachment pipeline domain: pending images, device providers and
//! staleness tokens.

mod generation;
mod model;
mod provider;

pub use generation::{Generation, GenerationCounter};
pub use model::{Attachment, GeoFix, PermissionStatus};
pub use provider::{ImageProcessor, ImageSource, LocationProvider};
