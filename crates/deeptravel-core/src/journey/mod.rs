//! Journey domain module.
//!
//! - `model`: the `Journey` entity and id generation
//! - `repository`: persistence trait and storage keys

mod model;
mod repository;

pub use model::{Journey, generate_journey_id};
pub use repository::{CURRENT_JOURNEY_KEY, JOURNEYS_KEY, JourneyRepository};
