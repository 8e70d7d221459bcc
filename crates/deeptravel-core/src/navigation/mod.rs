//! Navigation and launch restoration.

mod model;
mod repository;
mod restoration;

pub use model::{LastPage, Screen};
pub use repository::{LAST_PAGE_KEY, LastPageRepository};
pub use restoration::{RestorationPhase, RestoreOutcome};
