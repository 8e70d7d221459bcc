//! Settings domain module.

mod model;
mod repository;

pub use model::{DEFAULT_MODEL, MODEL_OPTIONS, ModelOption, Settings, find_model_option};
pub use repository::{API_KEY_SECRET_KEY, MODEL_SECRET_KEY, SettingsRepository};
