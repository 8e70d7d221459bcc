//! Settings domain model and the model option catalogue.

use serde::{Deserialize, Serialize};

/// Model used until the user picks one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// A selectable assistant model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelOption {
    pub id: &'static str,
    pub label: &'static str,
}

/// The fixed set of models offered in settings.
pub const MODEL_OPTIONS: &[ModelOption] = &[
    ModelOption {
        id: "gpt-4o-mini",
        label: "GPT-4o Mini (fast / cheap)",
    },
    ModelOption {
        id: "gpt-4.1",
        label: "GPT-4.1 (accurate / deep)",
    },
    ModelOption {
        id: "gpt-5.1-thinking",
        label: "GPT-5.1 Thinking (advanced reasoning)",
    },
];

/// Looks up a catalogue entry. Unknown ids are still valid settings values.
pub fn find_model_option(id: &str) -> Option<&'static ModelOption> {
    MODEL_OPTIONS.iter().find(|option| option.id == id)
}

/// User credentials and model choice.
///
/// An empty `api_key` means "not configured".
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub api_key: String,
    pub model: String,
}

impl Settings {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Label of the selected model, falling back to the raw id.
    pub fn model_label(&self) -> &str {
        find_model_option(&self.model).map_or(self.model.as_str(), |option| option.label)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &if self.has_api_key() { "<redacted>" } else { "<unset>" })
            .field("model", &self.model)
            .finish()
    }
}
