//! Screens and the last-page record.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::chat::Category;

/// Screens that take part in launch restoration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Screen {
    /// Journey home: the category picker of the current journey.
    Trip,
    Menu,
    Supermarket,
    Attractions,
}

impl Screen {
    /// The chat category shown on this screen, if it is a chat screen.
    pub fn category(&self) -> Option<Category> {
        match self {
            Screen::Trip => None,
            Screen::Menu => Some(Category::Menu),
            Screen::Supermarket => Some(Category::Supermarket),
            Screen::Attractions => Some(Category::Attractions),
        }
    }
}

impl From<Category> for Screen {
    fn from(category: Category) -> Self {
        match category {
            Category::Menu => Screen::Menu,
            Category::Supermarket => Screen::Supermarket,
            Category::Attractions => Screen::Attractions,
        }
    }
}

/// The last screen the user looked at, and the journey that was current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPage {
    pub screen: Screen,
    #[serde(default)]
    pub journey_id: Option<String>,
}

impl LastPage {
    pub fn new(screen: Screen, journey_id: Option<&str>) -> Self {
        Self {
            screen,
            journey_id: journey_id.map(str::to_string),
        }
    }
}
