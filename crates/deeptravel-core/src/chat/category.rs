use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// One of the three fixed chat contexts inside a journey.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Menu,
    Supermarket,
    Attractions,
}

impl Category {
    pub fn all() -> impl Iterator<Item = Category> {
        Category::iter()
    }

    /// Short tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Menu => "Menu",
            Category::Supermarket => "Supermarket",
            Category::Attractions => "Attractions",
        }
    }

    /// Screen title for the assistant of this category.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Menu => "Menu assistant",
            Category::Supermarket => "Supermarket assistant",
            Category::Attractions => "Attractions assistant",
        }
    }

    /// Input hint shown in an empty message box.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Category::Menu => "Describe the menu, a dish or the dining situation...",
            Category::Supermarket => {
                "Describe the product, snack or drink you photographed. What do you want to know?"
            }
            Category::Attractions => {
                "Describe the sight, building or poster you photographed. What do you want to know?"
            }
        }
    }

    /// One-line description used on the journey home screen.
    pub fn description(&self) -> &'static str {
        match self {
            Category::Menu => "Photograph menus and dishes for explanations and picks",
            Category::Supermarket => "Photograph products, snacks and drinks for ingredients and tips",
            Category::Attractions => "Photograph buildings, statues and posters for the story behind them",
        }
    }
}
