//! Player entity

use serde::{Deserialize, Serialize};

/// A player character taking part in the scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub initiative: u32,
    /// Path or URL of the character portrait
    #[serde(default)]
    pub image: String,
}

impl Player {
    pub fn new(name: impl Into<String>, initiative: u32) -> Self {
        Self {
            name: name.into(),
            initiative,
            image: String::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}
