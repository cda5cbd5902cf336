//! Handler configuration read from world files.

use serde::{Deserialize, Serialize};

/// Area attribute names mirrored into the screen registry by default.
pub const DEFAULT_SCREEN_ATTRIBUTES: [&str; 1] = ["setting"];

/// Runtime configuration for a [`crate::MapsHandler`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HandlerSettings {
    /// Area attributes copied into the screen registry on every transition.
    pub screen_attributes: Vec<String>,
}

impl HandlerSettings {
    /// Settings mirroring exactly the given attribute names.
    #[must_use]
    pub fn mirroring<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            screen_attributes: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self::mirroring(DEFAULT_SCREEN_ATTRIBUTES)
    }
}
