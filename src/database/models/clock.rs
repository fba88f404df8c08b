use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::services::timezone::LOCAL_ZONE;
use crate::utils::datetime::display_name_for_zone;

const LOCAL_CLOCK_NAME: &str = "Local Time";

/// A clock on the board, as persisted under the clocks key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockEntry {
    /// Stable id; fixed for the defaults, a UUID otherwise
    pub id: String,
    /// Zone identifier or the `local` sentinel
    pub zone: String,
    /// Pinned clocks are drawn first
    pub pinned: bool,
    /// Display name
    pub name: String,
}

impl ClockEntry {
    /// New unpinned clock named after the zone's city segment.
    pub fn for_zone(zone: &str) -> Self {
        let name = if zone == LOCAL_ZONE {
            LOCAL_CLOCK_NAME.to_string()
        } else {
            display_name_for_zone(zone)
        };

        Self {
            id: Uuid::new_v4().to_string(),
            zone: zone.to_string(),
            pinned: false,
            name,
        }
    }

    /// True for the clock that follows the host zone.
    pub fn is_local(&self) -> bool {
        self.zone == LOCAL_ZONE
    }

    /// Board shown on first start or when stored clocks are unreadable.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self {
                id: "local".to_string(),
                zone: LOCAL_ZONE.to_string(),
                pinned: true,
                name: LOCAL_CLOCK_NAME.to_string(),
            },
            Self {
                id: "london".to_string(),
                zone: "Europe/London".to_string(),
                pinned: false,
                name: "London".to_string(),
            },
            Self {
                id: "tokyo".to_string(),
                zone: "Asia/Tokyo".to_string(),
                pinned: false,
                name: "Tokyo".to_string(),
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => f.write_str("dark"),
            Theme::Light => f.write_str("light"),
        }
    }
}
