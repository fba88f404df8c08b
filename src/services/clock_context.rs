//! Process-wide clock state with an explicit load / mutate / persist lifecycle.
//!
//! The board (favorites), the simulated-time offset and the theme live here
//! and are handed to the tick loop and the input handlers. Every mutation of
//! persisted state is written through to the preference store before the
//! method returns, so the next tick already sees it.

use chrono::{DateTime, TimeDelta, Utc};

use crate::database::connection::DatabaseManager;
use crate::database::models::{ClockEntry, Preference, Theme, CLOCKS_KEY, THEME_KEY};
use crate::error::{ClockError, ClockResult};
use crate::services::timezone::parse_zone;
use crate::utils::logging::{log_store_error, log_store_operation};

/// Largest simulated offset accepted, roughly 100,000 years either way.
pub const MAX_TIME_OFFSET_MINUTES: i64 = 100_000 * 366 * 24 * 60;

/// Owns the board, the simulated time offset and the theme.
///
/// Every mutation of the board or theme is written through to the store.
pub struct ClockContext {
    db: DatabaseManager,
    clocks: Vec<ClockEntry>,
    time_offset_minutes: i64,
    theme: Theme,
}

impl ClockContext {
    /// Loads the stored board and theme, falling back to defaults for
    /// anything missing or unreadable. Only storage failures are errors.
    pub async fn load(db: DatabaseManager) -> ClockResult<Self> {
        let stored_clocks = Preference::get(&db.pool, CLOCKS_KEY).await?;
        let clocks = decode_clocks(stored_clocks.as_ref().map(|p| p.value.as_str()))
            .unwrap_or_else(|e| {
                tracing::warn!("{}; using default clocks", e);
                ClockEntry::defaults()
            });

        let stored_theme = Preference::get(&db.pool, THEME_KEY).await?;
        let theme = decode_theme(stored_theme.as_ref().map(|p| p.value.as_str()))
            .unwrap_or_else(|e| {
                tracing::warn!("{}; using default theme", e);
                Theme::default()
            });

        log_store_operation("load", CLOCKS_KEY, Some(&format!("{} clocks", clocks.len())));

        Ok(Self {
            db,
            clocks,
            time_offset_minutes: 0,
            theme,
        })
    }

    /// Board order as stored.
    pub fn clocks(&self) -> &[ClockEntry] {
        &self.clocks
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn time_offset_minutes(&self) -> i64 {
        self.time_offset_minutes
    }

    /// Pinned clocks first, then the rest, at most `cap` in total.
    pub fn visible_clocks(&self, cap: usize) -> Vec<&ClockEntry> {
        let pinned = self.clocks.iter().filter(|c| c.pinned);
        let unpinned = self.clocks.iter().filter(|c| !c.pinned);
        pinned.chain(unpinned).take(cap).collect()
    }

    /// The instant every clock is computed for: real time shifted by the offset.
    pub fn simulated_now(&self, real_now: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::try_minutes(self.time_offset_minutes)
            .and_then(|delta| real_now.checked_add_signed(delta))
            .unwrap_or(real_now)
    }

    /// Adds an unpinned clock for `zone` and persists the board.
    pub async fn add_clock(&mut self, zone: &str) -> ClockResult<&ClockEntry> {
        let zone = zone.trim();
        parse_zone(zone)?;

        if self.clocks.iter().any(|c| c.zone == zone) {
            return Err(ClockError::DuplicateClock(zone.to_string()));
        }

        self.clocks.push(ClockEntry::for_zone(zone));
        self.save_clocks().await?;

        let index = self.clocks.len() - 1;
        Ok(&self.clocks[index])
    }

    /// Removes the clock with `id` and persists the board.
    pub async fn remove_clock(&mut self, id: &str) -> ClockResult<ClockEntry> {
        let index = self
            .clocks
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ClockError::ClockNotFound(id.to_string()))?;

        let removed = self.clocks.remove(index);
        self.save_clocks().await?;
        Ok(removed)
    }

    /// Flips the pinned flag of `id`; returns the new value.
    pub async fn toggle_pin(&mut self, id: &str) -> ClockResult<bool> {
        let clock = self
            .clocks
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ClockError::ClockNotFound(id.to_string()))?;

        clock.pinned = !clock.pinned;
        let pinned = clock.pinned;
        self.save_clocks().await?;
        Ok(pinned)
    }

    /// Sets the simulated offset. Not persisted.
    pub fn set_time_offset(&mut self, minutes: i64) -> ClockResult<()> {
        if minutes.unsigned_abs() > MAX_TIME_OFFSET_MINUTES.unsigned_abs() {
            return Err(ClockError::TimeOffsetOutOfRange(minutes));
        }
        self.time_offset_minutes = minutes;
        Ok(())
    }

    pub fn reset_time_offset(&mut self) {
        self.time_offset_minutes = 0;
    }

    /// Switches dark/light and persists the choice.
    pub async fn toggle_theme(&mut self) -> ClockResult<Theme> {
        self.theme = self.theme.toggled();
        let value = serde_json::to_string(&self.theme)?;
        self.write(THEME_KEY, &value).await?;
        Ok(self.theme)
    }

    async fn save_clocks(&self) -> ClockResult<()> {
        let value = serde_json::to_string(&self.clocks)?;
        self.write(CLOCKS_KEY, &value).await
    }

    async fn write(&self, key: &str, value: &str) -> ClockResult<()> {
        match Preference::set(&self.db.pool, key, value).await {
            Ok(_) => {
                log_store_operation("set", key, None);
                Ok(())
            }
            Err(e) => {
                log_store_error("set", key, &e.to_string());
                Err(e.into())
            }
        }
    }
}

/// Decodes the stored board. `None` (never saved) yields the defaults.
pub fn decode_clocks(raw: Option<&str>) -> ClockResult<Vec<ClockEntry>> {
    match raw {
        None => Ok(ClockEntry::defaults()),
        Some(raw) => serde_json::from_str(raw).map_err(|source| ClockError::MalformedStoredState {
            key: CLOCKS_KEY.to_string(),
            source,
        }),
    }
}

/// Decodes the stored theme. `None` (never saved) yields dark.
///
/// Accepts the JSON string this crate writes (`"light"`) as well as the bare
/// word (`light`).
pub fn decode_theme(raw: Option<&str>) -> ClockResult<Theme> {
    let Some(raw) = raw else {
        return Ok(Theme::default());
    };
    serde_json::from_str(raw).or_else(|source| {
        let bare = serde_json::Value::String(raw.trim().to_string());
        serde_json::from_value(bare).map_err(|_| ClockError::MalformedStoredState {
            key: THEME_KEY.to_string(),
            source,
        })
    })
}
