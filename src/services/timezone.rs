//! Timezone detail engine.
//!
//! Turns an instant plus a timezone identifier into the fields a clock card
//! needs: wall-clock time, date parts, signed UTC offset and a short zone
//! name. Rules come from the IANA database compiled into `chrono-tz`, so DST
//! and rule changes are honored without any hardcoded offsets.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Datelike, Offset, Timelike, Utc};
use chrono_tz::{OffsetName, Tz};
use serde::Serialize;
use tracing::warn;

use crate::error::{ClockError, ClockResult};
use crate::utils::datetime::format_gmt_offset;

/// Sentinel identifier meaning "whatever zone the host reports right now".
pub const LOCAL_ZONE: &str = "local";

const FALLBACK_ZONE: &str = "UTC";

static LOCAL_FALLBACK_WARNED: AtomicBool = AtomicBool::new(false);

/// Short names shown as words rather than GMT offsets, paired with the
/// offset they belong to. CST is also China Standard Time in tzdata, so the
/// offset has to match too.
const NAMED_ABBREVIATIONS: &[(&str, i32)] = &[
    ("UTC", 0),
    ("EST", -300),
    ("EDT", -240),
    ("CST", -360),
    ("CDT", -300),
    ("MST", -420),
    ("MDT", -360),
    ("PST", -480),
    ("PDT", -420),
    ("AKST", -540),
    ("AKDT", -480),
    ("HST", -600),
    ("HDT", -540),
];

/// AM/PM half of the 12-hour dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Meridiem {
    /// Hours 0..=11
    Am,
    /// Hours 12..=23
    Pm,
}

impl Meridiem {
    /// PM iff `hour24 >= 12`.
    pub fn from_hour24(hour24: u32) -> Self {
        if hour24 >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    }

    /// Upper-case label, "AM" or "PM".
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display fields for one zone at one instant.
///
/// Snapshots are recomputed on every tick and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSnapshot {
    /// Wall-clock hour, 0..=23
    pub hour24: u32,
    /// Dial hour, 1..=12
    pub hour12: u32,
    /// Wall-clock minute, 0..=59
    pub minute: u32,
    /// Wall-clock second, 0..=59
    pub second: u32,
    /// AM or PM, derived from `hour24`
    pub meridiem: Meridiem,
    /// Full weekday name, e.g. "Saturday"
    pub weekday: String,
    /// Abbreviated month, e.g. "Jun"
    pub month: String,
    /// Day of month without padding
    pub day: String,
    /// Four-digit year
    pub year: String,
    /// Signed minutes this zone is ahead of UTC
    pub utc_offset_minutes: i32,
    /// Short zone name, e.g. "EDT" or "GMT+4"
    pub zone_abbreviation: String,
}

/// Maps a 24-hour value onto the 1..=12 dial.
pub fn to_hour12(hour24: u32) -> u32 {
    match hour24 % 12 {
        0 => 12,
        h => h,
    }
}

/// Resolves the host's current timezone identifier.
///
/// Evaluated on every call so a changed host zone is picked up on the next
/// tick. Falls back to UTC when the host zone is unavailable or unknown to
/// the compiled database.
pub fn resolve_local_zone() -> String {
    match iana_time_zone::get_timezone() {
        Ok(name) if name.parse::<Tz>().is_ok() => name,
        Ok(name) => {
            warn_local_fallback(&format!("host timezone '{name}' is not in the tz database"));
            FALLBACK_ZONE.to_string()
        }
        Err(e) => {
            warn_local_fallback(&format!("host timezone unavailable: {e}"));
            FALLBACK_ZONE.to_string()
        }
    }
}

fn warn_local_fallback(reason: &str) {
    if !LOCAL_FALLBACK_WARNED.swap(true, Ordering::Relaxed) {
        warn!("Falling back to {} for local clock: {}", FALLBACK_ZONE, reason);
    }
}

/// Resolves the `local` sentinel; any other identifier passes through.
pub fn resolve_zone_id(zone: &str) -> String {
    if zone == LOCAL_ZONE {
        resolve_local_zone()
    } else {
        zone.to_string()
    }
}

/// Parses an identifier (or the `local` sentinel) into tz rules.
pub fn parse_zone(zone: &str) -> ClockResult<Tz> {
    let resolved = resolve_zone_id(zone);
    resolved
        .parse::<Tz>()
        .map_err(|_| ClockError::UnknownTimezone(zone.to_string()))
}

/// Computes the display fields of `zone` at `instant`.
pub fn compute_details(instant: DateTime<Utc>, zone: &str) -> ClockResult<TimeSnapshot> {
    let tz = parse_zone(zone)?;
    let civil = instant.with_timezone(&tz);

    let offset_seconds = civil.offset().fix().local_minus_utc();
    let utc_offset_minutes = (f64::from(offset_seconds) / 60.0).round() as i32;

    let hour24 = civil.hour();
    let zone_abbreviation = short_zone_name(civil.offset().abbreviation(), utc_offset_minutes);

    Ok(TimeSnapshot {
        hour24,
        hour12: to_hour12(hour24),
        minute: civil.minute(),
        second: civil.second(),
        meridiem: Meridiem::from_hour24(hour24),
        weekday: civil.format("%A").to_string(),
        month: civil.format("%b").to_string(),
        day: civil.day().to_string(),
        year: civil.year().to_string(),
        utc_offset_minutes,
        zone_abbreviation,
    })
}

/// North American names and UTC stay as words; every other zone is shown
/// as its GMT offset ("GMT+9", "GMT+5:30").
fn short_zone_name(abbreviation: Option<&str>, utc_offset_minutes: i32) -> String {
    match abbreviation {
        Some(abbr) if NAMED_ABBREVIATIONS.contains(&(abbr, utc_offset_minutes)) => abbr.to_string(),
        _ => format_gmt_offset(utc_offset_minutes),
    }
}

/// Hours `target` is ahead of `reference` (negative when behind).
pub fn relative_offset_hours(target: &TimeSnapshot, reference: &TimeSnapshot) -> f64 {
    f64::from(target.utc_offset_minutes - reference.utc_offset_minutes) / 60.0
}
