/// Formats a whole-minute UTC offset as a GMT label ("GMT", "GMT+9", "GMT-3:30").
pub fn format_gmt_offset(offset_minutes: i32) -> String {
    if offset_minutes == 0 {
        return "GMT".to_string();
    }

    let sign = if offset_minutes > 0 { '+' } else { '-' };
    let abs = offset_minutes.unsigned_abs();
    let (hours, minutes) = (abs / 60, abs % 60);

    if minutes == 0 {
        format!("GMT{sign}{hours}")
    } else {
        format!("GMT{sign}{hours}:{minutes:02}")
    }
}

/// Formats a relative offset in hours with an explicit sign for non-negative
/// values: "+9", "-3", "+5.5", "+0".
pub fn format_relative_hours(hours: f64) -> String {
    // Avoid printing "-0" for a zero difference
    let hours = if hours == 0.0 { 0.0 } else { hours };
    let prefix = if hours >= 0.0 { "+" } else { "" };
    format!("{prefix}{hours}")
}

/// Zero-padded "HH:MM".
pub fn format_hhmm(hour: u32, minute: u32) -> String {
    format!("{hour:02}:{minute:02}")
}

/// Formats a time-travel offset in minutes: "+90m", "-15m".
pub fn format_minute_offset(minutes: i64) -> String {
    let prefix = if minutes > 0 { "+" } else { "" };
    format!("{prefix}{minutes}m")
}

/// Human display name for an identifier: trailing segment, underscores as spaces.
///
/// ```
/// use world_clock::utils::datetime::display_name_for_zone;
///
/// assert_eq!(display_name_for_zone("America/New_York"), "New York");
/// assert_eq!(display_name_for_zone("UTC"), "UTC");
/// ```
pub fn display_name_for_zone(zone: &str) -> String {
    zone.rsplit('/').next().unwrap_or(zone).replace('_', " ")
}
