use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};

use crate::database::models::{ClockEntry, Theme};
use crate::error::ClockResult;
use crate::services::clock_context::ClockContext;
use crate::services::timezone::{compute_details, resolve_zone_id, LOCAL_ZONE};
use crate::utils::logging::log_zone_skipped;
use crate::utils::render::{build_card, header_line, render_board, ClockCardView};

/// Everything drawn on one tick.
#[derive(Debug, Clone)]
pub struct TickFrame {
    /// Simulated instant every card was computed for
    pub instant: DateTime<Utc>,
    /// "Current Time" or the time-travel banner
    pub header: String,
    /// Pinned cards, in board order
    pub pinned: Vec<ClockCardView>,
    /// Remaining cards, in board order
    pub others: Vec<ClockCardView>,
    /// Ids of clocks whose zone could not be computed this tick
    pub skipped: Vec<String>,
}

impl TickFrame {
    /// Text for the terminal in the given theme.
    pub fn render(&self, theme: Theme) -> String {
        render_board(&self.header, &self.pinned, &self.others, theme)
    }
}

/// Interval driving the clock; late ticks are skipped rather than bunched up.
pub fn tick_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Computes the frame for the context's visible clocks at `real_now`.
pub fn tick(context: &ClockContext, real_now: DateTime<Utc>, display_cap: usize) -> ClockResult<TickFrame> {
    let instant = context.simulated_now(real_now);
    compute_frame(
        &context.visible_clocks(display_cap),
        instant,
        context.time_offset_minutes(),
    )
}

/// Computes one card per clock at `instant`.
///
/// A clock whose zone fails is logged and left out; the others still render.
pub fn compute_frame(
    clocks: &[&ClockEntry],
    instant: DateTime<Utc>,
    time_offset_minutes: i64,
) -> ClockResult<TickFrame> {
    let local = compute_details(instant, LOCAL_ZONE)?;

    let mut pinned = Vec::new();
    let mut others = Vec::new();
    let mut skipped = Vec::new();

    for clock in clocks {
        let snapshot = match compute_details(instant, &clock.zone) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log_zone_skipped(&clock.id, &clock.zone, &e.to_string());
                skipped.push(clock.id.clone());
                continue;
            }
        };

        let zone_label = resolve_zone_id(&clock.zone);
        let card = build_card(clock, &zone_label, &snapshot, &local, time_offset_minutes);
        if clock.pinned {
            pinned.push(card);
        } else {
            others.push(card);
        }
    }

    Ok(TickFrame {
        instant,
        header: header_line(&local, time_offset_minutes),
        pinned,
        others,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: &str, zone: &str, pinned: bool) -> ClockEntry {
        ClockEntry {
            id: id.to_string(),
            zone: zone.to_string(),
            pinned,
            name: id.to_string(),
        }
    }

    #[test]
    fn test_unknown_zone_is_skipped_not_fatal() {
        let clocks = [
            entry("tokyo", "Asia/Tokyo", false),
            entry("mars", "Mars/Phobos", false),
            entry("utc", "UTC", true),
        ];
        let refs: Vec<&ClockEntry> = clocks.iter().collect();
        let instant = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        let frame = compute_frame(&refs, instant, 0).unwrap();

        assert_eq!(frame.skipped, vec!["mars".to_string()]);
        assert_eq!(frame.pinned.len(), 1);
        assert_eq!(frame.others.len(), 1);
        assert_eq!(frame.others[0].time, "09:00:00");
        assert_eq!(frame.others[0].period, "PM");
        assert_eq!(frame.header, "Current Time");
    }

    #[test]
    fn test_time_travel_drops_seconds() {
        let clocks = [entry("utc", "UTC", false)];
        let refs: Vec<&ClockEntry> = clocks.iter().collect();
        let instant = Utc.with_ymd_and_hms(2024, 6, 15, 12, 34, 56).unwrap();

        let frame = compute_frame(&refs, instant, 90).unwrap();

        assert_eq!(frame.others[0].time, "12:34");
        assert!(frame.header.starts_with("Time Travel: "));
        assert!(frame.header.ends_with("(+90m)"));
    }
}
