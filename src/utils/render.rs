//! Turns snapshots into clock cards and prints them for the terminal.

use colored::{ColoredString, Colorize};

use crate::database::models::{ClockEntry, Theme};
use crate::services::timezone::{relative_offset_hours, TimeSnapshot};
use crate::utils::datetime::{format_hhmm, format_minute_offset, format_relative_hours};

/// How a clock's offset relates to the local zone, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetTone {
    /// The local clock itself
    Local,
    /// Same offset as local
    Neutral,
    /// Later than local
    Ahead,
    /// Earlier than local
    Behind,
}

/// Rotation of the three analog hands in degrees, clockwise from 12.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    /// `(hour24 % 12) * 30 + minute * 0.5`
    pub hour: f64,
    /// `minute * 6 + second * 0.1`
    pub minute: f64,
    /// `second * 6`
    pub second: f64,
}

/// Everything needed to draw one card.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockCardView {
    /// Clock id, used by `remove` and `pin`
    pub id: String,
    /// Display name
    pub name: String,
    /// Zone identifier shown under the name
    pub zone_label: String,
    /// Short zone name, e.g. "EDT" or "GMT+9"
    pub zone_abbreviation: String,
    /// Whether the card belongs to the pinned section
    pub pinned: bool,
    /// Digital time, "hh:mm:ss" or "hh:mm" while time traveling
    pub time: String,
    /// "AM" or "PM"
    pub period: String,
    /// e.g. "Saturday, Jun 15"
    pub date: String,
    /// Analog hand rotations
    pub hands: HandAngles,
    /// "Current Location" or the hours from local
    pub relative_label: String,
    /// Color of the relative label
    pub tone: OffsetTone,
}

/// Analog hand angles for a snapshot.
pub fn hand_angles(snapshot: &TimeSnapshot) -> HandAngles {
    let hour = f64::from(snapshot.hour24 % 12);
    let minute = f64::from(snapshot.minute);
    let second = f64::from(snapshot.second);

    HandAngles {
        hour: hour * 30.0 + minute * 0.5,
        minute: minute * 6.0 + second * 0.1,
        second: second * 6.0,
    }
}

/// Label and tone of the "difference from local" line.
pub fn relative_label(
    clock: &ClockEntry,
    snapshot: &TimeSnapshot,
    local: &TimeSnapshot,
) -> (String, OffsetTone) {
    if clock.is_local() {
        return ("Current Location".to_string(), OffsetTone::Local);
    }

    let hours = relative_offset_hours(snapshot, local);
    let tone = if hours > 0.0 {
        OffsetTone::Ahead
    } else if hours < 0.0 {
        OffsetTone::Behind
    } else {
        OffsetTone::Neutral
    };

    (format!("{} hrs from local", format_relative_hours(hours)), tone)
}

/// Digital readout; seconds are dropped while time travel is active.
pub fn digital_time(snapshot: &TimeSnapshot, time_offset_minutes: i64) -> String {
    let hhmm = format_hhmm(snapshot.hour12, snapshot.minute);
    if time_offset_minutes == 0 {
        format!("{}:{:02}", hhmm, snapshot.second)
    } else {
        hhmm
    }
}

pub fn build_card(
    clock: &ClockEntry,
    zone_label: &str,
    snapshot: &TimeSnapshot,
    local: &TimeSnapshot,
    time_offset_minutes: i64,
) -> ClockCardView {
    let (relative_label, tone) = relative_label(clock, snapshot, local);

    ClockCardView {
        id: clock.id.clone(),
        name: clock.name.clone(),
        zone_label: zone_label.to_string(),
        zone_abbreviation: snapshot.zone_abbreviation.clone(),
        pinned: clock.pinned,
        time: digital_time(snapshot, time_offset_minutes),
        period: snapshot.meridiem.to_string(),
        date: format!("{}, {} {}", snapshot.weekday, snapshot.month, snapshot.day),
        hands: hand_angles(snapshot),
        relative_label,
        tone,
    }
}

/// "Current Time", or the simulated local time while travelling.
pub fn header_line(local: &TimeSnapshot, time_offset_minutes: i64) -> String {
    if time_offset_minutes == 0 {
        "Current Time".to_string()
    } else {
        format!(
            "Time Travel: {} ({})",
            format_hhmm(local.hour24, local.minute),
            format_minute_offset(time_offset_minutes)
        )
    }
}

/// Arrow pointing the way a hand at `degrees` points.
pub fn dial_glyph(degrees: f64) -> char {
    const GLYPHS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];
    let sector = ((degrees.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    GLYPHS[sector]
}

fn primary(text: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Dark => text.bright_white(),
        Theme::Light => text.black(),
    }
}

fn toned(text: &str, tone: OffsetTone) -> ColoredString {
    match tone {
        OffsetTone::Local => text.cyan(),
        OffsetTone::Neutral => text.dimmed(),
        OffsetTone::Ahead => text.green(),
        OffsetTone::Behind => text.red(),
    }
}

/// One card as a few lines of terminal text.
pub fn render_card(card: &ClockCardView, theme: Theme) -> String {
    let star = if card.pinned { "★" } else { "☆" };
    format!(
        "{} {}  {} ({})  [{}]\n   {} {}   {}  h{} m{} s{}\n   {}\n",
        star,
        primary(&card.name, theme).bold(),
        card.zone_label.dimmed(),
        card.zone_abbreviation,
        card.id.dimmed(),
        primary(&card.time, theme).bold(),
        card.period,
        card.date,
        dial_glyph(card.hands.hour),
        dial_glyph(card.hands.minute),
        dial_glyph(card.hands.second),
        toned(&card.relative_label, card.tone),
    )
}

/// A whole screen: header, pinned section, remaining clocks.
pub fn render_board(
    header: &str,
    pinned: &[ClockCardView],
    others: &[ClockCardView],
    theme: Theme,
) -> String {
    let mut out = format!("{}\n\n", primary(header, theme).bold().underline());

    if pinned.is_empty() && others.is_empty() {
        out.push_str(&format!(
            "{}\n",
            "No clocks yet. Use `search <text>` and `add <zone>` to add one.".dimmed()
        ));
        return out;
    }

    if !pinned.is_empty() {
        out.push_str(&format!("{}\n", "Pinned".bold()));
        for card in pinned {
            out.push_str(&render_card(card, theme));
        }
        out.push('\n');
    }

    if !others.is_empty() {
        out.push_str(&format!("{}\n", "All Clocks".bold()));
        for card in others {
            out.push_str(&render_card(card, theme));
        }
    }

    out
}
