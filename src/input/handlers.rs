use chrono::{DateTime, Utc};

use crate::input::commands::Command;
use crate::services::clock_context::ClockContext;
use crate::services::search::{all_timezones, search};
use crate::utils::datetime::{display_name_for_zone, format_minute_offset};
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};

/// Most explorer entries printed by `list`.
pub const MAX_LIST_ENTRIES: usize = 200;

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Keep running; print the message if any
    Continue(Option<String>),
    /// Stop the loop
    Quit,
}

fn reply(message: impl Into<String>) -> CommandOutcome {
    CommandOutcome::Continue(Some(message.into()))
}

/// Applies one command to the context. Failures become messages, never errors,
/// so a bad command can't stop the clock.
pub async fn handle_command(
    context: &mut ClockContext,
    command: Command,
    real_now: DateTime<Utc>,
) -> CommandOutcome {
    match command {
        Command::Add { zone } => {
            log_command_start("add", Some(&zone));
            match context.add_clock(&zone).await {
                Ok(clock) => {
                    let message = format!("Added {} ({}) as [{}]", clock.name, clock.zone, clock.id);
                    log_command_success("add", Some(&zone));
                    reply(message)
                }
                Err(e) => {
                    log_command_error("add", &e.to_string());
                    reply(format!("Could not add '{zone}': {e}"))
                }
            }
        }
        Command::Remove { id } => {
            log_command_start("remove", Some(&id));
            match context.remove_clock(&id).await {
                Ok(clock) => {
                    log_command_success("remove", Some(&id));
                    reply(format!("Removed {}", clock.name))
                }
                Err(e) => {
                    log_command_error("remove", &e.to_string());
                    reply(format!("Could not remove: {e}"))
                }
            }
        }
        Command::Pin { id } => {
            log_command_start("pin", Some(&id));
            match context.toggle_pin(&id).await {
                Ok(pinned) => {
                    log_command_success("pin", Some(&id));
                    reply(if pinned { "Pinned" } else { "Unpinned" })
                }
                Err(e) => {
                    log_command_error("pin", &e.to_string());
                    reply(format!("Could not pin: {e}"))
                }
            }
        }
        Command::Search { query } => {
            let results = search(&query, context.simulated_now(real_now));
            if results.is_empty() {
                reply(format!("No zones match '{query}'"))
            } else {
                let lines: Vec<String> = results
                    .iter()
                    .map(|zone| format!("  {}  ({})", zone, display_name_for_zone(zone)))
                    .collect();
                reply(format!("Matches (use `add <zone>`):\n{}", lines.join("\n")))
            }
        }
        Command::Travel { minutes } => match context.set_time_offset(minutes) {
            Ok(()) => reply(format!("Time travel {}", format_minute_offset(minutes))),
            Err(e) => reply(e.to_string()),
        },
        Command::Reset => {
            context.reset_time_offset();
            reply("Back to the current time")
        }
        Command::Theme => match context.toggle_theme().await {
            Ok(theme) => reply(format!("Theme: {theme}")),
            Err(e) => {
                log_command_error("theme", &e.to_string());
                reply(format!("Could not switch theme: {e}"))
            }
        },
        Command::List { filter } => reply(explorer_listing(filter.as_deref())),
        Command::Help => reply(Command::descriptions()),
        Command::Quit => CommandOutcome::Quit,
    }
}

/// Explorer view: every known zone with its display name, optionally filtered.
pub fn explorer_listing(filter: Option<&str>) -> String {
    let needle = filter.map(|f| f.trim().to_uppercase()).filter(|f| !f.is_empty());
    let zones: Vec<String> = all_timezones()
        .into_iter()
        .filter(|zone| match &needle {
            Some(needle) => zone.to_uppercase().contains(needle.as_str()),
            None => true,
        })
        .collect();

    let mut out = format!("Known zones: {}", zones.len());
    for zone in zones.iter().take(MAX_LIST_ENTRIES) {
        out.push_str(&format!("\n  {:<34} {}", zone, display_name_for_zone(zone)));
    }
    if zones.len() > MAX_LIST_ENTRIES {
        out.push_str(&format!("\n  ... {} more, narrow with `list <filter>`", zones.len() - MAX_LIST_ENTRIES));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explorer_listing_filter() {
        let listing = explorer_listing(Some("tokyo"));
        assert!(listing.contains("Asia/Tokyo"));
    }

    #[test]
    fn test_explorer_listing_truncates() {
        let listing = explorer_listing(None);
        assert!(listing.contains("more, narrow with"));
    }
}
