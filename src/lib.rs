//! # World Clock
//! 
//! A terminal world clock that shows several timezones side by side.
//! 
//! ## Features
//! - Analog/digital clock cards for any IANA zone, plus the host's local zone
//! - Search by city, region, country, abbreviation or current time
//! - Pinned clocks, persisted between runs
//! - Time travel: shift every clock by a number of minutes
//! - Dark and light themes

/// Configuration management and environment variables
pub mod config;
/// SQLite-backed preference storage
pub mod database;
/// Error types
pub mod error;
/// Parsing and handling of typed commands
pub mod input;
/// Timezone engine, search, board state and tick loop
pub mod services;
/// Formatting, logging and rendering helpers
pub mod utils;
