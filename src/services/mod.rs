/// Board state, time travel and theme
pub mod clock_context;
/// Zone catalog, aliases and free-text search
pub mod search;
/// Per-tick frame computation
pub mod ticker;
/// Timezone detail engine
pub mod timezone;
