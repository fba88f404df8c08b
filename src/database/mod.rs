/// SQLite connection setup and migrations
pub mod connection;
/// Stored preference records and the values kept in them
pub mod models;
