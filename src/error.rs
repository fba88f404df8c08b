//! Error types shared by the clock engine, the context and the store.

/// Everything that can go wrong while computing or managing clocks.
///
/// None of these are fatal to the tick loop: unknown zones are skipped,
/// malformed stored state falls back to defaults.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// The identifier is not in the compiled timezone database.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// A persisted preference could not be decoded.
    #[error("malformed stored state under '{key}': {source}")]
    MalformedStoredState {
        /// Storage key that held the bad value
        key: String,
        /// Underlying decode failure
        #[source]
        source: serde_json::Error,
    },

    /// The zone is already on the board.
    #[error("timezone already added: {0}")]
    DuplicateClock(String),

    /// No clock with the given id.
    #[error("no clock with id: {0}")]
    ClockNotFound(String),

    /// The simulated time offset is beyond what the calendar can represent.
    #[error("time offset out of range: {0} minutes")]
    TimeOffsetOutOfRange(i64),

    /// A value could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The preference store failed.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Convenience alias used across the library.
pub type ClockResult<T> = Result<T, ClockError>;
