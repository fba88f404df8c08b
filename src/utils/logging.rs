use tracing::{debug, error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_START: {} - {}", command, d),
        None => info!("CMD_START: {}", command),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_SUCCESS: {} - {}", command, d),
        None => info!("CMD_SUCCESS: {}", command),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, error: &str) {
    error!("CMD_ERROR: {} - {}", command, error);
}

/// Logs a clock left out of the current tick
pub fn log_zone_skipped(clock_id: &str, zone: &str, error: &str) {
    warn!("ZONE_SKIPPED: clock {} ({}) - {}", clock_id, zone, error);
}

/// Logs preference store operations with consistent format
pub fn log_store_operation(operation: &str, key: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("STORE_OP: {} on {} - {}", operation, key, d),
        None => debug!("STORE_OP: {} on {}", operation, key),
    }
}

/// Logs preference store errors with consistent format
pub fn log_store_error(operation: &str, key: &str, error: &str) {
    error!("STORE_ERROR: {} on {} failed: {}", operation, key, error);
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
