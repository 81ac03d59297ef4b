use tracing::Level;

/// Maps a configured level name onto a `tracing::Level`.
///
/// Unknown names fall back to `INFO`.
pub fn parse_level(name: &str) -> Level {
    match name.trim().to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" | "warning" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Initialize tracing/logging for the application.
///
/// Returns `false` when a global subscriber was already installed, which
/// lets tests and the binary call this more than once.
pub fn init(level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_target(false)
        .try_init()
        .is_ok()
}
