use tracing_subscriber::EnvFilter;

/// Env var holding the `tracing` filter directive (default `warn`).
pub const LOG_FILTER_VAR: &str = "SHEHA_LOG";

/// Env var selecting the output format: `text` (default) or `json`.
pub const LOG_FORMAT_VAR: &str = "SHEHA_LOG_FORMAT";

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// chatbot output. Calling this twice is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var(LOG_FORMAT_VAR).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // Err means a subscriber is already installed; keep that one.
    if json {
        builder.json().try_init().ok();
    } else {
        builder.try_init().ok();
    }
}
