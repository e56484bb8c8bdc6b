use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `DOOMFIRE_LOG=debug`
pub const LOG_ENV: &str = "DOOMFIRE_LOG";

/// Install a stderr subscriber. Quiet by default so the fire owns the screen.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed (tests); that is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
