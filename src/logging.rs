use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `VERION_LOG=verion=debug`
pub const LOG_ENV: &str = "VERION_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Logs go to stderr so replies on stdout
/// stay clean.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();
}
