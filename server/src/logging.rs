use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,dashboard_server=debug,dashboard_core=debug";

/// Install the global subscriber. `DASHBOARD_LOG` wins over `RUST_LOG`;
/// an unparsable filter falls through to the next source.
pub fn init_tracing() {
    let filter = std::env::var("DASHBOARD_LOG")
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();
}
