use crate::config::LogConfig;

/// JSON (or pretty) logs with timestamps, filtered by `RUST_LOG`.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(config: &LogConfig) {
    use crate::config::LogFormat;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    // `try_init` fails once a global subscriber exists; that is the no-op case.
    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

/// Browser console logging through `wasm-logger`.
#[cfg(target_arch = "wasm32")]
pub fn init(config: &LogConfig) {
    use std::sync::Once;

    static INIT: Once = Once::new();

    let level = match config.default_filter.as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };
    INIT.call_once(|| wasm_logger::init(wasm_logger::Config::new(level)));
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init(&LogConfig::default());
        init(&LogConfig::default());
        ::tracing::info!("still logging");
    }
}
