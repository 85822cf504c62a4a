use std::sync::OnceLock;

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

static TRACING: OnceLock<()> = OnceLock::new();

/// Compact, human readable console output. Defaults to `debug` unless `RUST_LOG` says otherwise.
/// Only the first call installs the subscriber.
pub fn init_dbg_tracing() {
    TRACING.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .without_time()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(false)
            .with_env_filter(env_filter("debug"))
            .compact()
            .try_init();
    });
}

/// One JSON object per line. Defaults to `info` unless `RUST_LOG` says otherwise.
/// Only the first call installs the subscriber.
pub fn init_production_tracing() {
    TRACING.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .json()
            .with_current_span(true)
            .with_env_filter(env_filter("info"))
            .try_init();
    });
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
