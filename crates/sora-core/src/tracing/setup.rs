//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the SORA tracing/logging system.
///
/// Reads the `SORA_LOG` environment variable for per-module log levels.
/// Format: `SORA_LOG=sora_analysis::assessment=debug,sora_analysis::mitigation=warn`
///
/// Falls back to `sora=info` if `SORA_LOG` is not set or is invalid.
///
/// Idempotent: later calls are no-ops. If the host already installed a
/// global subscriber, that subscriber is kept.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("SORA_LOG")
            .unwrap_or_else(|_| EnvFilter::new("sora=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
