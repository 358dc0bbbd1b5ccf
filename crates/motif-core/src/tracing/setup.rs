//! Subscriber installation for binaries, benches, and tests.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR, VERSION};

static INIT: Once = Once::new();

/// Filter from `MOTIF_LOG` (e.g. `motif_analysis=debug,motif_core=warn`),
/// or the per-crate `info` default when it is unset or does not parse.
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install a formatting subscriber once per process. A subscriber already
/// installed by the host is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_thread_names(true))
            .with(log_filter())
            .try_init();
        if installed.is_ok() {
            ::tracing::debug!(version = VERSION, env = LOG_ENV_VAR, "tracing initialized");
        }
    });
}
