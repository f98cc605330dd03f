use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directives for the addon's stderr log, e.g. `F4_MDS_LOG=debug`
pub const LOG_ENV: &str = "F4_MDS_LOG";

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber once per process. A subscriber the host
/// already installed is left in place.
pub fn init() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(true);

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!("reader logging initialized");
        }
    });
}
