//! Log output setup for the CLI

use tracing::warn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

/// Fallback filter when neither flags, `RUST_LOG` nor the configuration set one
const DEFAULT_FILTER: &str = "warn";

/// Handle on the installed subscriber's filter
pub struct LogHandle {
    /// Present only while the level may still come from the configuration
    reload: Option<reload::Handle<EnvFilter, Registry>>,
}

/// Install the global subscriber, writing to stderr.
///
/// Called before the configuration is read so loading is logged too.
/// `--verbose` wins, then `RUST_LOG`; otherwise the default filter applies
/// until [`LogHandle::apply_configured`] is called.
pub fn init(verbose: bool) -> LogHandle {
    let (filter, fixed) = if verbose {
        (EnvFilter::new("debug"), true)
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => (filter, true),
            Err(_) => (EnvFilter::new(DEFAULT_FILTER), false),
        }
    };

    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    LogHandle {
        reload: (!fixed).then_some(handle),
    }
}

impl LogHandle {
    /// Switch to the level from the configuration file, unless the command
    /// line or `RUST_LOG` already chose one
    pub fn apply_configured(&self, configured: Option<&str>) {
        let (Some(handle), Some(level)) = (&self.reload, configured) else {
            return;
        };

        match EnvFilter::try_new(level) {
            Ok(filter) => {
                if let Err(e) = handle.reload(filter) {
                    warn!(error = %e, "Failed to apply configured log level");
                }
            }
            Err(e) => warn!(level, error = %e, "Ignoring invalid configured log level"),
        }
    }
}
