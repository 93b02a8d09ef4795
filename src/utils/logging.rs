//! Structured logging setup for the `wvb` binary.
//!
//! Logs go to stderr since stdout carries the protocol. `RUST_LOG` wins when set; otherwise
//! the `log_filter` from `webview-bridge.toml` is applied once the config is loaded.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

/// Filter used until the config is read, and when it holds no usable `log_filter`.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Handle to swap the active filter after startup.
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

/// Installs the global subscriber.
///
/// Returns `None` if a subscriber was already installed, in which case that one keeps working.
pub fn init() -> Option<LogHandle> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(DEFAULT_LOG_FILTER), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .compact();

    match tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .try_init()
    {
        Ok(()) => Some(LogHandle { handle, from_env }),
        Err(e) => {
            eprintln!("[wvb] Logger already initialized: {e}");
            None
        }
    }
}

impl LogHandle {
    /// Applies the configured filter directive unless `RUST_LOG` was set.
    pub fn apply_config_filter(&self, directive: &str) {
        if self.from_env {
            return;
        }
        match EnvFilter::try_new(directive) {
            Ok(filter) => {
                if let Err(e) = self.handle.reload(filter) {
                    tracing::warn!(error = %e, "Failed to apply log filter");
                }
            }
            Err(e) => {
                tracing::warn!(directive, error = %e, "Invalid log_filter, keeping default");
            }
        }
    }
}
