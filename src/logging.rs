//! Tracing setup
//!
//! `RUST_LOG` takes precedence over the configured level, e.g.
//! `RUST_LOG=holisticbook=debug`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{BookingError, Result};

/// Install a global fmt subscriber filtered at `level`
///
/// Returns `Ok(false)` if a global subscriber was already installed.
pub fn init(level: &str) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| BookingError::ConfigError(format!("Invalid log level {:?}: {}", level, e)))?,
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok();

    Ok(installed)
}
