//! Opt-in log output for builder sessions
//!
//! The engine logs every resolution at `trace` and every silent no-op at `debug`, under the
//! `abuilder` target. The library never installs a subscriber; a test suite that wants to see
//! why a chain did nothing calls [`init_tracing`] once, or layers [`env_filter`] into its own
//! subscriber.
//!
//! ```no_run
//! // ABUILDER_LOG=abuilder=debug cargo test
//! abuilder::tracing_support::init_tracing()?;
//! # Ok::<(), error_stack::Report<abuilder::Error>>(())
//! ```

use error_stack::{Report, ResultExt};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::constants::{DEFAULT_LOG_DIRECTIVES, LOG_ENV_VAR};
use crate::error::{Error, Result};

/// Filter for builder log events
///
/// Directives come from `directives` when given, else from the `ABUILDER_LOG` environment
/// variable, else `abuilder=warn`.
///
/// # Errors
///
/// Returns [`Error::Tracing`] if the directives do not parse.
pub fn env_filter(directives: Option<&str>) -> Result<EnvFilter> {
    let directives = directives.map_or_else(
        || std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| DEFAULT_LOG_DIRECTIVES.to_string()),
        str::to_string,
    );
    EnvFilter::builder()
        .parse(&directives)
        .change_context(Error::Tracing(format!(
            "invalid filter directives '{directives}'"
        )))
}

/// Install a global stderr subscriber behind [`env_filter`]
///
/// # Errors
///
/// Returns [`Error::Tracing`] if the directives do not parse or a global subscriber is already
/// installed.
pub fn init_tracing() -> Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter(None)?)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| Report::new(Error::Tracing(e.to_string())))
}
