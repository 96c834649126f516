use std::time::Duration;

use linkpage_domain::LinkpageError;
use tracing::{info, warn};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tower_http=debug";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Calling this more than once is a
/// no-op, so tests and the binary can both invoke it.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if json {
        registry.with(fmt::layer().json().with_current_span(false)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    if result.is_ok() {
        info!(json, "tracing initialised");
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"links::add_link"`).
/// * `elapsed` - Duration the command execution took.
/// * `error` - Failure, if any.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&LinkpageError>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => {
            warn!(command, duration_ms, error_type = error_label(err), error = %err, "command_execution_failure")
        }
    }
}

/// Convert a `LinkpageError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &LinkpageError) -> &'static str {
    match error {
        LinkpageError::Database(_) => "database",
        LinkpageError::Config(_) => "config",
        LinkpageError::Network(_) => "network",
        LinkpageError::Storage(_) => "storage",
        LinkpageError::Unauthorized(_) => "unauthorized",
        LinkpageError::NotFound(_) => "not_found",
        LinkpageError::Conflict(_) => "conflict",
        LinkpageError::InvalidInput(_) => "invalid_input",
        LinkpageError::Validation(_) => "validation",
        LinkpageError::Internal(_) => "internal",
    }
}
