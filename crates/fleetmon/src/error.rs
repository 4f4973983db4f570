//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` / `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use fleetmon_core::{ApiError, CoreError};

/// Exit codes. Scripts depend on these staying put.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(fleetmon::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             URL: {url}\n\
             Try: fleetmon stats --server {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(fleetmon::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── API ──────────────────────────────────────────────────────────

    #[error("Backend rejected the request ({status}): {message}")]
    #[diagnostic(code(fleetmon::api_error))]
    Api { status: String, message: String },

    #[error("Could not decode the backend response: {message}")]
    #[diagnostic(
        code(fleetmon::bad_response),
        help("The server at the configured URL may not be the fleet backend.")
    )]
    BadResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid input: {reason}")]
    #[diagnostic(code(fleetmon::validation))]
    Validation { reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No backend server configured")]
    #[diagnostic(
        code(fleetmon::no_server),
        help(
            "Pass --server, set FLEET_SERVER, or create a config file with:\n\
             fleetmon config init --server http://tracker.example.net:6062\n\
             Expected at: {path}"
        )
    )]
    NoServer { path: String },

    #[error("Configuration error")]
    #[diagnostic(code(fleetmon::config))]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to a process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NoServer { .. } | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(api) => api_to_cli(api),
            CoreError::Validation(draft) => CliError::Validation {
                reason: draft.to_string(),
            },
            CoreError::Config { message } => CliError::Validation { reason: message },
        }
    }
}

fn api_to_cli(err: ApiError) -> CliError {
    match err {
        ApiError::Transport(e) if e.is_timeout() => CliError::Timeout,
        ApiError::Transport(e) => {
            let url = e
                .url()
                .map_or_else(|| "(unknown)".into(), ToString::to_string);
            CliError::ConnectionFailed {
                url,
                source: e.into(),
            }
        }
        ApiError::Status { status, body } => CliError::Api {
            status: status.to_string(),
            message: body,
        },
        ApiError::Deserialization { message, .. } => CliError::BadResponse { message },
        ApiError::InvalidUrl(reason) => CliError::Validation { reason },
    }
}

impl From<fleetmon_config::ConfigError> for CliError {
    fn from(err: fleetmon_config::ConfigError) -> Self {
        match err {
            fleetmon_config::ConfigError::NoServer => CliError::NoServer {
                path: fleetmon_config::config_path().display().to_string(),
            },
            fleetmon_config::ConfigError::Validation { field, reason } => CliError::Validation {
                reason: format!("{field}: {reason}"),
            },
            other => CliError::Config(other.into()),
        }
    }
}
