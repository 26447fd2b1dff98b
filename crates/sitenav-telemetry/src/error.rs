//! Error types for telemetry operations.

use thiserror::Error;

/// Result alias for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Errors raised while installing the tracing pipeline.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Installing the global tracing subscriber failed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying tracing subscriber error.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
    /// The level directive could not be parsed.
    #[error("invalid log level directive")]
    InvalidLevel {
        /// Directive supplied by the caller.
        value: String,
    },
}
