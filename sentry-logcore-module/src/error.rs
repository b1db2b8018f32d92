use sentry::types::ParseDsnError;

/// Why a [`SentryLogCore`](crate::SentryLogCore) could not be provisioned.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// No DSN was configured.
    #[error("a DSN is required to report log entries to Sentry")]
    MissingDsn,
    /// The configured DSN could not be parsed.
    #[error("invalid DSN: {0}")]
    InvalidDsn(#[from] ParseDsnError),
    /// A sample rate is outside of `0.0..=1.0`.
    #[error("{field} must be between 0.0 and 1.0, got {value}")]
    SampleRate {
        /// The offending configuration key.
        field: &'static str,
        /// The configured value.
        value: f64,
    },
}
