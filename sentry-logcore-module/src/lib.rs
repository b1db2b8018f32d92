//! A `logcore` module that reports log entries to Sentry.
//!
//! The module registers as `logging.cores.sentry`. Once provisioned it
//! forwards every entry at `error` or above to Sentry; with breadcrumbs
//! enabled, entries at `info` or above are kept as breadcrumbs and attached
//! to the events that follow them.
//!
//! # Configuration
//!
//! ```json
//! {
//!     "module": "sentry",
//!     "dsn": "https://key@o0.ingest.sentry.io/0",
//!     "enable_tracing": true,
//!     "traces_sample_rate": 0.2,
//!     "profiles_sample_rate": 0.1,
//!     "tags": { "region": "eu-west-1" },
//!     "EnableBreadcrumbs": true
//! }
//! ```
//!
//! # Examples
//!
//! ```
//! use logcore::{Context, Registry};
//!
//! let mut registry = Registry::new();
//! sentry_logcore_module::register(&mut registry).unwrap();
//!
//! let err = registry
//!     .load_core(serde_json::json!({ "module": "sentry" }), &Context::new())
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "a DSN is required to report log entries to Sentry");
//! ```

#![doc(html_favicon_url = "https://sentry-brand.storage.googleapis.com/favicon.ico")]
#![doc(html_logo_url = "https://sentry-brand.storage.googleapis.com/sentry-glyph-black.png")]
#![warn(missing_docs)]
#![deny(unsafe_code)]

mod config;
mod error;
mod module;

pub use crate::config::SentryConfig;
pub use crate::error::ProvisionError;
pub use crate::module::{
    register, ProvisionOptions, SentryLogCore, CLEANUP_FLUSH_TIMEOUT, MODULE_ID,
};
