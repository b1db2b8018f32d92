//! Adds support for capturing events and breadcrumbs from `logcore` entries.
//!
//! [`SentryCore`] is a [`logcore::Core`] that reports entries to Sentry. Entries
//! at or above the configured level are captured as events; optionally,
//! entries at or above the breadcrumb level are recorded as breadcrumbs that
//! show up on the events captured after them. By default anything at `Error`
//! or above becomes an event and breadcrumbs are off.
//!
//! Every core owns its own [`Hub`](sentry_core::Hub), so breadcrumbs and tags
//! never leak into unrelated scopes.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use logcore::{Level, Logger};
//! use sentry_logcore::{CoreConfig, SentryCore};
//!
//! let client = Arc::new(sentry_core::Client::from(sentry_core::ClientOptions::default()));
//! let core = SentryCore::new(
//!     CoreConfig {
//!         enable_breadcrumbs: true,
//!         ..CoreConfig::default()
//!     },
//!     client,
//! );
//!
//! let logger = Logger::new(Arc::new(core));
//! logger.info("recorded as breadcrumb", &[]).unwrap();
//! logger.error("captured as event", &[]).unwrap();
//! ```

#![doc(html_favicon_url = "https://sentry-brand.storage.googleapis.com/favicon.ico")]
#![doc(html_logo_url = "https://sentry-brand.storage.googleapis.com/sentry-glyph-black.png")]
#![warn(missing_docs)]
#![deny(unsafe_code)]

mod converters;
mod core;

pub use crate::converters::{
    breadcrumb_from_entry, convert_field_value, convert_log_level, event_from_entry,
    fields_to_map,
};
pub use crate::core::{CoreConfig, SentryCore, DEFAULT_FLUSH_TIMEOUT};
