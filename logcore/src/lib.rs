//! The contract shared by every sink of a structured logging pipeline.
//!
//! A [`Core`] receives log [`Entry`] values and decides whether and how to
//! persist or forward them. Entries go through a two step admission: the
//! pipeline first asks every core to [`check`](Core::check) the entry, which
//! builds up a [`CheckedEntry`] listing the cores that want it, and then
//! writes the checked entry to exactly those cores.
//!
//! Cores are usually not constructed by hand. They are registered as modules
//! in a [`Registry`], decoded from JSON configuration and provisioned before
//! the pipeline ever sees them:
//!
//! ```
//! use logcore::{Context, Logger, Registry};
//!
//! let registry = Registry::new();
//! let err = registry
//!     .load_core(serde_json::json!({ "module": "missing" }), &Context::new())
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "unknown module `logging.cores.missing`");
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod core;
mod entry;
mod error;
mod field;
mod level;
mod logger;
mod module;
mod registry;

pub use crate::core::{tee, CheckedEntry, Core, NopCore, Tee};
pub use crate::entry::{Caller, Entry};
pub use crate::error::{BoxError, Error};
pub use crate::field::{Field, FieldValue};
pub use crate::level::{Level, ParseLevelError};
pub use crate::logger::Logger;
pub use crate::module::{
    CleanerUpper, Context, CoreModule, Module, ModuleId, ModuleInfo, Provisioner,
    CORES_NAMESPACE,
};
pub use crate::registry::{LoadedCore, Registry};
