use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{Core, Error};

/// The namespace all logging core modules live in.
pub const CORES_NAMESPACE: &str = "logging.cores";

/// The fully qualified id of a module, such as `logging.cores.sentry`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(&'static str);

impl ModuleId {
    /// Creates a module id.
    pub const fn new(id: &'static str) -> ModuleId {
        ModuleId(id)
    }

    /// The full id.
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Everything before the last dot.
    pub fn namespace(&self) -> &'static str {
        self.0.rsplit_once('.').map_or("", |(namespace, _)| namespace)
    }

    /// The last dot-separated label.
    pub fn name(&self) -> &'static str {
        self.0.rsplit_once('.').map_or(self.0, |(_, name)| name)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Registration data of a module.
#[derive(Clone, Copy)]
pub struct ModuleInfo {
    /// The id the module is registered under.
    pub id: ModuleId,
    /// Creates a new, unprovisioned instance of the module.
    pub new: fn() -> Box<dyn CoreModule>,
}

impl fmt::Debug for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleInfo").field("id", &self.id).finish()
    }
}

/// A type that can be registered as a module.
pub trait Module {
    /// Returns the registration data. Must not depend on the configuration.
    fn module_info(&self) -> ModuleInfo;
}

/// A module that needs setting up after its configuration was decoded.
pub trait Provisioner {
    /// Prepares the module for use.
    fn provision(&mut self, ctx: &Context) -> Result<(), Error>;
}

/// A module that holds resources to release when it is unloaded.
pub trait CleanerUpper {
    /// Releases the module's resources.
    fn cleanup(&self) -> Result<(), Error>;
}

/// A logging core that is loaded through the module lifecycle.
///
/// The lifecycle is: the registry calls the factory in [`ModuleInfo`],
/// [`decode`](CoreModule::decode)s the configuration into the fresh value,
/// [`provision`](Provisioner::provision)s it and only then exposes it as a
/// [`Core`]. [`cleanup`](CleanerUpper::cleanup) runs at most once, when the
/// core is unloaded.
pub trait CoreModule: Module + Provisioner + CleanerUpper + Core {
    /// Replaces the module's configuration with the decoded `raw` value.
    fn decode(&mut self, raw: serde_json::Value) -> Result<(), Error>;

    /// Converts the module into the core the pipeline writes to.
    fn into_core(self: Arc<Self>) -> Arc<dyn Core>;
}

/// Values made available to modules while they are provisioned.
///
/// Values are looked up by type, so every type can be stored once.
#[derive(Default)]
pub struct Context {
    values: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Context {
        Context::default()
    }

    /// Stores a value, returning the one it replaced.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) -> Option<T> {
        self.values
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|previous| previous.downcast::<T>().ok())
            .map(|previous| *previous)
    }

    /// Stores a value and returns the context.
    #[must_use]
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Context {
        self.insert(value);
        self
    }

    /// Looks up a value by type.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values.len())
            .finish()
    }
}

#[test]
fn test_module_id() {
    let id = ModuleId::new("logging.cores.sentry");
    assert_eq!(id.namespace(), CORES_NAMESPACE);
    assert_eq!(id.name(), "sentry");
    assert_eq!(ModuleId::new("plain").namespace(), "");
    assert_eq!(ModuleId::new("plain").name(), "plain");
}

#[test]
fn test_context_values() {
    let mut ctx = Context::new().with(42u32);
    assert_eq!(ctx.get::<u32>(), Some(&42));
    assert_eq!(ctx.insert(7u32), Some(42));
    assert_eq!(ctx.get::<u32>(), Some(&7));
    assert!(ctx.get::<String>().is_none());
}
