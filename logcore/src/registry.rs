use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{Context, Core, CoreModule, Error, ModuleId, ModuleInfo, CORES_NAMESPACE};

/// Known logging core modules, by id.
#[derive(Default)]
pub struct Registry {
    modules: BTreeMap<&'static str, ModuleInfo>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Registers a module.
    ///
    /// Fails if the id is outside [`CORES_NAMESPACE`] or already taken.
    pub fn register(&mut self, info: ModuleInfo) -> Result<(), Error> {
        if info.id.namespace() != CORES_NAMESPACE {
            return Err(Error::Namespace {
                id: info.id.to_string(),
                expected: CORES_NAMESPACE,
            });
        }
        if self.modules.contains_key(info.id.as_str()) {
            return Err(Error::DuplicateModule(info.id.to_string()));
        }
        self.modules.insert(info.id.as_str(), info);
        Ok(())
    }

    /// Looks up a module by its full id.
    pub fn get(&self, id: &str) -> Option<&ModuleInfo> {
        self.modules.get(id)
    }

    /// Iterates over the registered ids in order.
    pub fn ids(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.modules.values().map(|info| info.id)
    }

    /// Creates, decodes and provisions the module with the given id.
    pub fn load(&self, id: &str, raw: Value, ctx: &Context) -> Result<LoadedCore, Error> {
        let info = self
            .get(id)
            .ok_or_else(|| Error::UnknownModule(id.to_owned()))?;
        let mut module = (info.new)();
        module.decode(raw)?;
        module.provision(ctx)?;
        Ok(LoadedCore {
            id: info.id,
            module: Arc::from(module),
        })
    }

    /// Loads a core from a configuration object naming its module.
    ///
    /// The `module` key holds the module name relative to
    /// [`CORES_NAMESPACE`]; the remaining keys are the module's own
    /// configuration:
    ///
    /// ```json
    /// { "module": "sentry", "dsn": "https://key@sentry.example.com/1" }
    /// ```
    pub fn load_core(&self, mut raw: Value, ctx: &Context) -> Result<LoadedCore, Error> {
        let name = raw
            .as_object_mut()
            .and_then(|object| object.remove("module"))
            .ok_or(Error::MissingModuleName)?;
        let name = name.as_str().ok_or(Error::MissingModuleName)?;
        self.load(&format!("{}.{}", CORES_NAMESPACE, name), raw, ctx)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.modules.keys()).finish()
    }
}

/// A provisioned core module.
///
/// Only provisioned modules are ever wrapped in this type, so the core it
/// hands out is always ready for use.
pub struct LoadedCore {
    id: ModuleId,
    module: Arc<dyn CoreModule>,
}

impl LoadedCore {
    /// The id of the loaded module.
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// The core to hand to the pipeline.
    pub fn core(&self) -> Arc<dyn Core> {
        Arc::clone(&self.module).into_core()
    }

    /// Unloads the module, releasing its resources.
    pub fn cleanup(self) -> Result<(), Error> {
        self.module.cleanup()
    }
}

impl fmt::Debug for LoadedCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedCore").field("id", &self.id).finish()
    }
}
