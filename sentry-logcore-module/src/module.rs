use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use logcore::{
    CheckedEntry, CleanerUpper, Context, Core, CoreModule, Entry, Error, Field, Level, Module,
    ModuleId, ModuleInfo, Provisioner, Registry,
};
use sentry::{Client, Hub, Scope, TransportFactory};
use sentry_logcore::{CoreConfig, SentryCore};

use crate::{ProvisionError, SentryConfig};

/// The id the module is registered under.
pub const MODULE_ID: ModuleId = ModuleId::new("logging.cores.sentry");

/// How long [`cleanup`](CleanerUpper::cleanup) waits for pending events.
pub const CLEANUP_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// Registers the Sentry logging core.
pub fn register(registry: &mut Registry) -> Result<(), Error> {
    registry.register(SentryLogCore::default().module_info())
}

/// Controls the side effects of provisioning.
///
/// Put a value of this type into the [`Context`] passed to
/// [`provision`](Provisioner::provision) to override the defaults.
#[derive(Clone)]
pub struct ProvisionOptions {
    /// Replaces the default HTTP transport of the client.
    pub transport: Option<Arc<dyn TransportFactory>>,
    /// Whether the client is also bound to the process-wide main hub, so
    /// that events captured outside of the logging pipeline reach Sentry too.
    pub bind_main_hub: bool,
}

impl ProvisionOptions {
    /// Provisions with the given transport and leaves the main hub alone.
    pub fn with_transport(transport: Arc<dyn TransportFactory>) -> Self {
        Self {
            transport: Some(transport),
            bind_main_hub: false,
        }
    }
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self {
            transport: None,
            bind_main_hub: true,
        }
    }
}

impl fmt::Debug for ProvisionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionOptions")
            .field("transport", &self.transport.as_ref().map(|_| ".."))
            .field("bind_main_hub", &self.bind_main_hub)
            .finish()
    }
}

/// A logging core that reports entries to Sentry.
///
/// A new value is unprovisioned: only [`module_info`](Module::module_info),
/// [`decode`](CoreModule::decode) and provisioning may be called on it. The
/// [`Core`] methods panic until provisioning succeeded; the
/// [`Registry`](logcore::Registry) never hands out a module in that state.
///
/// Once provisioned, every [`Core`] method is forwarded to a
/// [`SentryCore`] that captures entries at `error` and above as events and,
/// if enabled, keeps entries at `info` and above as breadcrumbs.
#[derive(Default)]
pub struct SentryLogCore {
    config: SentryConfig,
    client: Option<Arc<Client>>,
    core: Option<Arc<dyn Core>>,
}

impl SentryLogCore {
    /// Creates an unprovisioned core with the given configuration.
    pub fn new(config: SentryConfig) -> Self {
        Self {
            config,
            client: None,
            core: None,
        }
    }

    /// Creates a provisioned core from an existing client and delegate.
    pub fn from_parts(config: SentryConfig, client: Arc<Client>, core: Arc<dyn Core>) -> Self {
        Self {
            config,
            client: Some(client),
            core: Some(core),
        }
    }

    /// The decoded configuration.
    pub fn config(&self) -> &SentryConfig {
        &self.config
    }

    /// The client, once provisioned.
    pub fn client(&self) -> Option<&Arc<Client>> {
        self.client.as_ref()
    }

    /// Returns `true` after a successful provisioning.
    pub fn is_provisioned(&self) -> bool {
        self.core.is_some()
    }

    /// Creates the client and the delegate core.
    ///
    /// Every call builds a fresh client. On error the core keeps whatever
    /// state it had before.
    pub fn provision_with(&mut self, options: &ProvisionOptions) -> Result<(), ProvisionError> {
        let mut client_options = self.config.client_options()?;
        client_options.transport = options.transport.clone();
        let client = Arc::new(Client::from(sentry::apply_defaults(client_options)));

        if options.bind_main_hub {
            let hub = Hub::main();
            hub.bind_client(Some(Arc::clone(&client)));
            hub.configure_scope(|scope| set_tags(scope, &self.config.tags));
        }

        let core = SentryCore::new(
            CoreConfig {
                level: Level::Error,
                breadcrumb_level: Level::Info,
                enable_breadcrumbs: self.config.enable_breadcrumbs,
                ..CoreConfig::default()
            },
            Arc::clone(&client),
        );
        core.hub()
            .configure_scope(|scope| set_tags(scope, &self.config.tags));

        log::debug!(
            "provisioned {} reporting to {}",
            MODULE_ID,
            client.dsn().map_or("<none>", |dsn| dsn.host())
        );
        self.client = Some(client);
        self.core = Some(Arc::new(core));
        Ok(())
    }

    fn delegate(&self) -> &Arc<dyn Core> {
        match self.core {
            Some(ref core) => core,
            None => panic!("{} used before provisioning", MODULE_ID),
        }
    }
}

fn set_tags(scope: &mut Scope, tags: &BTreeMap<String, String>) {
    for (key, value) in tags {
        scope.set_tag(key, value);
    }
}

fn new_module() -> Box<dyn CoreModule> {
    Box::new(SentryLogCore::default())
}

impl fmt::Debug for SentryLogCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentryLogCore")
            .field("config", &self.config)
            .field("provisioned", &self.is_provisioned())
            .finish()
    }
}

impl Module for SentryLogCore {
    fn module_info(&self) -> ModuleInfo {
        ModuleInfo {
            id: MODULE_ID,
            new: new_module,
        }
    }
}

impl Provisioner for SentryLogCore {
    fn provision(&mut self, ctx: &Context) -> Result<(), Error> {
        let defaults = ProvisionOptions::default();
        let options = ctx.get::<ProvisionOptions>().unwrap_or(&defaults);
        self.provision_with(options).map_err(Error::provision)
    }
}

impl CleanerUpper for SentryLogCore {
    /// Waits up to [`CLEANUP_FLUSH_TIMEOUT`] for pending events.
    ///
    /// Always succeeds, whether or not everything was sent in time.
    fn cleanup(&self) -> Result<(), Error> {
        if let Some(ref client) = self.client {
            // a flush that runs out of time is not reported
            client.flush(Some(CLEANUP_FLUSH_TIMEOUT));
            log::debug!("cleaned up {}", MODULE_ID);
        }
        Ok(())
    }
}

impl Core for SentryLogCore {
    fn enabled(&self, level: Level) -> bool {
        self.delegate().enabled(level)
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Core> {
        self.delegate().with(fields)
    }

    fn check(
        self: Arc<Self>,
        entry: &Entry,
        checked: Option<CheckedEntry>,
    ) -> Option<CheckedEntry> {
        Arc::clone(self.delegate()).check(entry, checked)
    }

    fn write(&self, entry: &Entry, fields: &[Field]) -> Result<(), Error> {
        self.delegate().write(entry, fields)
    }

    fn sync(&self) -> Result<(), Error> {
        self.delegate().sync()
    }
}

impl CoreModule for SentryLogCore {
    fn decode(&mut self, raw: serde_json::Value) -> Result<(), Error> {
        self.config = serde_json::from_value(raw)?;
        Ok(())
    }

    fn into_core(self: Arc<Self>) -> Arc<dyn Core> {
        self
    }
}
