use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use logcore::{CheckedEntry, Core, Entry, Error, Field, Level};
use sentry_core::{Client, Hub, Scope};

use crate::converters::{breadcrumb_from_entry, event_from_entry};

/// How long [`SentryCore::sync`](Core::sync) waits for the client by default.
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// Decides which entries a [`SentryCore`] reports and how.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    /// Entries at or above this level are captured as events.
    pub level: Level,
    /// Entries at or above this level are recorded as breadcrumbs, if
    /// breadcrumbs are enabled.
    pub breadcrumb_level: Level,
    /// Whether to record breadcrumbs at all.
    pub enable_breadcrumbs: bool,
    /// How long a sync waits for pending events to be sent.
    pub flush_timeout: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            level: Level::Error,
            breadcrumb_level: Level::Info,
            enable_breadcrumbs: false,
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
        }
    }
}

/// A logging core that reports entries to Sentry.
pub struct SentryCore {
    config: CoreConfig,
    hub: Arc<Hub>,
    fields: Vec<Field>,
}

impl SentryCore {
    /// Creates a core reporting through `client`, with a scope of its own.
    pub fn new(config: CoreConfig, client: Arc<Client>) -> Self {
        let hub = Hub::new(Some(client), Arc::new(Scope::default()));
        Self::from_hub(config, Arc::new(hub))
    }

    /// Creates a core reporting through an existing hub.
    ///
    /// Breadcrumbs are recorded on the hub's scope.
    pub fn from_hub(config: CoreConfig, hub: Arc<Hub>) -> Self {
        Self {
            config,
            hub,
            fields: Vec::new(),
        }
    }

    /// The hub events are captured on.
    pub fn hub(&self) -> &Arc<Hub> {
        &self.hub
    }

    /// The configuration of this core.
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    fn records_breadcrumb(&self, level: Level) -> bool {
        self.config.enable_breadcrumbs && level >= self.config.breadcrumb_level
    }
}

impl fmt::Debug for SentryCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentryCore")
            .field("config", &self.config)
            .field("fields", &self.fields)
            .finish()
    }
}

impl Core for SentryCore {
    fn enabled(&self, level: Level) -> bool {
        level >= self.config.level
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Core> {
        let mut bound = self.fields.clone();
        bound.extend_from_slice(fields);
        Arc::new(SentryCore {
            config: self.config.clone(),
            hub: Arc::clone(&self.hub),
            fields: bound,
        })
    }

    fn check(
        self: Arc<Self>,
        entry: &Entry,
        checked: Option<CheckedEntry>,
    ) -> Option<CheckedEntry> {
        if self.enabled(entry.level) || self.records_breadcrumb(entry.level) {
            Some(CheckedEntry::add_core(checked, entry, self))
        } else {
            checked
        }
    }

    fn write(&self, entry: &Entry, fields: &[Field]) -> Result<(), Error> {
        let fields: Vec<Field> = self.fields.iter().chain(fields).cloned().collect();

        // capture first so an event never carries its own breadcrumb
        if self.enabled(entry.level) {
            self.hub.capture_event(event_from_entry(entry, &fields));
        }
        if self.records_breadcrumb(entry.level) {
            self.hub.add_breadcrumb(breadcrumb_from_entry(entry, &fields));
        }

        // panic and fatal entries are followed by the process going down
        if entry.level > Level::Error {
            return self.sync();
        }
        Ok(())
    }

    fn sync(&self) -> Result<(), Error> {
        if let Some(client) = self.hub.client() {
            client.flush(Some(self.config.flush_timeout));
        }
        Ok(())
    }
}
