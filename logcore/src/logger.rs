use std::sync::Arc;

use crate::{Core, Entry, Error, Field, Level};

/// The front end of a pipeline: builds entries and hands them to a core.
#[derive(Clone)]
pub struct Logger {
    core: Arc<dyn Core>,
    name: Option<String>,
}

impl Logger {
    /// Creates a logger writing to `core`.
    pub fn new(core: Arc<dyn Core>) -> Logger {
        Logger { core, name: None }
    }

    /// Sets the name stamped on every entry.
    #[must_use]
    pub fn named<N: Into<String>>(mut self, name: N) -> Logger {
        self.name = Some(name.into());
        self
    }

    /// Returns a logger whose entries carry `fields` in addition to their own.
    pub fn with(&self, fields: &[Field]) -> Logger {
        Logger {
            core: self.core.with(fields),
            name: self.name.clone(),
        }
    }

    /// The core this logger writes to.
    pub fn core(&self) -> &Arc<dyn Core> {
        &self.core
    }

    /// Logs a message.
    ///
    /// The entry is only built into a write if some core admits it during the
    /// check.
    pub fn log<M: Into<String>>(
        &self,
        level: Level,
        message: M,
        fields: &[Field],
    ) -> Result<(), Error> {
        let mut entry = Entry::new(level, message);
        entry.logger_name = self.name.clone();
        match Arc::clone(&self.core).check(&entry, None) {
            Some(checked) => checked.write(fields),
            None => Ok(()),
        }
    }

    /// Logs at [`Level::Debug`].
    pub fn debug<M: Into<String>>(&self, message: M, fields: &[Field]) -> Result<(), Error> {
        self.log(Level::Debug, message, fields)
    }

    /// Logs at [`Level::Info`].
    pub fn info<M: Into<String>>(&self, message: M, fields: &[Field]) -> Result<(), Error> {
        self.log(Level::Info, message, fields)
    }

    /// Logs at [`Level::Warn`].
    pub fn warn<M: Into<String>>(&self, message: M, fields: &[Field]) -> Result<(), Error> {
        self.log(Level::Warn, message, fields)
    }

    /// Logs at [`Level::Error`].
    pub fn error<M: Into<String>>(&self, message: M, fields: &[Field]) -> Result<(), Error> {
        self.log(Level::Error, message, fields)
    }

    /// Flushes the underlying core.
    pub fn sync(&self) -> Result<(), Error> {
        self.core.sync()
    }
}
