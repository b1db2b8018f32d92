use std::time::SystemTime;

use crate::Level;

/// The source location a log entry was emitted from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    /// The source file.
    pub file: String,
    /// The line within `file`.
    pub line: u32,
    /// The enclosing function, if known.
    pub function: Option<String>,
}

/// A single log entry, without its structured fields.
#[derive(Clone, Debug)]
pub struct Entry {
    /// The severity.
    pub level: Level,
    /// When the entry was created.
    pub time: SystemTime,
    /// The name of the logger that produced the entry.
    pub logger_name: Option<String>,
    /// The log message.
    pub message: String,
    /// Where the entry was logged.
    pub caller: Option<Caller>,
    /// A formatted stack trace, if one was captured.
    pub stack: Option<String>,
}

impl Entry {
    /// Creates an entry timestamped now.
    pub fn new<M: Into<String>>(level: Level, message: M) -> Entry {
        Entry {
            level,
            time: SystemTime::now(),
            logger_name: None,
            message: message.into(),
            caller: None,
            stack: None,
        }
    }

    /// Sets the logger name.
    #[must_use]
    pub fn with_logger_name<N: Into<String>>(mut self, name: N) -> Entry {
        self.logger_name = Some(name.into());
        self
    }

    /// Sets the caller location.
    #[must_use]
    pub fn with_caller(mut self, caller: Caller) -> Entry {
        self.caller = Some(caller);
        self
    }
}
