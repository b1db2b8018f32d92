use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The severity of a log entry.
///
/// Levels are totally ordered, `Debug` being the least and `Fatal` the most
/// severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Verbose diagnostics, usually disabled in production.
    Debug,
    /// Normal operational messages.
    Info,
    /// Something unexpected that does not need immediate attention.
    Warn,
    /// A failure that should be looked at.
    Error,
    /// A failure that panics in development builds.
    DPanic,
    /// A failure after which the caller panics.
    Panic,
    /// A failure after which the process exits.
    Fatal,
}

impl Level {
    /// All levels, from least to most severe.
    pub const ALL: [Level; 7] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::DPanic,
        Level::Panic,
        Level::Fatal,
    ];

    /// Returns the lowercase name of the level.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::DPanic => "dpanic",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`Level`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level `{0}`")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Level, ParseLevelError> {
        Level::ALL
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLevelError(s.to_owned()))
    }
}

#[test]
fn test_level_names() {
    for level in Level::ALL {
        assert_eq!(level.as_str().parse::<Level>(), Ok(level));
    }
    assert_eq!("WARN".parse::<Level>(), Ok(Level::Warn));
    assert!("warning".parse::<Level>().is_err());
    assert!(Level::Info < Level::Error);
    assert!(Level::DPanic > Level::Error);
}
