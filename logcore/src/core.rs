use std::fmt;
use std::sync::Arc;

use crate::{Entry, Error, Field, Level};

/// A sink of a logging pipeline.
///
/// Implementations must be safe to use from many threads at once; the
/// pipeline calls `check`, `write` and `with` concurrently.
pub trait Core: Send + Sync {
    /// Returns `true` if entries of the given level are accepted.
    ///
    /// This is a cheap hint; whether an individual entry is written is
    /// decided by [`check`](Core::check).
    fn enabled(&self, level: Level) -> bool;

    /// Returns a core that attaches `fields` to every entry it writes.
    ///
    /// The receiver is left unchanged.
    fn with(&self, fields: &[Field]) -> Arc<dyn Core>;

    /// Decides whether this core wants `entry`.
    ///
    /// A core that wants the entry adds itself with
    /// [`CheckedEntry::add_core`]. A core that does not must return
    /// `checked` untouched so that the decisions of the cores checked before
    /// it survive.
    fn check(
        self: Arc<Self>,
        entry: &Entry,
        checked: Option<CheckedEntry>,
    ) -> Option<CheckedEntry>;

    /// Writes an entry with its fields.
    fn write(&self, entry: &Entry, fields: &[Field]) -> Result<(), Error>;

    /// Flushes buffered entries, if any.
    fn sync(&self) -> Result<(), Error>;
}

/// An entry together with the cores that agreed to write it.
pub struct CheckedEntry {
    entry: Entry,
    cores: Vec<Arc<dyn Core>>,
}

impl CheckedEntry {
    /// Adds `core` to the cores that will write `entry`.
    ///
    /// Starts a new checked entry if `checked` is `None`.
    pub fn add_core(
        checked: Option<CheckedEntry>,
        entry: &Entry,
        core: Arc<dyn Core>,
    ) -> CheckedEntry {
        let mut checked = checked.unwrap_or_else(|| CheckedEntry {
            entry: entry.clone(),
            cores: Vec::new(),
        });
        checked.cores.push(core);
        checked
    }

    /// The entry being written.
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// The number of cores that admitted the entry.
    pub fn len(&self) -> usize {
        self.cores.len()
    }

    /// Returns `true` if no core admitted the entry.
    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    /// Writes the entry to every admitting core.
    ///
    /// A failing core does not stop the others from being written to; all
    /// failures are returned together.
    pub fn write(self, fields: &[Field]) -> Result<(), Error> {
        let errors = self
            .cores
            .iter()
            .filter_map(|core| core.write(&self.entry, fields).err())
            .collect();
        Error::combine(errors)
    }
}

impl fmt::Debug for CheckedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedEntry")
            .field("entry", &self.entry)
            .field("cores", &self.cores.len())
            .finish()
    }
}

/// A core that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NopCore;

impl Core for NopCore {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn with(&self, _fields: &[Field]) -> Arc<dyn Core> {
        Arc::new(NopCore)
    }

    fn check(
        self: Arc<Self>,
        _entry: &Entry,
        checked: Option<CheckedEntry>,
    ) -> Option<CheckedEntry> {
        checked
    }

    fn write(&self, _entry: &Entry, _fields: &[Field]) -> Result<(), Error> {
        Ok(())
    }

    fn sync(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// Fans every operation out to several cores.
pub struct Tee {
    cores: Vec<Arc<dyn Core>>,
}

/// Combines cores into one.
///
/// No cores yield a [`NopCore`] and a single core is returned as is.
pub fn tee(mut cores: Vec<Arc<dyn Core>>) -> Arc<dyn Core> {
    match cores.len() {
        0 => Arc::new(NopCore),
        1 => cores.remove(0),
        _ => Arc::new(Tee { cores }),
    }
}

impl Core for Tee {
    fn enabled(&self, level: Level) -> bool {
        self.cores.iter().any(|core| core.enabled(level))
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Core> {
        Arc::new(Tee {
            cores: self.cores.iter().map(|core| core.with(fields)).collect(),
        })
    }

    fn check(
        self: Arc<Self>,
        entry: &Entry,
        checked: Option<CheckedEntry>,
    ) -> Option<CheckedEntry> {
        self.cores
            .iter()
            .fold(checked, |checked, core| Arc::clone(core).check(entry, checked))
    }

    fn write(&self, entry: &Entry, fields: &[Field]) -> Result<(), Error> {
        let errors = self
            .cores
            .iter()
            .filter_map(|core| core.write(entry, fields).err())
            .collect();
        Error::combine(errors)
    }

    fn sync(&self) -> Result<(), Error> {
        let errors = self.cores.iter().filter_map(|core| core.sync().err()).collect();
        Error::combine(errors)
    }
}
