use std::error::Error as StdError;

/// A boxed error returned by a core or a module.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors produced by cores and by the module lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A core failed to write or sync.
    #[error(transparent)]
    Backend(BoxError),
    /// Several cores failed while fanning out one operation.
    #[error("{}", join_errors(.0))]
    Multiple(Vec<Error>),
    /// The module configuration could not be decoded.
    #[error("failed to decode module configuration: {0}")]
    Decode(#[from] serde_json::Error),
    /// A module could not be provisioned.
    #[error(transparent)]
    Provision(BoxError),
    /// No module is registered under the requested id.
    #[error("unknown module `{0}`")]
    UnknownModule(String),
    /// A module with the same id was registered before.
    #[error("module `{0}` is already registered")]
    DuplicateModule(String),
    /// The module id is outside the namespace the registry accepts.
    #[error("module `{id}` is not in the `{expected}` namespace")]
    Namespace {
        /// The rejected id.
        id: String,
        /// The namespace the registry accepts.
        expected: &'static str,
    },
    /// The configuration does not name a module.
    #[error("module configuration is missing the `module` key")]
    MissingModuleName,
}

impl Error {
    /// Wraps a failure of a core.
    pub fn backend<E: Into<BoxError>>(err: E) -> Error {
        Error::Backend(err.into())
    }

    /// Wraps a provisioning failure of a module.
    pub fn provision<E: Into<BoxError>>(err: E) -> Error {
        Error::Provision(err.into())
    }

    /// Collapses the errors of a fan-out into a single result.
    pub(crate) fn combine(mut errors: Vec<Error>) -> Result<(), Error> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(Error::Multiple(errors)),
        }
    }
}

fn join_errors(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
