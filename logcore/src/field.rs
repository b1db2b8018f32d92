use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// The value of a structured [`Field`].
#[derive(Clone, Debug)]
pub enum FieldValue {
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    I64(i64),
    /// An unsigned integer.
    U64(u64),
    /// A floating point number.
    F64(f64),
    /// A string.
    Str(String),
    /// An error value. Sinks may report these specially.
    Error(Arc<dyn StdError + Send + Sync>),
    /// Any other JSON-like value.
    Json(Value),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(value) => value.fmt(f),
            FieldValue::I64(value) => value.fmt(f),
            FieldValue::U64(value) => value.fmt(f),
            FieldValue::F64(value) => value.fmt(f),
            FieldValue::Str(value) => f.write_str(value),
            FieldValue::Error(err) => err.fmt(f),
            FieldValue::Json(value) => value.fmt(f),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::$variant(value.into())
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i32 => I64,
    i64 => I64,
    u32 => U64,
    u64 => U64,
    f32 => F64,
    f64 => F64,
    String => Str,
    &str => Str,
    Value => Json,
}

/// A key/value pair attached to a log entry.
#[derive(Clone, Debug)]
pub struct Field {
    /// The field name.
    pub key: String,
    /// The field value.
    pub value: FieldValue,
}

impl Field {
    /// Creates a new field.
    pub fn new<K, V>(key: K, value: V) -> Field
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Field {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a field named `error` holding the given error.
    pub fn error<E>(err: E) -> Field
    where
        E: StdError + Send + Sync + 'static,
    {
        Field::named_error("error", err)
    }

    /// Creates an error field with a custom name.
    pub fn named_error<K, E>(key: K, err: E) -> Field
    where
        K: Into<String>,
        E: StdError + Send + Sync + 'static,
    {
        Field {
            key: key.into(),
            value: FieldValue::Error(Arc::new(err)),
        }
    }

    /// Returns the contained error if this is an error field.
    pub fn as_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match &self.value {
            FieldValue::Error(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
