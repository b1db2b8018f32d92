use logcore::{Entry, Field, FieldValue};
use sentry_core::protocol::{Event, Map, Value};
use sentry_core::{event_from_error, Breadcrumb, Level};

/// Converts a [`logcore::Level`] to a Sentry [`Level`]
pub fn convert_log_level(level: logcore::Level) -> Level {
    match level {
        logcore::Level::Debug => Level::Debug,
        logcore::Level::Info => Level::Info,
        logcore::Level::Warn => Level::Warning,
        logcore::Level::Error => Level::Error,
        logcore::Level::DPanic | logcore::Level::Panic | logcore::Level::Fatal => Level::Fatal,
    }
}

/// Converts a field value to a JSON [`Value`].
///
/// Errors are represented by their display string.
pub fn convert_field_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Bool(value) => Value::from(*value),
        FieldValue::I64(value) => Value::from(*value),
        FieldValue::U64(value) => Value::from(*value),
        FieldValue::F64(value) => Value::from(*value),
        FieldValue::Str(value) => Value::from(value.as_str()),
        FieldValue::Error(err) => Value::from(err.to_string()),
        FieldValue::Json(value) => value.clone(),
    }
}

/// Collects fields into a map. Later fields win over earlier ones with the
/// same key.
pub fn fields_to_map<'a, I>(fields: I) -> Map<String, Value>
where
    I: IntoIterator<Item = &'a Field>,
{
    fields
        .into_iter()
        .map(|field| (field.key.clone(), convert_field_value(&field.value)))
        .collect()
}

/// Creates a [`Breadcrumb`] from a given [`Entry`] and its fields.
pub fn breadcrumb_from_entry(entry: &Entry, fields: &[Field]) -> Breadcrumb {
    Breadcrumb {
        timestamp: entry.time,
        ty: "log".into(),
        category: entry.logger_name.clone(),
        level: convert_log_level(entry.level),
        message: Some(entry.message.clone()),
        data: fields_to_map(fields),
        ..Default::default()
    }
}

/// Creates an [`Event`] from a given [`Entry`] and its fields.
///
/// Fields end up in `extra`. Every error field additionally contributes its
/// exception chain to the event.
pub fn event_from_entry(entry: &Entry, fields: &[Field]) -> Event<'static> {
    let mut extra = fields_to_map(fields);
    if let Some(ref caller) = entry.caller {
        extra.insert(
            "caller".into(),
            format!("{}:{}", caller.file, caller.line).into(),
        );
    }
    if let Some(ref stack) = entry.stack {
        extra.insert("stacktrace".into(), stack.clone().into());
    }

    let exception: Vec<_> = fields
        .iter()
        .filter_map(Field::as_error)
        .flat_map(|err| event_from_error(err).exception.values)
        .collect();

    Event {
        logger: entry.logger_name.clone(),
        level: convert_log_level(entry.level),
        message: Some(entry.message.clone()),
        timestamp: entry.time,
        extra,
        exception: exception.into(),
        ..Default::default()
    }
}

#[test]
fn test_level_mapping() {
    assert_eq!(convert_log_level(logcore::Level::Warn), Level::Warning);
    assert_eq!(convert_log_level(logcore::Level::DPanic), Level::Fatal);
    assert_eq!(convert_log_level(logcore::Level::Debug), Level::Debug);
}

#[test]
fn test_later_fields_win() {
    let fields = [Field::new("attempt", 1), Field::new("attempt", 2)];
    assert_eq!(fields_to_map(&fields)["attempt"], Value::from(2));
}
