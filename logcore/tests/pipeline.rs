
use std::sync::Arc;

use logcore::{tee, Core, Entry, Error, Field, Level, Logger, NopCore};
use shared::RecordingCore;

#[test]
fn tee_threads_check_through_every_core() {
    let errors = RecordingCore::new(Level::Error);
    let everything = RecordingCore::new(Level::Debug);
    let cores: Vec<Arc<dyn Core>> = vec![
        Arc::new(errors.clone()),
        Arc::new(everything.clone()),
    ];
    let core = tee(cores);

    let entry = Entry::new(Level::Info, "just info");
    let checked = Arc::clone(&core).check(&entry, None).unwrap();
    assert_eq!(checked.len(), 1);
    checked.write(&[]).unwrap();

    let entry = Entry::new(Level::Error, "an error");
    let checked = core.check(&entry, None).unwrap();
    assert_eq!(checked.len(), 2);
    checked.write(&[]).unwrap();

    assert_eq!(errors.messages(), vec!["an error"]);
    assert_eq!(everything.messages(), vec!["just info", "an error"]);
}

#[test]
fn check_keeps_previous_decisions() {
    let first = Arc::new(RecordingCore::new(Level::Debug));
    let second = Arc::new(RecordingCore::new(Level::Fatal));

    let entry = Entry::new(Level::Warn, "warned");
    let checked = first.check(&entry, None);
    let checked = second.check(&entry, checked).unwrap();
    assert_eq!(checked.len(), 1);
    assert_eq!(checked.entry().message, "warned");
}

#[test]
fn nop_core_admits_nothing() {
    let core: Arc<dyn Core> = Arc::new(NopCore);
    for level in Level::ALL {
        assert!(!core.enabled(level));
        assert!(Arc::clone(&core).check(&Entry::new(level, "x"), None).is_none());
    }
    assert!(Arc::ptr_eq(&tee(vec![Arc::clone(&core)]), &core));
}

#[test]
fn write_collects_all_failures() {
    let healthy = RecordingCore::new(Level::Debug);
    let cores: Vec<Arc<dyn Core>> = vec![
        Arc::new(RecordingCore::failing(Level::Debug, "disk full")),
        Arc::new(healthy.clone()),
        Arc::new(RecordingCore::failing(Level::Debug, "socket closed")),
    ];
    let core = tee(cores);

    let err = Logger::new(core).error("boom", &[]).unwrap_err();
    assert!(matches!(err, Error::Multiple(ref errors) if errors.len() == 2));
    assert_eq!(err.to_string(), "disk full; socket closed");
    assert_eq!(healthy.messages(), vec!["boom"]);
}

#[test]
fn single_failure_is_not_wrapped() {
    let failing: Arc<dyn Core> = Arc::new(RecordingCore::failing(Level::Debug, "nope"));
    let core = tee(vec![failing]);
    let err = core.sync().unwrap_err();
    assert!(matches!(err, Error::Backend(_)));
    assert_eq!(err.to_string(), "nope");
}

#[test]
fn logger_binds_fields_and_name() {
    let recorder = RecordingCore::new(Level::Debug);
    let logger = Logger::new(Arc::new(recorder.clone())).named("http");
    let request_logger = logger.with(&[Field::new("request_id", "abc")]);

    request_logger
        .info("handled", &[Field::new("status", 200)])
        .unwrap();
    logger.debug("idle", &[]).unwrap();

    assert_eq!(recorder.keys(0), vec!["request_id", "status"]);
    assert!(recorder.keys(1).is_empty());
    let written = recorder.written.lock().unwrap();
    assert_eq!(written[0].0.logger_name.as_deref(), Some("http"));
}

#[test]
fn error_fields_expose_the_error() {
    let field = Field::error(std::io::Error::new(std::io::ErrorKind::Other, "broken pipe"));
    assert_eq!(field.key, "error");
    assert_eq!(field.as_error().unwrap().to_string(), "broken pipe");
    assert!(Field::new("n", 1).as_error().is_none());
    assert_eq!(field.value.to_string(), "broken pipe");
}
