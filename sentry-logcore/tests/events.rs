
use std::io;
use std::sync::Arc;

use logcore::{Caller, Core, Entry, Field, Level, Logger};
use sentry_logcore::CoreConfig;

#[test]
fn error_entries_are_captured_as_events() {
    let (core, transport) = shared::sentry_core(CoreConfig::default());

    let entry = Entry::new(Level::Error, "upstream unreachable")
        .with_logger_name("http.handlers.reverse_proxy")
        .with_caller(Caller {
            file: "proxy.rs".into(),
            line: 42,
            function: None,
        });
    core.write(&entry, &[Field::new("upstream", "10.0.0.1:8080"), Field::new("attempt", 3)])
        .unwrap();

    let events = shared::captured_events(&transport);
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.message.as_deref(), Some("upstream unreachable"));
    assert_eq!(event.level, sentry::Level::Error);
    assert_eq!(event.logger.as_deref(), Some("http.handlers.reverse_proxy"));
    assert_eq!(event.extra["upstream"], serde_json::json!("10.0.0.1:8080"));
    assert_eq!(event.extra["attempt"], serde_json::json!(3));
    assert_eq!(event.extra["caller"], serde_json::json!("proxy.rs:42"));
}

#[test]
fn entries_below_the_threshold_are_dropped() {
    let (core, transport) = shared::sentry_core(CoreConfig::default());

    for level in [Level::Debug, Level::Info, Level::Warn] {
        assert!(!core.enabled(level));
        assert!(Arc::clone(&core)
            .check(&Entry::new(level, "quiet"), None)
            .is_none());
    }
    for level in [Level::Error, Level::DPanic, Level::Panic, Level::Fatal] {
        assert!(core.enabled(level));
    }

    Logger::new(core).warn("not reported", &[]).unwrap();
    assert!(shared::captured_events(&transport).is_empty());
}

#[test]
fn error_fields_become_exceptions() {
    let (core, transport) = shared::sentry_core(CoreConfig::default());

    let err = io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe");
    Logger::new(core)
        .error("write failed", &[Field::error(err)])
        .unwrap();

    let events = shared::captured_events(&transport);
    assert_eq!(events.len(), 1);
    let exception = &events[0].exception;
    assert_eq!(exception.len(), 1);
    assert_eq!(exception[0].value.as_deref(), Some("broken pipe"));
    assert_eq!(events[0].extra["error"], serde_json::json!("broken pipe"));
}

#[test]
fn with_binds_fields_without_touching_the_receiver() {
    let (core, transport) = shared::sentry_core(CoreConfig::default());
    let bound = core.with(&[Field::new("tenant", "acme")]);

    bound
        .write(&Entry::new(Level::Error, "bound"), &[Field::new("n", 1)])
        .unwrap();
    core.write(&Entry::new(Level::Error, "unbound"), &[]).unwrap();

    let events = shared::captured_events(&transport);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].extra["tenant"], serde_json::json!("acme"));
    assert_eq!(events[0].extra["n"], serde_json::json!(1));
    assert!(events[1].extra.is_empty());
}

#[test]
fn fatal_entries_flush_the_client() {
    let (core, transport) = shared::counting_core(CoreConfig::default());

    core.write(&Entry::new(Level::Error, "plain error"), &[])
        .unwrap();
    assert_eq!(transport.flushes(), 0);

    core.write(&Entry::new(Level::Fatal, "going down"), &[])
        .unwrap();
    assert_eq!(transport.flushes(), 1);

    core.sync().unwrap();
    assert_eq!(transport.flushes(), 2);
}
