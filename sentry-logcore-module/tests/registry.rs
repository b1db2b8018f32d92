
use std::sync::Arc;

use logcore::{Context, Error, Logger, Registry};
use sentry::test::TestTransport;
use sentry_logcore_module::{register, ProvisionOptions, MODULE_ID};

fn registry() -> Registry {
    let mut registry = Registry::new();
    register(&mut registry).unwrap();
    registry
}

#[test]
fn loads_from_configuration() {
    let transport = TestTransport::new();
    let ctx = Context::new().with(ProvisionOptions::with_transport(Arc::new(
        transport.clone(),
    )));

    let loaded = registry()
        .load_core(
            serde_json::json!({
                "module": "sentry",
                "dsn": shared::DSN,
                "tags": { "service": "gateway" },
            }),
            &ctx,
        )
        .unwrap();
    assert_eq!(loaded.id(), MODULE_ID);

    Logger::new(loaded.core())
        .error("cannot bind :443", &[])
        .unwrap();
    loaded.cleanup().unwrap();

    let events = shared::captured_events(&transport);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].tags["service"], "gateway");
}

#[test]
fn failed_provisioning_yields_no_core() {
    let err = registry()
        .load_core(
            serde_json::json!({ "module": "sentry", "dsn": "nope" }),
            &Context::new(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Provision(_)));
}

#[test]
fn malformed_configuration_is_a_decode_error() {
    let err = registry()
        .load_core(
            serde_json::json!({ "module": "sentry", "traces_sample_rate": "high" }),
            &Context::new(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn registers_once() {
    let mut registry = registry();
    assert_eq!(registry.ids().collect::<Vec<_>>(), vec![MODULE_ID]);
    assert!(matches!(
        register(&mut registry),
        Err(Error::DuplicateModule(id)) if id == "logging.cores.sentry"
    ));
}
