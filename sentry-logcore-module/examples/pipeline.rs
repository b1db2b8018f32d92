use logcore::{Context, Field, Logger, Registry};

fn main() {
    pretty_env_logger::init();

    let mut registry = Registry::new();
    sentry_logcore_module::register(&mut registry).unwrap();

    let dsn = std::env::var("SENTRY_DSN")
        .unwrap_or_else(|_| "https://a94ae32be2584e0bbd7a4cbb95971fee@sentry.io/1041156".into());
    let loaded = registry
        .load_core(
            serde_json::json!({
                "module": "sentry",
                "dsn": dsn,
                "tags": { "example": "pipeline" },
                "EnableBreadcrumbs": true,
            }),
            &Context::new(),
        )
        .unwrap();

    let logger = Logger::new(loaded.core()).named("example");
    logger.debug("System is booting", &[]).unwrap();
    logger
        .info("Listening", &[Field::new("addr", "0.0.0.0:8080")])
        .unwrap();
    logger.warn("System is warning", &[]).unwrap();
    logger
        .error("Holy shit everything is on fire!", &[Field::new("retries", 3)])
        .unwrap();

    loaded.cleanup().unwrap();
}
