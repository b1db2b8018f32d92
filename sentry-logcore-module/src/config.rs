use std::collections::BTreeMap;

use sentry::types::Dsn;
use sentry::ClientOptions;
use serde::{Deserialize, Serialize};

use crate::ProvisionError;

/// The configuration of the Sentry logging core, as decoded from JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentryConfig {
    /// Where to send events.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dsn: String,
    /// Whether performance tracing is enabled.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub enable_tracing: bool,
    /// The fraction of transactions to send when tracing is enabled.
    pub traces_sample_rate: f64,
    /// The fraction of traced transactions to profile.
    pub profiles_sample_rate: f64,
    /// Tags added to every event.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// Whether lower level entries are kept as breadcrumbs.
    ///
    /// Read from `EnableBreadcrumbs`, `enableBreadcrumbs` or
    /// `enable_breadcrumbs`. Other spellings are ignored like any unknown key.
    #[serde(
        rename = "EnableBreadcrumbs",
        alias = "enableBreadcrumbs",
        alias = "enable_breadcrumbs"
    )]
    pub enable_breadcrumbs: bool,
}

impl SentryConfig {
    /// The traces sample rate the client is created with.
    ///
    /// Disabled tracing samples nothing. Enabled tracing without an explicit
    /// rate samples everything.
    pub fn effective_traces_sample_rate(&self) -> f64 {
        if !self.enable_tracing {
            0.0
        } else if self.traces_sample_rate == 0.0 {
            1.0
        } else {
            self.traces_sample_rate
        }
    }

    /// Validates the configuration and turns it into client options.
    ///
    /// Tags are not part of the client options; they are set on the scope of
    /// the hub the client is bound to.
    pub fn client_options(&self) -> Result<ClientOptions, ProvisionError> {
        if self.dsn.trim().is_empty() {
            return Err(ProvisionError::MissingDsn);
        }
        let dsn: Dsn = self.dsn.trim().parse()?;
        check_sample_rate("traces_sample_rate", self.traces_sample_rate)?;
        check_sample_rate("profiles_sample_rate", self.profiles_sample_rate)?;

        Ok(ClientOptions {
            dsn: Some(dsn),
            traces_sample_rate: self.effective_traces_sample_rate() as f32,
            ..ClientOptions::default()
        })
    }
}

fn check_sample_rate(field: &'static str, value: f64) -> Result<(), ProvisionError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ProvisionError::SampleRate { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_all_keys() {
        let config: SentryConfig = serde_json::from_value(serde_json::json!({
            "dsn": "https://public@sentry.invalid/1",
            "enable_tracing": true,
            "traces_sample_rate": 0.25,
            "profiles_sample_rate": 0.5,
            "tags": { "region": "eu" },
            "EnableBreadcrumbs": true,
            "unknown": "ignored",
        }))
        .unwrap();

        assert_eq!(config.dsn, "https://public@sentry.invalid/1");
        assert!(config.enable_tracing);
        assert_eq!(config.traces_sample_rate, 0.25);
        assert_eq!(config.profiles_sample_rate, 0.5);
        assert_eq!(config.tags["region"], "eu");
        assert!(config.enable_breadcrumbs);
    }

    #[test]
    fn breadcrumb_key_spellings() {
        for key in ["EnableBreadcrumbs", "enableBreadcrumbs", "enable_breadcrumbs"] {
            let mut raw = serde_json::Map::new();
            raw.insert(key.to_owned(), true.into());
            let config: SentryConfig = serde_json::from_value(raw.into()).unwrap();
            assert!(config.enable_breadcrumbs, "{} was not read", key);
        }

        let config: SentryConfig =
            serde_json::from_value(serde_json::json!({ "ENABLEBREADCRUMBS": true })).unwrap();
        assert!(!config.enable_breadcrumbs);
    }

    #[test]
    fn defaults_and_breadcrumb_alias() {
        let config: SentryConfig =
            serde_json::from_value(serde_json::json!({ "enable_breadcrumbs": true })).unwrap();
        assert!(config.enable_breadcrumbs);
        assert!(config.dsn.is_empty());
        assert!(!config.enable_tracing);
        assert!(config.tags.is_empty());
    }

    #[test]
    fn traces_sample_rate_follows_tracing_switch() {
        let mut config = SentryConfig {
            traces_sample_rate: 0.3,
            ..Default::default()
        };
        assert_eq!(config.effective_traces_sample_rate(), 0.0);

        config.enable_tracing = true;
        assert_eq!(config.effective_traces_sample_rate(), 0.3);

        config.traces_sample_rate = 0.0;
        assert_eq!(config.effective_traces_sample_rate(), 1.0);
    }

    #[test]
    fn rejects_bad_values() {
        let config = SentryConfig::default();
        assert!(matches!(
            config.client_options(),
            Err(ProvisionError::MissingDsn)
        ));

        let config = SentryConfig {
            dsn: "not a dsn".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.client_options(),
            Err(ProvisionError::InvalidDsn(_))
        ));

        for value in [-0.1, 1.5, f64::NAN] {
            let config = SentryConfig {
                dsn: "https://public@sentry.invalid/1".into(),
                profiles_sample_rate: value,
                ..Default::default()
            };
            assert!(matches!(
                config.client_options(),
                Err(ProvisionError::SampleRate {
                    field: "profiles_sample_rate",
                    ..
                })
            ));
        }
    }

    #[test]
    fn builds_client_options() {
        let config = SentryConfig {
            dsn: "https://public@sentry.invalid/1".into(),
            enable_tracing: true,
            traces_sample_rate: 0.5,
            ..Default::default()
        };
        let options = config.client_options().unwrap();
        assert_eq!(options.dsn.unwrap().host(), "sentry.invalid");
        assert_eq!(options.traces_sample_rate, 0.5);
    }
}
