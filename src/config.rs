//! Configuration types.
//!
//! Everything is read once at startup into a [`PlannerConfig`] that is passed
//! down explicitly. The API key is the only required value.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL, LlmConfig};

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const MODEL_VAR: &str = "PLANNER_MODEL";
pub const BASE_URL_VAR: &str = "GROQ_BASE_URL";
pub const TIMEOUT_VAR: &str = "PLANNER_TIMEOUT_SECS";
pub const TEMPERATURE_VAR: &str = "PLANNER_TEMPERATURE";
pub const BIND_VAR: &str = "PLANNER_BIND";

/// Default listen address for the web form.
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Planner configuration.
#[derive(Debug)]
pub struct PlannerConfig {
    /// Model access, shared read-only by all three stage agents.
    pub llm: LlmConfig,
    /// Address the web shell listens on.
    pub bind: SocketAddr,
}

impl PlannerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR)
            .ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_VAR.to_string()))?;

        let model = get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: TIMEOUT_VAR.to_string(),
                    message: format!("expected whole seconds, got {raw:?}"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: TIMEOUT_VAR.to_string(),
                        message: "must be at least 1 second; unset it for no timeout".to_string(),
                    });
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let temperature = match get(TEMPERATURE_VAR) {
            Some(raw) => {
                let value: f32 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: TEMPERATURE_VAR.to_string(),
                    message: format!("expected a number, got {raw:?}"),
                })?;
                if !(0.0..=2.0).contains(&value) {
                    return Err(ConfigError::InvalidValue {
                        key: TEMPERATURE_VAR.to_string(),
                        message: format!("{value} is outside 0.0..=2.0"),
                    });
                }
                Some(value)
            }
            None => None,
        };

        let bind_raw = get(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: BIND_VAR.to_string(),
            message: format!("not a socket address: {bind_raw:?}"),
        })?;

        Ok(Self {
            llm: LlmConfig {
                api_key: secrecy::SecretString::from(api_key),
                model,
                base_url,
                timeout,
                temperature,
            },
            bind,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = PlannerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == API_KEY_VAR));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let err = PlannerConfig::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn defaults_apply() {
        let config = PlannerConfig::from_lookup(lookup(&[(API_KEY_VAR, "gsk-1")])).unwrap();
        assert_eq!(config.llm.api_key.expose_secret(), "gsk-1");
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.base_url, DEFAULT_BASE_URL);
        assert!(config.llm.timeout.is_none());
        assert!(config.llm.temperature.is_none());
        assert_eq!(config.bind, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn overrides_apply() {
        let config = PlannerConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "gsk-1"),
            (MODEL_VAR, "llama-3.3-70b-versatile"),
            (BASE_URL_VAR, "http://localhost:9000/v1"),
            (TIMEOUT_VAR, "45"),
            (TEMPERATURE_VAR, "0.4"),
            (BIND_VAR, "0.0.0.0:9090"),
        ]))
        .unwrap();
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.llm.base_url, "http://localhost:9000/v1");
        assert_eq!(config.llm.timeout, Some(Duration::from_secs(45)));
        assert_eq!(config.llm.temperature, Some(0.4));
        assert_eq!(config.bind.port(), 9090);
    }

    fn rejected_key(pairs: &[(&str, &str)]) -> Option<String> {
        match PlannerConfig::from_lookup(lookup(pairs)) {
            Err(ConfigError::InvalidValue { key, .. }) => Some(key),
            _ => None,
        }
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_timeout = rejected_key(&[(API_KEY_VAR, "k"), (TIMEOUT_VAR, "soon")]);
        assert_eq!(bad_timeout.as_deref(), Some(TIMEOUT_VAR));

        let hot = rejected_key(&[(API_KEY_VAR, "k"), (TEMPERATURE_VAR, "3")]);
        assert_eq!(hot.as_deref(), Some(TEMPERATURE_VAR));

        let bad_bind = rejected_key(&[(API_KEY_VAR, "k"), (BIND_VAR, "nowhere")]);
        assert_eq!(bad_bind.as_deref(), Some(BIND_VAR));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let zero = rejected_key(&[(API_KEY_VAR, "k"), (TIMEOUT_VAR, "0")]);
        assert_eq!(zero.as_deref(), Some(TIMEOUT_VAR));

        let one = PlannerConfig::from_lookup(lookup(&[(API_KEY_VAR, "k"), (TIMEOUT_VAR, "1")]));
        assert_eq!(one.unwrap().llm.timeout, Some(Duration::from_secs(1)));
    }
}
