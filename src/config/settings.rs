use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::config::ConfigError;
use crate::types::Currency;

const DISPATCH_INTERVAL_MS: &str = "DONATION_DISPATCH_INTERVAL_MS";
const CURRENCY: &str = "DONATION_CURRENCY";
const BACKPRESSURE: &str = "DONATION_BACKPRESSURE";
const PUBLIC_KEY: &str = "OMISE_PUBLIC_KEY";
const SECRET_KEY: &str = "OMISE_SECRET_KEY";
const VAULT_URL: &str = "OMISE_VAULT_URL";
const API_URL: &str = "OMISE_API_URL";
const TIMEOUT_SECS: &str = "OMISE_TIMEOUT_SECS";

/// Settings for the dispatch pipeline.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum time between two dispatches.
    pub dispatch_interval: Duration,
    pub currency: Currency,
    /// Capacity of the channel between the record reader and the dispatcher.
    pub backpressure: usize
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dispatch_interval: Duration::from_millis(150),
            currency: "thb".to_string(),
            backpressure: 256
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let dispatch_interval = parse_optional::<u64, _>(&lookup, DISPATCH_INTERVAL_MS)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.dispatch_interval);

        let currency = lookup(CURRENCY)
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.currency);

        let backpressure = match parse_optional::<usize, _>(&lookup, BACKPRESSURE)? {
            Some(0) => return Err(ConfigError::InvalidValue { key: BACKPRESSURE, value: "0".to_string() }),
            Some(capacity) => capacity,
            None => defaults.backpressure
        };

        Ok(Self { dispatch_interval, currency, backpressure })
    }
}

/// Credentials and endpoints for the Omise gateway.
#[derive(Clone)]
pub struct GatewayConfig {
    pub public_key: String,
    pub secret_key: String,
    pub vault_url: String,
    pub api_url: String,
    pub request_timeout: Duration
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let request_timeout = parse_optional::<u64, _>(&lookup, TIMEOUT_SECS)?
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            public_key: required(PUBLIC_KEY)?,
            secret_key: required(SECRET_KEY)?,
            vault_url: lookup(VAULT_URL).unwrap_or_else(|| "https://vault.omise.co".to_string()),
            api_url: lookup(API_URL).unwrap_or_else(|| "https://api.omise.co".to_string()),
            request_timeout
        })
    }
}

fn parse_optional<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(None)
    }
}
