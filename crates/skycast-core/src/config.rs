// crates/skycast-core/src/config.rs

//! Provider configuration, validated once at startup and injected into the
//! fetch controller. Nothing reads the environment per request.

use crate::error::ConfigError;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Environment variable holding the provider API key.
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";
/// Optional override of the provider endpoint.
pub const ENDPOINT_VAR: &str = "WEATHER_API_ENDPOINT";

pub const DEFAULT_ENDPOINT: &str = "https://api.weatherapi.com/v1/forecast.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Provider API key. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: &str) -> Result<Self, ConfigError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key.to_owned()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    api_key: ApiKey,
    endpoint: Url,
    timeout: Duration,
}

impl WeatherConfig {
    pub fn new(api_key: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            endpoint: parse_endpoint(DEFAULT_ENDPOINT)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Reads [`API_KEY_VAR`] (required) and [`ENDPOINT_VAR`] (optional).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingApiKey { var: API_KEY_VAR })?;
        let config = Self::new(&key)?;
        match lookup(ENDPOINT_VAR) {
            Some(endpoint) if !endpoint.trim().is_empty() => config.with_endpoint(&endpoint),
            _ => Ok(config),
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ConfigError> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET <endpoint>?key=<API_KEY>&q=<city>`
    pub fn request_url(&self, city: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("key", self.api_key.expose())
            .append_pair("q", city);
        url
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    Url::parse(endpoint.trim()).map_err(|source| ConfigError::InvalidEndpoint {
        url: endpoint.to_owned(),
        source,
    })
}
