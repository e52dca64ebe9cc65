// crates/skycast-core/src/provider.rs

//! The seam between the fetch controller and whoever performs HTTP.
//!
//! Native hosts use [`HttpProvider`] (blocking `reqwest`, feature `http`).
//! The browser host runs `fetch()` in JavaScript and feeds the raw response
//! through [`crate::weather::parse_response`] instead.

use crate::error::ProviderError;
use crate::fetch::FetchRequest;
use crate::weather::WeatherSnapshot;

pub trait WeatherProvider {
    /// Performs one attempt. No retries.
    fn fetch(&self, request: &FetchRequest) -> Result<WeatherSnapshot, ProviderError>;
}

#[cfg(feature = "http")]
pub use http::HttpProvider;

#[cfg(feature = "http")]
mod http {
    use super::*;
    use crate::config::WeatherConfig;
    use crate::weather::parse_response;
    use reqwest::blocking::Client;

    /// Blocking HTTP provider.
    #[derive(Debug, Clone)]
    pub struct HttpProvider {
        client: Client,
    }

    impl HttpProvider {
        pub fn new(config: &WeatherConfig) -> Result<Self, ProviderError> {
            let client = Client::builder()
                .timeout(config.timeout())
                .build()
                .map_err(|e| ProviderError::Network(e.to_string()))?;
            Ok(Self { client })
        }
    }

    impl WeatherProvider for HttpProvider {
        fn fetch(&self, request: &FetchRequest) -> Result<WeatherSnapshot, ProviderError> {
            let response = self
                .client
                .get(request.url.clone())
                .send()
                .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

            parse_response(status, &body)
        }
    }

}
