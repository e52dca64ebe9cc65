// crates/skycast-core/src/fetch.rs

//! # Weather Fetch Controller
//!
//! Lifecycle of the single weather lookup:
//!
//! ```text
//! Idle ──submit──▶ Pending ──resolve──▶ Success(snapshot) | Failure(error)
//!                     ▲                          │
//!                     └────────── submit ────────┘
//! ```
//!
//! Every submission gets a fresh [`Generation`]. Only a response tagged with
//! the latest generation is applied. Anything older resolves as
//! [`Resolution::Stale`] and is dropped, so a slow "London" can never
//! overwrite a newer "Paris".

use crate::config::WeatherConfig;
use crate::error::{ProviderError, SubmitError};
use crate::provider::WeatherProvider;
use crate::text::equals_folded;
use crate::weather::WeatherSnapshot;
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// The one message users see for any failed lookup.
pub const NOT_FOUND_MESSAGE: &str = "Searched city not found";

/// Monotonic tag of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Generation(u64);

impl Generation {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Generation {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

/// A request the host must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: Generation,
    pub city: String,
    pub url: Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotFound,
    Network,
    Rejected,
    Malformed,
}

impl From<&ProviderError> for FailureKind {
    fn from(e: &ProviderError) -> Self {
        match e {
            ProviderError::NotFound => FailureKind::NotFound,
            ProviderError::Network(_) => FailureKind::Network,
            ProviderError::Status { .. } => FailureKind::Rejected,
            ProviderError::Malformed(_) => FailureKind::Malformed,
        }
    }
}

/// User-facing failure. Exclusive with a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    message: String,
    kind: FailureKind,
}

impl FetchError {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }
}

impl From<&ProviderError> for FetchError {
    fn from(e: &ProviderError) -> Self {
        Self {
            message: NOT_FOUND_MESSAGE.to_owned(),
            kind: e.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Pending { generation: Generation, city: String },
    Success(WeatherSnapshot),
    Failure(FetchError),
}

/// What `resolve` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Succeeded,
    Failed,
    /// Superseded by a newer submission; discarded.
    Stale,
}

#[derive(Debug, Clone)]
pub struct WeatherFetchController {
    config: WeatherConfig,
    state: FetchState,
    latest: Generation,
}

impl WeatherFetchController {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            config,
            state: FetchState::Idle,
            latest: Generation(0),
        }
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, FetchState::Pending { .. })
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match &self.state {
            FetchState::Success(s) => Some(s),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.state {
            FetchState::Failure(e) => Some(e),
            _ => None,
        }
    }

    /// Starts a lookup. Clears any previous result.
    ///
    /// Resubmitting the city that is already in flight is refused (double
    /// click); a different city supersedes the in-flight request.
    pub fn submit(&mut self, city: &str) -> Result<FetchRequest, SubmitError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(SubmitError::EmptyCity);
        }
        if let FetchState::Pending { city: in_flight, .. } = &self.state {
            if equals_folded(in_flight, city) {
                return Err(SubmitError::AlreadyPending {
                    city: in_flight.clone(),
                });
            }
        }

        self.latest = Generation(self.latest.0 + 1);
        self.state = FetchState::Pending {
            generation: self.latest,
            city: city.to_owned(),
        };
        tracing::info!(city, generation = self.latest.0, "weather lookup submitted");

        Ok(FetchRequest {
            generation: self.latest,
            city: city.to_owned(),
            url: self.config.request_url(city),
        })
    }

    /// Applies a provider outcome, unless a newer submission exists.
    pub fn resolve(
        &mut self,
        generation: Generation,
        result: Result<WeatherSnapshot, ProviderError>,
    ) -> Resolution {
        if generation != self.latest || !self.is_pending() {
            tracing::debug!(
                generation = generation.0,
                latest = self.latest.0,
                "stale weather response discarded"
            );
            return Resolution::Stale;
        }

        match result {
            Ok(snapshot) => {
                tracing::info!(location = %snapshot.location.name, "weather lookup succeeded");
                self.state = FetchState::Success(snapshot);
                Resolution::Succeeded
            }
            Err(e) => {
                tracing::warn!(error = %e, "weather lookup failed");
                self.state = FetchState::Failure(FetchError::from(&e));
                Resolution::Failed
            }
        }
    }

    /// Blocking submit → fetch → resolve through `provider`.
    pub fn run<P: WeatherProvider + ?Sized>(
        &mut self,
        provider: &P,
        city: &str,
    ) -> Result<Resolution, SubmitError> {
        let request = self.submit(city)?;
        let result = provider.fetch(&request);
        Ok(self.resolve(request.generation, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::fixtures::forecast_json;
    use crate::weather::parse_response;

    fn controller() -> WeatherFetchController {
        WeatherFetchController::new(WeatherConfig::new("test-key").unwrap())
    }

    fn snapshot(city: &str) -> WeatherSnapshot {
        parse_response(200, &forecast_json(city)).unwrap()
    }

    #[test]
    fn starts_idle() {
        let c = controller();
        assert_eq!(c.state(), &FetchState::Idle);
        assert!(c.snapshot().is_none() && c.error().is_none());
    }

    #[test]
    fn submit_builds_request_and_goes_pending() {
        let mut c = controller();
        let req = c.submit("  Tokyo ").unwrap();
        assert_eq!(req.city, "Tokyo");
        assert_eq!(req.generation.get(), 1);
        assert!(req.url.as_str().ends_with("?key=test-key&q=Tokyo"));
        assert!(c.is_pending());
    }

    #[test]
    fn empty_city_is_rejected() {
        let mut c = controller();
        assert_eq!(c.submit("   "), Err(SubmitError::EmptyCity));
        assert_eq!(c.state(), &FetchState::Idle);
    }

    #[test]
    fn double_submit_of_same_city_is_refused() {
        let mut c = controller();
        c.submit("Tokyo").unwrap();
        assert!(matches!(
            c.submit("tokyo"),
            Err(SubmitError::AlreadyPending { .. })
        ));
    }

    #[test]
    fn success_then_failure_replace_each_other() {
        let mut c = controller();
        let req = c.submit("Tokyo").unwrap();
        assert_eq!(c.resolve(req.generation, Ok(snapshot("Tokyo"))), Resolution::Succeeded);
        assert_eq!(c.snapshot().unwrap().location.name, "Tokyo");
        assert!(c.error().is_none());

        let req = c.submit("Zzyzxville").unwrap();
        assert!(c.snapshot().is_none(), "pending clears the previous snapshot");
        assert_eq!(c.resolve(req.generation, Err(ProviderError::NotFound)), Resolution::Failed);
        assert!(c.snapshot().is_none());
        assert_eq!(c.error().unwrap().message(), NOT_FOUND_MESSAGE);
        assert_eq!(c.error().unwrap().kind(), FailureKind::NotFound);
    }

    #[test]
    fn second_success_replaces_snapshot_wholesale() {
        let mut c = controller();
        let req = c.submit("Tokyo").unwrap();
        c.resolve(req.generation, Ok(snapshot("Tokyo")));

        let mut oslo = snapshot("Oslo");
        oslo.location.region = "Oslo".into();
        oslo.location.country = "Norway".into();
        oslo.current.temp_c = -3.5;
        oslo.current.condition.text = "Light snow".into();
        oslo.current.wind_dir = "N".into();
        oslo.current.is_day = 0;
        oslo.forecast.forecastday[0].astro.sunset = "03:12 PM".into();

        let req = c.submit("Oslo").unwrap();
        assert_eq!(c.resolve(req.generation, Ok(oslo.clone())), Resolution::Succeeded);
        assert_eq!(c.snapshot(), Some(&oslo));

        let card = crate::view::WeatherCard::from_snapshot(c.snapshot().unwrap());
        assert_eq!(card, crate::view::WeatherCard::from_snapshot(&oslo));
        assert_eq!(card.region, "Oslo, Norway");
        assert_eq!(card.temperature, "-3.5 °C");
        assert_eq!(card.wind_direction, "North (0°)");
        assert_eq!(card.forecast.unwrap().sunset, "03:12 PM");
    }

    #[test]
    fn network_errors_share_the_user_message() {
        let mut c = controller();
        let req = c.submit("Paris").unwrap();
        c.resolve(req.generation, Err(ProviderError::Network("timeout".into())));
        let err = c.error().unwrap();
        assert_eq!(err.to_string(), NOT_FOUND_MESSAGE);
        assert_eq!(err.kind(), FailureKind::Network);
    }

    #[test]
    fn late_response_from_superseded_submission_is_stale() {
        let mut c = controller();
        let london = c.submit("London").unwrap();
        let paris = c.submit("Paris").unwrap();

        assert_eq!(c.resolve(paris.generation, Ok(snapshot("Paris"))), Resolution::Succeeded);
        assert_eq!(c.resolve(london.generation, Ok(snapshot("London"))), Resolution::Stale);
        assert_eq!(c.snapshot().unwrap().location.name, "Paris");
    }

    #[test]
    fn early_response_from_superseded_submission_is_stale() {
        let mut c = controller();
        let london = c.submit("London").unwrap();
        let paris = c.submit("Paris").unwrap();

        assert_eq!(c.resolve(london.generation, Err(ProviderError::NotFound)), Resolution::Stale);
        assert!(c.is_pending());
        assert_eq!(c.resolve(paris.generation, Ok(snapshot("Paris"))), Resolution::Succeeded);
    }

    #[test]
    fn duplicate_resolution_is_stale() {
        let mut c = controller();
        let req = c.submit("Oslo").unwrap();
        c.resolve(req.generation, Ok(snapshot("Oslo")));
        assert_eq!(c.resolve(req.generation, Err(ProviderError::NotFound)), Resolution::Stale);
        assert!(c.snapshot().is_some());
    }

    struct Canned(Result<WeatherSnapshot, ProviderError>);

    impl WeatherProvider for Canned {
        fn fetch(&self, _request: &FetchRequest) -> Result<WeatherSnapshot, ProviderError> {
            self.0.clone()
        }
    }

    #[test]
    fn run_drives_a_provider() {
        let mut c = controller();
        let provider = Canned(Ok(snapshot("Tokyo")));
        assert_eq!(c.run(&provider, "Tokyo"), Ok(Resolution::Succeeded));
        assert_eq!(c.run(&provider, ""), Err(SubmitError::EmptyCity));
    }
}
