// crates/skycast-core/src/weather.rs

//! Provider payload (weatherapi.com `forecast.json`) and its parser.
//!
//! Only the fields the widget shows are modelled; everything else in the
//! body is ignored. A missing modelled field, or a forecast without today's
//! entry, makes the whole response malformed.

use crate::error::ProviderError;
use serde::{Deserialize, Serialize};

/// Error code weatherapi.com uses for "No matching location found."
pub const PROVIDER_NOT_FOUND_CODE: u32 = 1006;

/// Complete provider response for one city at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: Current,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub condition: Condition,
    pub humidity: u8,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub is_day: u8,
    pub last_updated: String,
}

impl Current {
    pub fn is_daytime(&self) -> bool {
        self.is_day == 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub astro: Astro,
    pub day: DaySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub avgtemp_c: f64,
    pub maxwind_kph: f64,
}

impl WeatherSnapshot {
    /// Today's forecast entry. Always present on a parsed snapshot.
    pub fn today(&self) -> Option<&ForecastDay> {
        self.forecast.forecastday.first()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: u32,
    message: String,
}

/// Turns an HTTP status and body into a snapshot or a [`ProviderError`].
///
/// Shared by the native HTTP provider and the browser host, which performs
/// the request itself and passes the raw response in.
pub fn parse_response(status: u16, body: &str) -> Result<WeatherSnapshot, ProviderError> {
    if !(200..300).contains(&status) {
        return Err(match serde_json::from_str::<ErrorBody>(body) {
            Ok(e) if e.error.code == PROVIDER_NOT_FOUND_CODE => ProviderError::NotFound,
            Ok(e) => ProviderError::Status {
                status,
                message: e.error.message,
            },
            Err(_) => ProviderError::Status {
                status,
                message: body.chars().take(200).collect(),
            },
        });
    }

    let snapshot: WeatherSnapshot =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

    if snapshot.today().is_none() {
        return Err(ProviderError::Malformed("forecast has no days".into()));
    }
    Ok(snapshot)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn parses_full_payload() {
        let snapshot = parse_response(200, &forecast_json("Tokyo")).unwrap();
        assert_eq!(snapshot.location.name, "Tokyo");
        assert_eq!(snapshot.location.country, "Japan");
        assert_eq!(snapshot.current.humidity, 56);
        assert!(snapshot.current.is_daytime());
        assert_eq!(snapshot.current.condition.text, "Partly cloudy");
        let today = snapshot.today().unwrap();
        assert_eq!(today.astro.sunset, "06:29 PM");
        assert_eq!(today.day.maxwind_kph, 19.8);
    }

    #[test]
    fn not_found_code_maps_to_not_found() {
        assert_eq!(
            parse_response(400, NOT_FOUND_BODY),
            Err(ProviderError::NotFound)
        );
    }

    #[test]
    fn other_error_bodies_keep_status_and_message() {
        let body = r#"{"error":{"code":2006,"message":"API key is invalid."}}"#;
        assert_eq!(
            parse_response(401, body),
            Err(ProviderError::Status {
                status: 401,
                message: "API key is invalid.".into()
            })
        );
    }

    #[test]
    fn non_json_error_body_is_a_status_error() {
        let err = parse_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ProviderError::Status { status: 502, .. }));
    }

    #[test]
    fn missing_field_is_malformed() {
        let body = forecast_json("Tokyo").replace(r#""humidity": 56"#, r#""pressure_mb": 1012"#);
        assert!(matches!(
            parse_response(200, &body),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn empty_forecast_is_malformed() {
        let body = r#"{
            "location": {"name": "X", "region": "", "country": "Y"},
            "current": {"temp_c": 1, "feelslike_c": 1, "condition": {"text": "", "icon": ""},
                        "humidity": 1, "wind_kph": 1, "wind_dir": "N", "is_day": 0,
                        "last_updated": ""},
            "forecast": {"forecastday": []}
        }"#;
        assert!(matches!(
            parse_response(200, body),
            Err(ProviderError::Malformed(_))
        ));
    }
}
