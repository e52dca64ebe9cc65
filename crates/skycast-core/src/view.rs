// crates/skycast-core/src/view.rs

//! Plain-data view of the widget, ready for any renderer.
//!
//! Everything here is a pure function of the widget state; the browser host
//! serializes a [`View`] to JS after every event.

use crate::fetch::FetchState;
use crate::model::CityId;
use crate::session::SuggestionState;
use crate::weather::{ForecastDay, WeatherSnapshot};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub query: String,
    /// Focus-driven visibility of the suggestion list.
    pub visible: bool,
    pub state: SuggestionState,
    pub suggestions: Vec<SuggestionView>,
    /// A lookup is in flight; the submit control should be disabled.
    pub pending: bool,
    pub error: Option<String>,
    pub weather: Option<WeatherCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionView {
    pub id: CityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherCard {
    pub location: String,
    /// "region, country"
    pub region: String,
    pub temperature: String,
    pub feels_like: String,
    pub condition: String,
    pub icon: String,
    pub humidity: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub daytime: bool,
    pub last_updated: String,
    pub forecast: Option<ForecastCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastCard {
    pub date: String,
    pub sunrise: String,
    pub sunset: String,
    pub max_temperature: String,
    pub min_temperature: String,
    pub avg_temperature: String,
    pub max_wind: String,
}

impl WeatherCard {
    pub fn from_snapshot(s: &WeatherSnapshot) -> Self {
        let current = &s.current;
        Self {
            location: s.location.name.clone(),
            region: format!("{}, {}", s.location.region, s.location.country),
            temperature: celsius(current.temp_c),
            feels_like: celsius(current.feelslike_c),
            condition: current.condition.text.clone(),
            icon: icon_url(&current.condition.icon),
            humidity: format!("{}%", current.humidity),
            wind_speed: kph(current.wind_kph),
            wind_direction: describe_wind_direction(&current.wind_dir)
                .unwrap_or("Unknown")
                .to_owned(),
            daytime: current.is_daytime(),
            last_updated: current.last_updated.clone(),
            forecast: s.today().map(ForecastCard::from_day),
        }
    }
}

impl ForecastCard {
    pub fn from_day(day: &ForecastDay) -> Self {
        Self {
            date: day.date.clone(),
            sunrise: day.astro.sunrise.clone(),
            sunset: day.astro.sunset.clone(),
            max_temperature: celsius(day.day.maxtemp_c),
            min_temperature: celsius(day.day.mintemp_c),
            avg_temperature: celsius(day.day.avgtemp_c),
            max_wind: kph(day.day.maxwind_kph),
        }
    }
}

/// Weather fields of the view for a given fetch state.
pub(crate) fn weather_parts(state: &FetchState) -> (bool, Option<String>, Option<WeatherCard>) {
    match state {
        FetchState::Idle => (false, None, None),
        FetchState::Pending { .. } => (true, None, None),
        FetchState::Success(s) => (false, None, Some(WeatherCard::from_snapshot(s))),
        FetchState::Failure(e) => (false, Some(e.message().to_owned()), None),
    }
}

/// Long name and bearing for a 16-point compass code.
pub fn describe_wind_direction(code: &str) -> Option<&'static str> {
    Some(match code.trim().to_ascii_uppercase().as_str() {
        "N" => "North (0°)",
        "NNE" => "North-Northeast (22.5°)",
        "NE" => "Northeast (45°)",
        "ENE" => "East-Northeast (67.5°)",
        "E" => "East (90°)",
        "ESE" => "East-Southeast (112.5°)",
        "SE" => "Southeast (135°)",
        "SSE" => "South-Southeast (157.5°)",
        "S" => "South (180°)",
        "SSW" => "South-Southwest (202.5°)",
        "SW" => "Southwest (225°)",
        "WSW" => "West-Southwest (247.5°)",
        "W" => "West (270°)",
        "WNW" => "West-Northwest (292.5°)",
        "NW" => "Northwest (315°)",
        "NNW" => "North-Northwest (337.5°)",
        _ => return None,
    })
}

fn celsius(v: f64) -> String {
    format!("{v} °C")
}

fn kph(v: f64) -> String {
    format!("{v} Km/h")
}

// the provider sends protocol-relative icon URLs
fn icon_url(icon: &str) -> String {
    match icon.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => icon.to_owned(),
    }
}
