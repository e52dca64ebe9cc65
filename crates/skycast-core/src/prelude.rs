// crates/skycast-core/src/prelude.rs

//! Everything a host needs to drive the widget.

pub use crate::config::WeatherConfig;
pub use crate::debounce::{Deadline, TimerToken};
pub use crate::error::{ProviderError, Result, SkycastError};
pub use crate::fetch::{FetchRequest, FetchState, Generation, Resolution, WeatherFetchController};
pub use crate::index::CityIndex;
pub use crate::matcher::FuzzyMatcher;
pub use crate::model::City;
pub use crate::provider::WeatherProvider;
#[cfg(feature = "http")]
pub use crate::provider::HttpProvider;
pub use crate::session::{SuggestSettings, SuggestionSession, SuggestionState};
pub use crate::view::View;
pub use crate::weather::{parse_response, WeatherSnapshot};
pub use crate::widget::{Effect, Event, Widget};
