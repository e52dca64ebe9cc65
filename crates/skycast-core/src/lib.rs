// crates/skycast-core/src/lib.rs

//! skycast-core - city suggestions and weather lookups for the skycast widget
//!
//! The crate is sans-IO: every component is a plain state machine that is
//! told the time and handed responses. Hosts (the browser bindings in
//! `skycast-wasm`, the native demos) own the timers and the HTTP calls.
//!
//! Pipeline
//! --------
//! keystroke → [`DebounceController`] → debounced query → [`FuzzyMatcher`]
//! over the [`CityIndex`] → [`SuggestionSession`] (focus gating, cap of 5)
//! → [`View`]. Independently, submit → [`WeatherFetchController`] →
//! provider → snapshot or error.
//!
//! Quick start
//! -----------
//! ```rust
//! use skycast_core::prelude::*;
//!
//! let index = CityIndex::embedded()?;
//! let hits = index.search("lodnon");
//! assert_eq!(hits[0].city.name(), "London");
//! # Ok::<(), skycast_core::SkycastError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod index;
pub mod loader; // Embedded dataset + file loading
pub mod matcher;
pub mod model;
pub mod prelude;
pub mod provider;
pub mod session;
pub mod text;
pub mod view;
pub mod weather;
pub mod widget;

// Re-exports
pub use crate::config::{ApiKey, WeatherConfig};
pub use crate::debounce::{Commit, DebounceController, Deadline, TimerToken};
pub use crate::error::{ConfigError, ProviderError, Result, SkycastError, SubmitError};
pub use crate::fetch::{
    FailureKind, FetchError, FetchRequest, FetchState, Generation, Resolution,
    WeatherFetchController,
};
pub use crate::index::CityIndex;
pub use crate::matcher::{Field, FuzzyMatcher, Match, Score};
pub use crate::model::{City, CityId};
pub use crate::provider::WeatherProvider;
#[cfg(feature = "http")]
pub use crate::provider::HttpProvider;
pub use crate::session::{SuggestSettings, SuggestionSession, SuggestionState};
pub use crate::view::{View, WeatherCard};
pub use crate::weather::{parse_response, WeatherSnapshot};
pub use crate::widget::{Effect, Event, Widget};
