// crates/skycast-core/src/widget.rs

//! # Widget
//!
//! The whole input-and-result widget as one state machine:
//! `update(event, now) -> Option<Effect>` after every event, `view()` to
//! render. The host owns timers and HTTP and reports back through events.
//!
//! ```rust
//! use skycast_core::prelude::*;
//! use std::time::Duration;
//!
//! let index = CityIndex::embedded().unwrap();
//! let config = WeatherConfig::new("demo-key").unwrap();
//! let mut widget = Widget::new(index, config, SuggestSettings::default());
//!
//! widget.update(Event::Focus, Duration::ZERO);
//! let effect = widget.update(Event::Input("lon".into()), Duration::ZERO);
//! let Some(Effect::ScheduleDebounce(deadline)) = effect else { unreachable!() };
//!
//! widget.update(Event::DebounceElapsed(deadline.token), deadline.at);
//! assert_eq!(widget.view().suggestions[0].name, "London");
//! ```

use crate::config::WeatherConfig;
use crate::debounce::{Deadline, TimerToken};
use crate::error::ProviderError;
use crate::fetch::{FetchRequest, Generation, Resolution, WeatherFetchController};
use crate::index::CityIndex;
use crate::session::{SuggestSettings, SuggestionSession};
use crate::view::{weather_parts, SuggestionView, View};
use crate::weather::WeatherSnapshot;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Event {
    Input(String),
    Focus,
    Blur,
    DebounceElapsed(TimerToken),
    Submit,
    FetchResolved {
        generation: Generation,
        result: Result<WeatherSnapshot, ProviderError>,
    },
}

/// Work the host has to do on the widget's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm a timer; on expiry send [`Event::DebounceElapsed`] with the token.
    /// Supersedes any earlier debounce timer.
    ScheduleDebounce(Deadline),
    /// Perform the request; send [`Event::FetchResolved`] with its generation.
    Fetch(FetchRequest),
}

#[derive(Debug, Clone)]
pub struct Widget<'a> {
    session: SuggestionSession<'a>,
    fetch: WeatherFetchController,
}

impl<'a> Widget<'a> {
    pub fn new(index: &'a CityIndex, config: WeatherConfig, settings: SuggestSettings) -> Self {
        Self {
            session: SuggestionSession::new(index, settings),
            fetch: WeatherFetchController::new(config),
        }
    }

    pub fn session(&self) -> &SuggestionSession<'a> {
        &self.session
    }

    pub fn fetch(&self) -> &WeatherFetchController {
        &self.fetch
    }

    pub fn update(&mut self, event: Event, now: Duration) -> Option<Effect> {
        match event {
            Event::Input(value) => Some(Effect::ScheduleDebounce(self.session.input(value, now))),
            Event::Focus => {
                self.session.focus();
                None
            }
            Event::Blur => {
                self.session.blur();
                None
            }
            Event::DebounceElapsed(token) => {
                self.session.fire(token, now);
                None
            }
            Event::Submit => match self.fetch.submit(self.session.query()) {
                Ok(request) => Some(Effect::Fetch(request)),
                Err(e) => {
                    tracing::debug!(error = %e, "submit ignored");
                    None
                }
            },
            Event::FetchResolved { generation, result } => {
                match self.fetch.resolve(generation, result) {
                    // success clears the input; failure leaves it for correction
                    Resolution::Succeeded => {
                        Some(Effect::ScheduleDebounce(self.session.input("", now)))
                    }
                    Resolution::Failed | Resolution::Stale => None,
                }
            }
        }
    }

    pub fn view(&self) -> View {
        let (pending, error, weather) = weather_parts(self.fetch.state());
        View {
            query: self.session.query().to_owned(),
            visible: self.session.is_visible(),
            state: self.session.state(),
            suggestions: self
                .session
                .suggestions()
                .into_iter()
                .map(|c| SuggestionView {
                    id: c.id.clone(),
                    name: c.name.clone(),
                })
                .collect(),
            pending,
            error,
            weather,
        }
    }

    /// Cancels pending timers. Call when the widget is unmounted.
    pub fn teardown(&mut self) {
        self.session.teardown();
    }
}
