// crates/skycast-core/src/session.rs

//! # Suggestion Session
//!
//! Ties the input box together: the raw query, its debounced value, the
//! focus-driven visibility flag and the ranked suggestions for the debounced
//! value.
//!
//! Visibility only changes on focus/blur. Debounce commits only change the
//! suggestions. Neither one can override the other, so a timer that fires
//! after a blur leaves the list hidden.

use crate::debounce::{DebounceController, Deadline, TimerToken, DEFAULT_DEBOUNCE};
use crate::index::CityIndex;
use crate::matcher::{FuzzyMatcher, Match};
use crate::model::City;
use serde::Serialize;
use std::time::Duration;

pub const DISPLAY_CAP: usize = 5;
pub const MIN_QUERY_LEN: usize = 1;

/// Knobs for the suggestion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestSettings {
    pub debounce: Duration,
    /// Debounced queries shorter than this (in characters, after trimming)
    /// produce no suggestions.
    pub min_query_len: usize,
    pub display_cap: usize,
    pub chars_per_typo: usize,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_query_len: MIN_QUERY_LEN,
            display_cap: DISPLAY_CAP,
            chars_per_typo: FuzzyMatcher::DEFAULT_CHARS_PER_TYPO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionState {
    Hidden,
    /// Focused, but nothing to show. Renders like `Hidden`.
    VisibleEmpty,
    VisibleWithResults,
}

#[derive(Debug, Clone)]
pub struct SuggestionSession<'a> {
    index: &'a CityIndex,
    matcher: FuzzyMatcher,
    settings: SuggestSettings,
    query: String,
    debounce: DebounceController,
    visible: bool,
    ranked: Vec<Match<'a>>,
}

impl<'a> SuggestionSession<'a> {
    pub fn new(index: &'a CityIndex, settings: SuggestSettings) -> Self {
        Self {
            index,
            matcher: FuzzyMatcher::new(settings.chars_per_typo),
            settings,
            query: String::new(),
            debounce: DebounceController::new(settings.debounce),
            visible: false,
            ranked: Vec::new(),
        }
    }

    pub fn settings(&self) -> &SuggestSettings {
        &self.settings
    }

    /// The raw input, updated on every keystroke.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The last committed (debounced) query.
    pub fn debounced(&self) -> &str {
        self.debounce.committed()
    }

    /// A keystroke. Returns the deadline the host must arm a timer for.
    pub fn input(&mut self, value: impl Into<String>, now: Duration) -> Deadline {
        self.query = value.into();
        self.debounce.on_change(self.query.clone(), now)
    }

    pub fn focus(&mut self) {
        self.visible = true;
    }

    pub fn blur(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Debounce timer expiry. Returns `true` if the suggestions were
    /// regenerated.
    pub fn fire(&mut self, token: TimerToken, now: Duration) -> bool {
        let changed = self.debounce.fire(token, now).is_some_and(|c| c.changed);
        if changed {
            self.regenerate();
        }
        changed
    }

    /// Tick-driven variant of [`fire`](Self::fire).
    pub fn poll(&mut self, now: Duration) -> bool {
        let changed = self.debounce.poll(now).is_some_and(|c| c.changed);
        if changed {
            self.regenerate();
        }
        changed
    }

    pub fn next_deadline(&self) -> Option<Deadline> {
        self.debounce.next_deadline()
    }

    /// Cancels any pending debounce commit. Call when the input goes away.
    pub fn teardown(&mut self) {
        if self.debounce.cancel() {
            tracing::debug!("pending debounce cancelled on teardown");
        }
    }

    pub fn state(&self) -> SuggestionState {
        match (self.visible, self.ranked.is_empty()) {
            (false, _) => SuggestionState::Hidden,
            (true, true) => SuggestionState::VisibleEmpty,
            (true, false) => SuggestionState::VisibleWithResults,
        }
    }

    /// Suggestions for the view: capped, and empty unless visible with results.
    pub fn suggestions(&self) -> Vec<&'a City> {
        if self.state() != SuggestionState::VisibleWithResults {
            return Vec::new();
        }
        self.ranked
            .iter()
            .take(self.settings.display_cap)
            .map(|m| m.city)
            .collect()
    }

    /// Full uncapped ranking for the current debounced query, regardless of
    /// visibility.
    pub fn ranked(&self) -> &[Match<'a>] {
        &self.ranked
    }

    fn regenerate(&mut self) {
        let debounced = self.debounce.committed().trim();
        self.ranked = if debounced.chars().count() < self.settings.min_query_len {
            Vec::new()
        } else {
            self.matcher.rank(self.index, debounced)
        };

        tracing::debug!(
            query = %debounced,
            hits = self.ranked.len(),
            "suggestions regenerated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn index() -> CityIndex {
        CityIndex::build(
            [
                "London",
                "Londonderry",
                "Long Beach",
                "Lonavala",
                "Longyearbyen",
                "Lonsdale",
                "Paris",
            ]
            .iter()
            .enumerate()
            .map(|(i, n)| City::new(format!("{i}"), *n)),
        )
    }

    fn settled<'a>(session: &mut SuggestionSession<'a>, value: &str, at: u64) -> bool {
        let deadline = session.input(value, ms(at));
        session.fire(deadline.token, deadline.at)
    }

    #[test]
    fn starts_hidden() {
        let idx = index();
        let s = SuggestionSession::new(&idx, SuggestSettings::default());
        assert_eq!(s.state(), SuggestionState::Hidden);
        assert!(s.suggestions().is_empty());
    }

    #[test]
    fn focus_without_query_is_visible_empty() {
        let idx = index();
        let mut s = SuggestionSession::new(&idx, SuggestSettings::default());
        s.focus();
        assert_eq!(s.state(), SuggestionState::VisibleEmpty);
    }

    #[test]
    fn results_are_capped_at_display_limit() {
        let idx = index();
        let mut s = SuggestionSession::new(&idx, SuggestSettings::default());
        s.focus();
        assert!(settled(&mut s, "lon", 0));

        assert_eq!(s.state(), SuggestionState::VisibleWithResults);
        assert!(s.ranked().len() > DISPLAY_CAP);
        assert_eq!(s.suggestions().len(), DISPLAY_CAP);
        assert_eq!(s.suggestions()[0].name(), "London");
    }

    #[test]
    fn raw_query_does_not_drive_suggestions() {
        let idx = index();
        let mut s = SuggestionSession::new(&idx, SuggestSettings::default());
        s.focus();
        s.input("paris", ms(0));
        assert_eq!(s.query(), "paris");
        assert_eq!(s.debounced(), "");
        assert!(s.suggestions().is_empty());
    }

    #[test]
    fn blur_hides_and_late_timer_keeps_it_hidden() {
        let idx = index();
        let mut s = SuggestionSession::new(&idx, SuggestSettings::default());
        s.focus();
        let deadline = s.input("par", ms(0));
        s.blur();

        assert!(s.fire(deadline.token, deadline.at));
        assert!(!s.is_visible());
        assert_eq!(s.state(), SuggestionState::Hidden);
        assert!(s.suggestions().is_empty());
        // results are kept for the next focus
        assert!(!s.ranked().is_empty());
        s.focus();
        assert_eq!(s.suggestions()[0].name(), "Paris");
    }

    #[test]
    fn query_without_hits_is_visible_empty() {
        let idx = index();
        let mut s = SuggestionSession::new(&idx, SuggestSettings::default());
        s.focus();
        assert!(settled(&mut s, "qqqqqqqq", 0));

        assert_eq!(s.debounced(), "qqqqqqqq");
        assert!(s.ranked().is_empty());
        assert_eq!(s.state(), SuggestionState::VisibleEmpty);
        assert!(s.suggestions().is_empty());
    }

    #[test]
    fn rapid_focus_blur_focus_ends_visible() {
        let idx = index();
        let mut s = SuggestionSession::new(&idx, SuggestSettings::default());
        s.focus();
        s.blur();
        s.focus();
        assert!(s.is_visible());
    }

    #[test]
    fn min_length_threshold_empties_list() {
        let idx = index();
        let settings = SuggestSettings {
            min_query_len: 3,
            ..SuggestSettings::default()
        };
        let mut s = SuggestionSession::new(&idx, settings);
        s.focus();
        assert!(settled(&mut s, "lo", 0));
        assert!(s.ranked().is_empty());
        assert_eq!(s.state(), SuggestionState::VisibleEmpty);
    }

    #[test]
    fn unchanged_commit_does_not_regenerate() {
        let idx = index();
        let mut s = SuggestionSession::new(&idx, SuggestSettings::default());
        assert!(settled(&mut s, "par", 0));
        assert!(!settled(&mut s, "par", 1000));
    }

    #[test]
    fn teardown_cancels_pending_commit() {
        let idx = index();
        let mut s = SuggestionSession::new(&idx, SuggestSettings::default());
        let deadline = s.input("par", ms(0));
        s.teardown();
        assert!(!s.fire(deadline.token, deadline.at));
        assert_eq!(s.debounced(), "");
        assert!(s.next_deadline().is_none());
    }

    #[test]
    fn poll_drives_session_without_timers() {
        let idx = index();
        let mut s = SuggestionSession::new(&idx, SuggestSettings::default());
        s.focus();
        s.input("p", ms(0));
        s.input("pa", ms(100));
        assert!(!s.poll(ms(500)));
        assert!(s.poll(ms(600)));
        assert_eq!(s.debounced(), "pa");
    }
}
