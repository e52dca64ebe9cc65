// crates/skycast-core/src/index.rs

//! # City Index
//!
//! Read-only, preprocessed view over the static city dataset. Folding and
//! tokenizing happen once here so that every keystroke only pays for the
//! distance computation in [`crate::matcher`].

use crate::matcher::{FuzzyMatcher, Match};
use crate::model::{City, CityId};
use crate::text::{fold_key, token_starts};
use std::collections::HashSet;

/// One searchable field of an entry, folded and tokenized.
#[derive(Debug, Clone)]
pub(crate) struct FieldKey {
    pub(crate) chars: Vec<char>,
    pub(crate) tokens: Vec<usize>,
}

impl FieldKey {
    pub(crate) fn new(raw: &str) -> Self {
        let chars: Vec<char> = fold_key(raw).chars().collect();
        let tokens = token_starts(&chars);
        Self { chars, tokens }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct IndexEntry {
    pub(crate) city: City,
    pub(crate) name: FieldKey,
    pub(crate) id: FieldKey,
}

/// Immutable index over all known cities, one entry per city, in dataset order.
#[derive(Debug, Clone, Default)]
pub struct CityIndex {
    entries: Vec<IndexEntry>,
}

impl CityIndex {
    /// Builds the index. Deterministic; an empty input yields an empty index.
    ///
    /// If two records share an id, the first one wins and the rest are
    /// dropped, so lookups by id stay unambiguous.
    pub fn build(cities: impl IntoIterator<Item = City>) -> Self {
        let mut seen: HashSet<CityId> = HashSet::new();
        let mut entries = Vec::new();

        for city in cities {
            if !seen.insert(city.id.clone()) {
                tracing::warn!(id = %city.id, name = %city.name, "duplicate city id, keeping first");
                continue;
            }
            entries.push(IndexEntry {
                name: FieldKey::new(&city.name),
                id: FieldKey::new(city.id.as_str()),
                city,
            });
        }

        tracing::info!(cities = entries.len(), "city index built");
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All cities in dataset order.
    pub fn cities(&self) -> impl Iterator<Item = &City> + '_ {
        self.entries.iter().map(|e| &e.city)
    }

    pub fn get(&self, id: &CityId) -> Option<&City> {
        self.cities().find(|c| &c.id == id)
    }

    /// Ranked approximate matches using the default [`FuzzyMatcher`].
    pub fn search(&self, query: &str) -> Vec<Match<'_>> {
        FuzzyMatcher::default().rank(self, query)
    }

    pub(crate) fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }
}
