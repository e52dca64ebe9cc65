// crates/skycast-core/src/matcher.rs

//! # Fuzzy Matcher
//!
//! Typo-tolerant ranking of cities against a query. Both the name and the id
//! of every city are searched; a hit on either qualifies the city.
//!
//! Scoring per field
//! -----------------
//! - `typos`: edits needed to find the query *somewhere* in the field
//!   (approximate substring match, Sellers' variant of Levenshtein).
//! - `offset`: how far into its token that best match starts (0 = word start).
//! - `distance`: plain Levenshtein distance between query and whole field,
//!   so `"lon"` prefers `London` over `Londonderry`.
//!
//! [`Score`] orders lexicographically by those, then prefers name hits.
//! Sorting is stable, so equal scores keep dataset order. The matcher never
//! truncates; capping for display happens in the session.

use crate::index::{CityIndex, FieldKey, IndexEntry};
use crate::model::City;

/// Which field produced the best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Id,
}

/// Relevance of a match. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score {
    pub typos: usize,
    pub offset: usize,
    pub distance: usize,
    pub field: Field,
}

impl Score {
    /// The query equals the field exactly (after folding).
    pub fn is_exact(&self) -> bool {
        self.distance == 0
    }
}

/// A ranked candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub city: &'a City,
    pub score: Score,
    /// Position of the city in the dataset.
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatcher {
    chars_per_typo: usize,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHARS_PER_TYPO)
    }
}

impl FuzzyMatcher {
    /// One tolerated typo per this many query characters.
    pub const DEFAULT_CHARS_PER_TYPO: usize = 3;

    /// `chars_per_typo == 0` disables typo tolerance.
    pub fn new(chars_per_typo: usize) -> Self {
        Self { chars_per_typo }
    }

    pub fn typo_budget(&self, query_len: usize) -> usize {
        match self.chars_per_typo {
            0 => 0,
            n => query_len / n,
        }
    }

    /// Full ranked output, best first. Empty query → empty output.
    pub fn rank<'a>(&self, index: &'a CityIndex, query: &str) -> Vec<Match<'a>> {
        let query = FieldKey::new(query.trim());
        if query.chars.is_empty() {
            return Vec::new();
        }
        let budget = self.typo_budget(query.chars.len());

        let mut hits: Vec<Match<'a>> = index
            .entries()
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                score_entry(&query, entry, budget).map(|score| Match {
                    city: &entry.city,
                    score,
                    position,
                })
            })
            .collect();

        // stable: ties keep dataset order
        hits.sort_by(|a, b| a.score.cmp(&b.score));
        hits
    }

    /// Ranked cities without scores.
    pub fn matches<'a>(&self, index: &'a CityIndex, query: &str) -> Vec<&'a City> {
        self.rank(index, query).into_iter().map(|m| m.city).collect()
    }
}

fn score_entry(query: &FieldKey, entry: &IndexEntry, budget: usize) -> Option<Score> {
    let name = score_field(query, &entry.name, budget, Field::Name);
    let id = score_field(query, &entry.id, budget, Field::Id);
    match (name, id) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn score_field(query: &FieldKey, key: &FieldKey, budget: usize, field: Field) -> Option<Score> {
    let text = &key.chars;
    if text.is_empty() || query.chars.len() > text.len() + budget {
        return None;
    }

    let (typos, start) = approximate_substring(&query.chars, text);
    if typos > budget {
        return None;
    }

    let token = key
        .tokens
        .iter()
        .rev()
        .find(|&&t| t <= start)
        .copied()
        .unwrap_or(0);

    Some(Score {
        typos,
        offset: start - token,
        distance: strsim::generic_levenshtein(&query.chars, text),
        field,
    })
}

/// Cheapest way to align `query` with any substring of `text`.
/// Returns `(edits, start offset of the aligned substring)`.
fn approximate_substring(query: &[char], text: &[char]) -> (usize, usize) {
    let n = text.len();
    // row 0: the match may begin anywhere for free
    let mut prev: Vec<usize> = vec![0; n + 1];
    let mut prev_start: Vec<usize> = (0..=n).collect();
    let mut cur = vec![0; n + 1];
    let mut cur_start = vec![0; n + 1];

    for (i, &qc) in query.iter().enumerate() {
        cur[0] = i + 1;
        cur_start[0] = 0;
        for j in 1..=n {
            let substitute = (prev[j - 1] + usize::from(text[j - 1] != qc), prev_start[j - 1]);
            let skip_query = (prev[j] + 1, prev_start[j]);
            let skip_text = (cur[j - 1] + 1, cur_start[j - 1]);
            let (cost, start) = substitute.min(skip_query).min(skip_text);
            cur[j] = cost;
            cur_start[j] = start;
        }
        std::mem::swap(&mut prev, &mut cur);
        std::mem::swap(&mut prev_start, &mut cur_start);
    }

    prev.into_iter()
        .zip(prev_start)
        .min()
        .unwrap_or((query.len(), 0))
}
