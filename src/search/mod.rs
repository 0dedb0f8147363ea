//! Fuzzy namespace search
//!
//! Builds an index over the namespaces of a snapshot and ranks them against
//! free-text operator input. The index is rebuilt only when the snapshot is
//! replaced; searching re-runs on every query change.

mod distance;

pub use distance::{FuzzyMatcher, SubstringEditDistance};

use crate::models::Waybill;
use std::cmp::Ordering;

/// Default tolerance: at most ~1 edit per 3 query characters
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Search tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Highest normalized distance (edits / query length) still considered a match
    pub threshold: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// A matched entry, pointing back into the indexed slice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Position of the Waybill in the indexed slice
    pub index: usize,
    /// Edit distance between the query and the closest part of the namespace
    pub distance: usize,
    /// `distance / query length`, in `[0, 1]`
    pub score: f64,
}

/// How the query relates to the namespace; earlier variants rank higher
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchClass {
    Exact,
    Prefix,
    Approximate,
}

struct Ranked {
    hit: SearchHit,
    class: MatchClass,
    key_len: usize,
}

/// Searchable index over Waybill namespaces
pub struct FuzzyIndex<M: FuzzyMatcher = SubstringEditDistance> {
    keys: Vec<Vec<char>>,
    options: SearchOptions,
    matcher: M,
}

impl FuzzyIndex {
    /// Index `waybills` using the default edit-distance matcher
    pub fn build(waybills: &[Waybill], options: SearchOptions) -> Self {
        Self::with_matcher(waybills, options, SubstringEditDistance)
    }
}

impl<M: FuzzyMatcher> FuzzyIndex<M> {
    /// Index `waybills` with a custom matcher
    pub fn with_matcher(waybills: &[Waybill], options: SearchOptions, matcher: M) -> Self {
        let keys = waybills
            .iter()
            .map(|wb| wb.namespace().to_lowercase().chars().collect())
            .collect();

        Self {
            keys,
            options,
            matcher,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Rank the indexed namespaces against `query`
    ///
    /// An empty (or whitespace-only) query returns every entry in its
    /// original order. Otherwise entries within the threshold are returned
    /// best first, ordered by distance, then exact/prefix/other, then
    /// namespace length, then original position.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let query: Vec<char> = query.trim().to_lowercase().chars().collect();

        if query.is_empty() {
            return (0..self.keys.len())
                .map(|index| SearchHit {
                    index,
                    distance: 0,
                    score: 0.0,
                })
                .collect();
        }

        let mut ranked: Vec<Ranked> = self
            .keys
            .iter()
            .enumerate()
            .filter_map(|(index, key)| {
                let distance = self.matcher.distance(&query, key);
                let score = distance as f64 / query.len() as f64;
                if score > self.options.threshold {
                    return None;
                }
                Some(Ranked {
                    hit: SearchHit {
                        index,
                        distance,
                        score,
                    },
                    class: match_class(&query, key),
                    key_len: key.len(),
                })
            })
            .collect();

        ranked.sort_by(compare_ranked);
        ranked.into_iter().map(|r| r.hit).collect()
    }
}

fn match_class(query: &[char], key: &[char]) -> MatchClass {
    if key == query {
        MatchClass::Exact
    } else if key.starts_with(query) {
        MatchClass::Prefix
    } else {
        MatchClass::Approximate
    }
}

fn compare_ranked(a: &Ranked, b: &Ranked) -> Ordering {
    a.hit
        .distance
        .cmp(&b.hit.distance)
        .then(a.class.cmp(&b.class))
        .then(a.key_len.cmp(&b.key_len))
        .then(a.hit.index.cmp(&b.hit.index))
}

/// One-shot search over a slice of Waybills
pub fn search<'a>(waybills: &'a [Waybill], query: &str, options: &SearchOptions) -> Vec<&'a Waybill> {
    FuzzyIndex::build(waybills, *options)
        .search(query)
        .into_iter()
        .map(|hit| &waybills[hit.index])
        .collect()
}
