//! Occurrence and search-result types.

use serde::{Deserialize, Serialize};

use ostinato_core::model::{Pattern, Point, Provenance, Translation};
use ostinato_core::Result;

/// One realized correspondence between a pattern point and a dataset point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correspondence {
    /// Index of the matched point in the pattern.
    pub pattern_index: usize,

    /// Index of the witnessing point in the searched point set.
    pub point_set_index: usize,

    /// The witnessing dataset point, with all of its dimensions.
    pub point: Point,
}

/// A translation at which the pattern, or enough of it, occurs in the
/// searched point set.
///
/// Occurrences are immutable and owned by the [`SearchResult`] that contains
/// them. No two occurrences in one result share a translation vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    translation: Translation,
    correspondences: Vec<Correspondence>,
    exact: bool,
}

impl Occurrence {
    pub(crate) fn new(
        translation: Translation,
        correspondences: Vec<Correspondence>,
        exact: bool,
    ) -> Self {
        Self {
            translation,
            correspondences,
            exact,
        }
    }

    /// The translation vector mapping the pattern onto this occurrence.
    #[must_use]
    pub fn translation(&self) -> &Translation {
        &self.translation
    }

    /// How many pattern points were matched.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.correspondences.len()
    }

    /// True if every point of the pattern was matched.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// The realized correspondences, sorted by pattern index.
    #[must_use]
    pub fn correspondences(&self) -> &[Correspondence] {
        &self.correspondences
    }

    /// The matched dataset points, in pattern-index order.
    pub fn matched_points(&self) -> impl Iterator<Item = &Point> {
        self.correspondences.iter().map(|c| &c.point)
    }

    /// The dataset index of the first matched point, used as an ordering
    /// tie-breaker.
    pub(crate) fn first_matched_index(&self) -> usize {
        self.correspondences
            .first()
            .map_or(0, |c| c.point_set_index)
    }

    /// Materializes this occurrence as a pattern of the matched dataset
    /// points, tagged as algorithmically discovered.
    ///
    /// # Errors
    ///
    /// Propagates construction errors from [`Pattern::new`]; with at least
    /// one correspondence present this does not occur in practice.
    pub fn to_pattern(&self, label: impl Into<String>) -> Result<Pattern> {
        Pattern::new(
            self.matched_points().cloned().collect(),
            label,
            Provenance::Discovered,
        )
    }
}

/// The outcome of one pattern search: the query, the searched piece's name,
/// and every occurrence found, in deterministic order.
///
/// Occurrences are sorted by translation vector (primary dimension first,
/// then secondary), ties broken by first-matched dataset index. A result is
/// read-only once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pattern: Pattern,
    piece_name: Option<String>,
    min_match_size: usize,
    occurrences: Vec<Occurrence>,
}

impl SearchResult {
    pub(crate) fn new(
        pattern: Pattern,
        piece_name: Option<String>,
        min_match_size: usize,
        occurrences: Vec<Occurrence>,
    ) -> Self {
        Self {
            pattern,
            piece_name,
            min_match_size,
            occurrences,
        }
    }

    /// The query pattern this result answers.
    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The name of the searched piece, if the point set carried one.
    #[must_use]
    pub fn piece_name(&self) -> Option<&str> {
        self.piece_name.as_deref()
    }

    /// The minimum-match-size policy the search ran under.
    #[must_use]
    pub fn min_match_size(&self) -> usize {
        self.min_match_size
    }

    /// All occurrences, in deterministic order.
    #[must_use]
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// The number of occurrences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Occurrence> {
        self.occurrences.iter()
    }

    /// Only the occurrences matching the full pattern.
    pub fn exact_occurrences(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter().filter(|o| o.is_exact())
    }

    /// Materializes every occurrence as a pattern of matched dataset points,
    /// labeled like the query and tagged as discovered.
    ///
    /// # Errors
    ///
    /// Propagates construction errors from [`Pattern::new`]; occurrences
    /// always hold at least one point, so this does not occur in practice.
    pub fn occurrences_as_patterns(&self) -> Result<Vec<Pattern>> {
        self.occurrences
            .iter()
            .map(|o| o.to_pattern(self.pattern.label()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SearchResult {
    type Item = &'a Occurrence;
    type IntoIter = std::slice::Iter<'a, Occurrence>;

    fn into_iter(self) -> Self::IntoIter {
        self.occurrences.iter()
    }
}
