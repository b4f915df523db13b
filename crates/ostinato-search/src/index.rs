//! Vector index: the grouped enumeration of all pairwise translations.

use std::collections::HashMap;

use rayon::prelude::*;

use ostinato_core::model::{DimensionMask, Pattern, PointSet, Translation};
use ostinato_core::{Error, Result};

use crate::searcher::CancelCheck;

/// One retained (translation, pattern index) pair with its witness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEntry {
    /// Index into the pattern.
    pub pattern_index: usize,
    /// Smallest dataset index holding this pattern point at this translation.
    pub witness: usize,
}

/// Grouping of `pattern index → smallest witness` under construction, keyed
/// by translation vector.
type GroupBuilder = HashMap<Translation, HashMap<usize, usize>>;

/// All pairwise translations between a pattern and a point set, grouped by
/// translation vector.
///
/// For a pattern of size m and a point set of size n, the index holds the
/// m·n translations `D[j] - P[i]` projected onto the matching dimensions.
/// Each pattern index is recorded at most once per vector, so duplicate
/// points (chords, doubled voices) never inflate a vector's pattern
/// coverage; when several dataset points witness the same pattern index at
/// the same vector, the smallest dataset index is kept.
///
/// Building the index costs O(m·n) vector computations and O(m·n) expected
/// grouping work via hashing. The quadratic enumeration is the dominant cost
/// of a search and bounds practical pattern and piece sizes; no
/// approximation is attempted.
#[derive(Debug)]
pub struct VectorIndex {
    groups: HashMap<Translation, Vec<MatchEntry>>,
}

impl VectorIndex {
    /// Builds the index sequentially.
    ///
    /// The cancellation check, when supplied, runs between pattern indices,
    /// never mid-vector-computation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interrupted`] if the cancellation check reports
    /// cancellation.
    pub fn build(
        pattern: &Pattern,
        point_set: &PointSet,
        mask: &DimensionMask,
        cancel: Option<&CancelCheck>,
    ) -> Result<Self> {
        let mut builder = GroupBuilder::new();

        for (i, pattern_point) in pattern.iter().enumerate() {
            if is_cancelled(cancel) {
                return Err(Error::Interrupted);
            }
            for (j, dataset_point) in point_set.iter().enumerate() {
                let translation =
                    Translation::between_projected(pattern_point, dataset_point, mask);
                builder.entry(translation).or_default().entry(i).or_insert(j);
            }
        }

        Ok(Self::from_builder(builder))
    }

    /// Builds the index sharded over pattern indices with rayon.
    ///
    /// Per-shard groupings are merged with a deduplicating reduction that
    /// keeps the smallest witness per (translation, pattern index) pair. The
    /// merge is associative and commutative, so the result is identical to
    /// [`VectorIndex::build`] regardless of how rayon splits the work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interrupted`] if the cancellation check reports
    /// cancellation.
    pub fn build_parallel(
        pattern: &Pattern,
        point_set: &PointSet,
        mask: &DimensionMask,
        cancel: Option<&CancelCheck>,
    ) -> Result<Self> {
        let builder = (0..pattern.len())
            .into_par_iter()
            .try_fold(GroupBuilder::new, |mut acc, i| {
                if is_cancelled(cancel) {
                    return Err(Error::Interrupted);
                }
                let pattern_point = &pattern.points()[i];
                for (j, dataset_point) in point_set.iter().enumerate() {
                    let translation =
                        Translation::between_projected(pattern_point, dataset_point, mask);
                    acc.entry(translation).or_default().entry(i).or_insert(j);
                }
                Ok(acc)
            })
            .try_reduce(GroupBuilder::new, |a, b| Ok(merge_builders(a, b)))?;

        Ok(Self::from_builder(builder))
    }

    fn from_builder(builder: GroupBuilder) -> Self {
        let groups = builder
            .into_iter()
            .map(|(translation, by_index)| {
                let mut entries: Vec<MatchEntry> = by_index
                    .into_iter()
                    .map(|(pattern_index, witness)| MatchEntry {
                        pattern_index,
                        witness,
                    })
                    .collect();
                entries.sort_by_key(|entry| entry.pattern_index);
                (translation, entries)
            })
            .collect();

        Self { groups }
    }

    /// The number of distinct translation vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The entries recorded for a translation vector, sorted by pattern
    /// index.
    #[must_use]
    pub fn get(&self, translation: &Translation) -> Option<&[MatchEntry]> {
        self.groups.get(translation).map(Vec::as_slice)
    }

    /// Iterates over all (translation, entries) groups in no particular
    /// order.
    pub fn groups(&self) -> impl Iterator<Item = (&Translation, &[MatchEntry])> {
        self.groups
            .iter()
            .map(|(translation, entries)| (translation, entries.as_slice()))
    }
}

/// Merges two partial groupings, keeping the smallest witness per
/// (translation, pattern index) pair.
fn merge_builders(mut a: GroupBuilder, b: GroupBuilder) -> GroupBuilder {
    for (translation, by_index) in b {
        let target = a.entry(translation).or_default();
        for (pattern_index, witness) in by_index {
            target
                .entry(pattern_index)
                .and_modify(|current| {
                    if witness < *current {
                        *current = witness;
                    }
                })
                .or_insert(witness);
        }
    }
    a
}

fn is_cancelled(cancel: Option<&CancelCheck>) -> bool {
    cancel.is_some_and(|check| check())
}
