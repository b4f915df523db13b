//! Occurrence matcher: applies the minimum-match-size policy to the vector
//! index and resolves correspondences.

use ostinato_core::model::{Pattern, PointSet};

use crate::index::VectorIndex;
use crate::result::{Correspondence, Occurrence};

/// Resolves vector-index groups into concrete occurrences.
///
/// Each distinct translation whose pattern coverage reaches
/// `min_match_size` yields exactly one occurrence; vectors below the
/// threshold are dropped entirely, not reported as failures. The matching
/// set per vector is maximal by construction of the index, so there is no
/// further ambiguity to break. Pure transform: inputs are not mutated.
///
/// The returned list is sorted by translation vector, ties broken by
/// first-matched dataset index.
#[must_use]
pub fn resolve_occurrences(
    index: &VectorIndex,
    pattern: &Pattern,
    point_set: &PointSet,
    min_match_size: usize,
) -> Vec<Occurrence> {
    let pattern_size = pattern.len();

    let mut occurrences: Vec<Occurrence> = index
        .groups()
        .filter(|(_, entries)| entries.len() >= min_match_size)
        .map(|(translation, entries)| {
            let correspondences: Vec<Correspondence> = entries
                .iter()
                .filter_map(|entry| {
                    point_set.get(entry.witness).map(|point| Correspondence {
                        pattern_index: entry.pattern_index,
                        point_set_index: entry.witness,
                        point: point.clone(),
                    })
                })
                .collect();

            Occurrence::new(
                translation.clone(),
                correspondences,
                entries.len() == pattern_size,
            )
        })
        .collect();

    occurrences.sort_by(|a, b| {
        a.translation()
            .cmp(b.translation())
            .then_with(|| a.first_matched_index().cmp(&b.first_matched_index()))
    });

    occurrences
}
