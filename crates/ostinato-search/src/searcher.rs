//! Search entry point and its configuration surface.

use std::fmt;

use ostinato_core::model::{DimensionMask, Pattern, PointSet};
use ostinato_core::{Error, Result};

use crate::index::VectorIndex;
use crate::matcher;
use crate::result::SearchResult;

/// Cooperative cancellation check.
///
/// Invoked between independent units of work (once per pattern index),
/// never mid-vector-computation. Returning `true` aborts the search with
/// [`Error::Interrupted`]. The core imposes no timeouts of its own; an
/// interactive caller wires its deadline policy in here.
pub type CancelCheck = dyn Fn() -> bool + Send + Sync;

/// Configurable entry point for translation pattern search.
///
/// The default configuration matches every dimension, requires the full
/// pattern (exact occurrences only), and runs sequentially. Searching is
/// pure and deterministic: identical inputs yield an identical ordered
/// occurrence list.
///
/// # Example
///
/// ```
/// use ostinato_core::model::{Pattern, PointSet, Provenance};
/// use ostinato_search::Searcher;
///
/// let pattern = Pattern::from_rows(
///     &[vec![0.0, 60.0], vec![1.0, 62.0], vec![2.0, 64.0]],
///     "motif",
///     Provenance::Query,
/// )
/// .unwrap();
/// let piece = PointSet::from_rows(&[
///     vec![0.0, 60.0],
///     vec![1.0, 62.0],
///     vec![5.0, 64.0],
/// ])
/// .unwrap();
///
/// let result = Searcher::new()
///     .with_min_match_size(2)
///     .run(&pattern, &piece)
///     .unwrap();
///
/// // Two vectors cover two pattern points each: (-1, -2) maps the last two
/// // pattern points onto the first two piece points, and (0, 0) matches the
/// // opening in place.
/// assert_eq!(result.len(), 2);
/// assert!(result.iter().all(|o| o.matched_count() == 2));
/// ```
pub struct Searcher {
    min_match_size: Option<usize>,
    mask: Option<DimensionMask>,
    parallel: bool,
    cancel: Option<Box<CancelCheck>>,
}

impl fmt::Debug for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Searcher")
            .field("min_match_size", &self.min_match_size)
            .field("mask", &self.mask)
            .field("parallel", &self.parallel)
            .field("cancel", &self.cancel.is_some())
            .finish()
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_match_size: None,
            mask: None,
            parallel: false,
            cancel: None,
        }
    }

    /// Sets the minimum number of pattern points an occurrence must match.
    ///
    /// Defaults to the pattern size, i.e. exact occurrences only. Values
    /// below the pattern size admit partial occurrences.
    #[must_use]
    pub fn with_min_match_size(mut self, min_match_size: usize) -> Self {
        self.min_match_size = Some(min_match_size);
        self
    }

    /// Restricts matching to the dimensions selected by the mask.
    ///
    /// Defaults to all dimensions. With an explicit mask, pattern and point
    /// set may even differ in arity as long as the mask is valid for both.
    #[must_use]
    pub fn with_dimension_mask(mut self, mask: DimensionMask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Shards the index build across rayon workers.
    ///
    /// Output is identical to the sequential build.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Installs a cooperative cancellation check (see [`CancelCheck`]).
    #[must_use]
    pub fn with_cancellation(mut self, check: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.cancel = Some(Box::new(check));
        self
    }

    /// Runs the search.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the configured minimum match size
    /// lies outside `[1, pattern.len()]` or the dimension mask selects a
    /// dimension the data does not have; [`Error::DimensionMismatch`] if no
    /// mask is given and pattern and point set differ in arity; and
    /// [`Error::Interrupted`] if the cancellation check fires. All
    /// validation happens before any matching work.
    pub fn run(&self, pattern: &Pattern, point_set: &PointSet) -> Result<SearchResult> {
        let min_match_size = self.effective_min_match_size(pattern)?;
        let mask = self.effective_mask(pattern, point_set)?;

        log::debug!(
            "searching for {} ({} points) in {} ({} points), min match size {}",
            pattern.label(),
            pattern.len(),
            point_set.piece_name().unwrap_or("unnamed piece"),
            point_set.len(),
            min_match_size
        );

        let cancel = self.cancel.as_deref();
        let index = if self.parallel {
            VectorIndex::build_parallel(pattern, point_set, &mask, cancel)?
        } else {
            VectorIndex::build(pattern, point_set, &mask, cancel)?
        };

        let occurrences = matcher::resolve_occurrences(&index, pattern, point_set, min_match_size);
        log::debug!(
            "{} distinct translations, {} occurrences kept",
            index.len(),
            occurrences.len()
        );

        Ok(SearchResult::new(
            pattern.clone(),
            point_set.piece_name().map(String::from),
            min_match_size,
            occurrences,
        ))
    }

    fn effective_min_match_size(&self, pattern: &Pattern) -> Result<usize> {
        let min_match_size = self.min_match_size.unwrap_or(pattern.len());
        if min_match_size < 1 || min_match_size > pattern.len() {
            return Err(Error::InvalidInput(format!(
                "min match size {min_match_size} is outside [1, {}]",
                pattern.len()
            )));
        }
        Ok(min_match_size)
    }

    fn effective_mask(&self, pattern: &Pattern, point_set: &PointSet) -> Result<DimensionMask> {
        match &self.mask {
            Some(mask) => {
                mask.check_bounds(pattern.dimension())?;
                mask.check_bounds(point_set.dimension())?;
                Ok(mask.clone())
            }
            None => {
                if pattern.dimension() != point_set.dimension() {
                    return Err(Error::DimensionMismatch {
                        pattern: pattern.dimension(),
                        point_set: point_set.dimension(),
                    });
                }
                Ok(DimensionMask::all(pattern.dimension()))
            }
        }
    }
}

/// Finds all translationally equivalent occurrences of the query pattern in
/// the given point set, under the default configuration: every dimension
/// participates in matching and only exact occurrences are returned.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if pattern and point set differ in
/// arity.
pub fn find_occurrences(pattern: &Pattern, point_set: &PointSet) -> Result<SearchResult> {
    Searcher::new().run(pattern, point_set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Pattern, PointSet) {
        use ostinato_core::model::Provenance;

        let pattern = Pattern::from_rows(
            &[vec![0.0, 60.0], vec![1.0, 62.0]],
            "q",
            Provenance::Query,
        )
        .unwrap();
        let point_set = PointSet::from_rows(&[vec![0.0, 60.0], vec![1.0, 62.0]]).unwrap();
        (pattern, point_set)
    }

    #[test]
    fn test_min_match_size_zero_is_rejected() {
        let (pattern, point_set) = fixture();

        let result = Searcher::new().with_min_match_size(0).run(&pattern, &point_set);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_min_match_size_above_pattern_size_is_rejected() {
        let (pattern, point_set) = fixture();

        let result = Searcher::new().with_min_match_size(3).run(&pattern, &point_set);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_differing_arity_without_mask_is_a_dimension_mismatch() {
        use ostinato_core::model::Provenance;

        let pattern =
            Pattern::from_rows(&[vec![0.0, 60.0, 1.0]], "q", Provenance::Query).unwrap();
        let point_set = PointSet::from_rows(&[vec![0.0, 60.0]]).unwrap();

        let result = find_occurrences(&pattern, &point_set);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                pattern: 3,
                point_set: 2
            })
        ));
    }

    #[test]
    fn test_out_of_bounds_mask_is_rejected() {
        let (pattern, point_set) = fixture();
        let mask = DimensionMask::new(vec![0, 5]).unwrap();

        let result = Searcher::new()
            .with_dimension_mask(mask)
            .run(&pattern, &point_set);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_mask_bridges_differing_arity() {
        use ostinato_core::model::Provenance;

        // A 3-dimensional pattern searched in a 2-dimensional piece, matched
        // on onset and pitch only.
        let pattern =
            Pattern::from_rows(&[vec![0.0, 60.0, 0.5]], "q", Provenance::Query).unwrap();
        let point_set = PointSet::from_rows(&[vec![2.0, 60.0]]).unwrap();

        let result = Searcher::new()
            .with_dimension_mask(DimensionMask::onset_and_pitch())
            .run(&pattern, &point_set)
            .unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_cancellation_aborts_the_search() {
        let (pattern, point_set) = fixture();

        let result = Searcher::new()
            .with_cancellation(|| true)
            .run(&pattern, &point_set);
        assert!(matches!(result, Err(Error::Interrupted)));
    }

    #[test]
    fn test_debug_does_not_require_debug_cancellation() {
        let searcher = Searcher::new().with_cancellation(|| false);
        let rendered = format!("{searcher:?}");
        assert!(rendered.contains("cancel: true"));
    }
}
