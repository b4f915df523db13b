use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::model::mask::DimensionMask;
use crate::model::point::Point;
use crate::model::point_set::{uniform_dimension, PointSet};
use crate::model::translation::Translation;

/// Where a pattern came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    /// Hand-annotated ground truth from a pattern dataset.
    Annotated,
    /// Produced by a pattern-discovery or matching algorithm.
    Discovered,
    /// Built ad hoc as a one-off query.
    Query,
}

/// A query motif: a labeled, ordered, fixed-size collection of points.
///
/// A pattern may be sliced from a [`PointSet`], but it is always an
/// independent copy, never a live view. Its size is fixed at construction
/// and is at least one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    label: String,
    provenance: Provenance,
    points: Vec<Point>,
    dimension: usize,
}

impl Pattern {
    /// Creates a pattern from points, sorting them into lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `points` is empty or the points do
    /// not all share the same number of dimensions.
    pub fn new(
        mut points: Vec<Point>,
        label: impl Into<String>,
        provenance: Provenance,
    ) -> Result<Self> {
        let dimension = uniform_dimension(&points)?;
        points.sort();

        Ok(Self {
            label: label.into(),
            provenance,
            points,
            dimension,
        })
    }

    /// Creates a pattern from a raw numeric table, one row per point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the table is empty, a row is
    /// empty, or the rows differ in column count.
    pub fn from_rows<R: AsRef<[f64]>>(
        rows: &[R],
        label: impl Into<String>,
        provenance: Provenance,
    ) -> Result<Self> {
        Self::new(
            rows.iter().map(|row| Point::from_row(row.as_ref())).collect(),
            label,
            provenance,
        )
    }

    /// Creates a pattern by copying a range of points out of a point set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the range is empty or reaches past
    /// the end of the point set.
    pub fn from_point_set(
        point_set: &PointSet,
        range: Range<usize>,
        label: impl Into<String>,
        provenance: Provenance,
    ) -> Result<Self> {
        let points = point_set.points().get(range.clone()).ok_or_else(|| {
            Error::InvalidInput(format!(
                "range {range:?} is out of bounds for a point set of {} points",
                point_set.len()
            ))
        })?;

        Self::new(points.to_vec(), label, provenance)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// The number of points; fixed after construction and at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The number of coordinate dimensions shared by every point.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The points in ascending lexicographic order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The point at the given index, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Returns a copy containing only the dimensions selected by the mask.
    ///
    /// The relative order of points is preserved, so pattern indices stay
    /// aligned with this pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the mask selects a dimension the
    /// points do not have.
    pub fn projected(&self, mask: &DimensionMask) -> Result<Self> {
        mask.check_bounds(self.dimension)?;

        Ok(Self {
            label: self.label.clone(),
            provenance: self.provenance,
            points: self.points.iter().map(|p| p.projected(mask)).collect(),
            dimension: mask.len(),
        })
    }

    /// Returns a copy with every point shifted by the given translation.
    #[must_use]
    pub fn translated(&self, translation: &Translation) -> Self {
        Self {
            label: self.label.clone(),
            provenance: self.provenance,
            points: self.points.iter().map(|p| p.translated(translation)).collect(),
            dimension: self.dimension,
        }
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}; {:?}; {} points]", self.label, self.provenance, self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::point::Coord;

    #[test]
    fn test_pattern_label_and_provenance() {
        let rows = vec![vec![1.0, 1.0]; 6];
        let pattern = Pattern::from_rows(&rows, "A", Provenance::Annotated).unwrap();

        assert_eq!(pattern.label(), "A");
        assert_eq!(pattern.provenance(), Provenance::Annotated);
        assert_eq!(pattern.len(), 6);
    }

    #[test]
    fn test_pattern_requires_at_least_one_point() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(
            Pattern::from_rows(&rows, "empty", Provenance::Query),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_pattern_sorts_points() {
        let rows = vec![vec![2.0, 64.0], vec![0.0, 60.0]];
        let pattern = Pattern::from_rows(&rows, "motif", Provenance::Query).unwrap();

        assert_eq!(pattern.get(0).unwrap(), &Point::from_row(&[0.0, 60.0]));
        assert_eq!(pattern.get(1).unwrap(), &Point::from_row(&[2.0, 64.0]));
    }

    #[test]
    fn test_from_point_set_copies_the_slice() {
        let point_set =
            PointSet::from_rows(&[vec![0.0, 60.0], vec![1.0, 62.0], vec![2.0, 64.0]]).unwrap();

        let pattern =
            Pattern::from_point_set(&point_set, 0..2, "opening", Provenance::Annotated).unwrap();

        assert_eq!(pattern.len(), 2);
        assert_eq!(pattern.points(), &point_set.points()[0..2]);
    }

    #[test]
    fn test_from_point_set_rejects_bad_range() {
        let point_set = PointSet::from_rows(&[vec![0.0, 60.0]]).unwrap();

        assert!(Pattern::from_point_set(&point_set, 0..0, "empty", Provenance::Query).is_err());
        assert!(Pattern::from_point_set(&point_set, 0..2, "long", Provenance::Query).is_err());
    }

    #[test]
    fn test_translated_shifts_every_point() {
        let pattern =
            Pattern::from_rows(&[vec![0.0, 60.0], vec![1.0, 62.0]], "motif", Provenance::Query)
                .unwrap();
        let shift = Translation::from_components(vec![Coord::from_int(10), Coord::from_int(0)]);

        let moved = pattern.translated(&shift);
        assert_eq!(moved.get(0).unwrap(), &Point::from_row(&[10.0, 60.0]));
        assert_eq!(moved.get(1).unwrap(), &Point::from_row(&[11.0, 62.0]));
        assert_eq!(moved.label(), "motif");
    }

    #[test]
    fn test_projected_drops_auxiliary_dimensions() {
        let pattern = Pattern::from_rows(
            &[vec![0.0, 60.0, 0.25], vec![1.0, 62.0, 0.5]],
            "motif",
            Provenance::Query,
        )
        .unwrap();

        let projected = pattern.projected(&DimensionMask::onset_and_pitch()).unwrap();
        assert_eq!(projected.dimension(), 2);
        assert_eq!(projected.get(0).unwrap(), &Point::from_row(&[0.0, 60.0]));
    }
}
