use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::mask::DimensionMask;
use crate::model::point::{Coord, Point};

/// Validates that a point collection is non-empty and uniform in arity,
/// returning the shared dimension count.
pub(crate) fn uniform_dimension(points: &[Point]) -> Result<usize> {
    let Some(first) = points.first() else {
        return Err(Error::InvalidInput(
            "point collection must contain at least one point".to_string(),
        ));
    };

    let dimension = first.dimension();
    if dimension == 0 {
        return Err(Error::InvalidInput(
            "points must have at least one dimension".to_string(),
        ));
    }

    for (index, point) in points.iter().enumerate() {
        if point.dimension() != dimension {
            return Err(Error::InvalidInput(format!(
                "point {index} has {} dimensions, expected {dimension}",
                point.dimension()
            )));
        }
    }

    Ok(dimension)
}

/// An ordered point-set representation of a piece of music (or one voice).
///
/// Points are kept in ascending lexicographic order: onset time first, then
/// pitch, then any auxiliary dimensions, with insertion order breaking full
/// ties. Duplicate points are retained; a chord attack repeated at different
/// pitches shares one onset, and a doubled voice may repeat a point exactly.
/// A point set is read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    piece_name: Option<String>,
    points: Vec<Point>,
    dimension: usize,
}

impl PointSet {
    /// Creates a point set from points, sorting them into lexicographic
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `points` is empty or the points do
    /// not all share the same number of dimensions.
    pub fn new(mut points: Vec<Point>) -> Result<Self> {
        let dimension = uniform_dimension(&points)?;
        points.sort();

        Ok(Self {
            piece_name: None,
            points,
            dimension,
        })
    }

    /// Creates a point set from a raw numeric table, one row per point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the table is empty, a row is
    /// empty, or the rows differ in column count.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        Self::new(rows.iter().map(|row| Point::from_row(row.as_ref())).collect())
    }

    /// Sets the name of the piece this point set represents.
    #[must_use]
    pub fn with_piece_name(mut self, piece_name: impl Into<String>) -> Self {
        self.piece_name = Some(piece_name.into());
        self
    }

    #[must_use]
    pub fn piece_name(&self) -> Option<&str> {
        self.piece_name.as_deref()
    }

    /// The number of points.
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
    /// The relative order of points is preserved, so indices into the
    /// projected set line up with indices into this set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the mask selects a dimension the
    /// points do not have.
    pub fn projected(&self, mask: &DimensionMask) -> Result<Self> {
        mask.check_bounds(self.dimension)?;

        Ok(Self {
            piece_name: self.piece_name.clone(),
            points: self.points.iter().map(|p| p.projected(mask)).collect(),
            dimension: mask.len(),
        })
    }

    /// The points whose onset time lies in the inclusive range
    /// `[start, end]`, in ascending lexicographic order.
    #[must_use]
    pub fn get_range(&self, start: Coord, end: Coord) -> Vec<Point> {
        self.points
            .iter()
            .filter(|p| p.onset_time().is_some_and(|t| start <= t && t <= end))
            .cloned()
            .collect()
    }

    /// Returns true if this point set holds exactly the same points as
    /// `other`, ignoring metadata such as the piece name.
    #[must_use]
    pub fn equals_in_points(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_empty_table() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(
            PointSet::from_rows(&rows),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_rows_rejects_ragged_table() {
        let rows = vec![vec![0.0, 60.0], vec![1.0, 62.0, 0.5]];
        assert!(matches!(
            PointSet::from_rows(&rows),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_rows_rejects_empty_row() {
        let rows: Vec<Vec<f64>> = vec![Vec::new()];
        assert!(PointSet::from_rows(&rows).is_err());
    }

    #[test]
    fn test_points_are_sorted_by_onset_then_pitch() {
        let rows = vec![vec![2.0, 60.0], vec![0.0, 62.0], vec![0.0, 60.0]];
        let point_set = PointSet::from_rows(&rows).unwrap();

        let onsets: Vec<f64> = point_set
            .iter()
            .map(|p| p.onset_time().unwrap().as_f64())
            .collect();
        assert_eq!(onsets, vec![0.0, 0.0, 2.0]);
        assert_eq!(point_set.get(0).unwrap().pitch().unwrap().as_f64(), 60.0);
        assert_eq!(point_set.get(1).unwrap().pitch().unwrap().as_f64(), 62.0);
    }

    #[test]
    fn test_duplicate_points_are_retained() {
        let rows = vec![vec![0.0, 60.0], vec![0.0, 60.0]];
        let point_set = PointSet::from_rows(&rows).unwrap();
        assert_eq!(point_set.len(), 2);
    }

    #[test]
    fn test_get_range_is_inclusive() {
        let rows = vec![
            vec![0.0, 60.0],
            vec![1.0, 62.0],
            vec![2.0, 64.0],
            vec![3.0, 65.0],
        ];
        let point_set = PointSet::from_rows(&rows).unwrap();

        let range = point_set.get_range(Coord::from_int(1), Coord::from_int(2));
        assert_eq!(range.len(), 2);
        assert_eq!(range[0], Point::from_row(&[1.0, 62.0]));
        assert_eq!(range[1], Point::from_row(&[2.0, 64.0]));
    }

    #[test]
    fn test_equals_in_points_ignores_piece_name() {
        let rows = vec![vec![0.0, 60.0]];
        let a = PointSet::from_rows(&rows).unwrap().with_piece_name("A");
        let b = PointSet::from_rows(&rows).unwrap().with_piece_name("B");

        assert_ne!(a, b);
        assert!(a.equals_in_points(&b));
    }

    #[test]
    fn test_projected_preserves_point_order() {
        // Projection must keep indices aligned with the source set even when
        // the projected coordinates would sort differently.
        let rows = vec![vec![0.0, 62.0, 1.0], vec![1.0, 60.0, 0.5]];
        let point_set = PointSet::from_rows(&rows).unwrap();

        let mask = DimensionMask::new(vec![1]).unwrap();
        let projected = point_set.projected(&mask).unwrap();

        assert_eq!(projected.dimension(), 1);
        assert_eq!(projected.get(0).unwrap(), &Point::from_row(&[62.0]));
        assert_eq!(projected.get(1).unwrap(), &Point::from_row(&[60.0]));
    }

    #[test]
    fn test_projected_rejects_out_of_bounds_mask() {
        let point_set = PointSet::from_rows(&[vec![0.0, 60.0]]).unwrap();
        let mask = DimensionMask::new(vec![0, 2]).unwrap();
        assert!(point_set.projected(&mask).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let point_set = PointSet::from_rows(&[vec![0.0, 60.0], vec![1.5, 62.0]])
            .unwrap()
            .with_piece_name("Invention No. 1");

        let json = serde_json::to_string(&point_set).unwrap();
        let back: PointSet = serde_json::from_str(&json).unwrap();
        assert_eq!(point_set, back);
    }
}
