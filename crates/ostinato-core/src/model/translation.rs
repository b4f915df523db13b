use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::mask::DimensionMask;
use crate::model::point::{Coord, Point};

/// A rigid shift: the componentwise difference between two points.
///
/// Translations are value objects with structural equality and hashing, used
/// as grouping keys during a search. They order lexicographically, primary
/// dimension first, which is also the order occurrences are reported in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Translation {
    components: Vec<Coord>,
}

impl Translation {
    /// The translation that maps `from` onto `to`, over all shared dimensions.
    #[must_use]
    pub fn between(from: &Point, to: &Point) -> Self {
        Self {
            components: to
                .coords()
                .iter()
                .zip(from.coords())
                .map(|(&t, &f)| t - f)
                .collect(),
        }
    }

    /// The translation that maps `from` onto `to`, restricted to the
    /// dimensions selected by the mask.
    #[must_use]
    pub fn between_projected(from: &Point, to: &Point, mask: &DimensionMask) -> Self {
        Self {
            components: mask
                .dims()
                .iter()
                .filter_map(|&d| match (from.get(d), to.get(d)) {
                    (Some(f), Some(t)) => Some(t - f),
                    _ => None,
                })
                .collect(),
        }
    }

    /// The zero translation in the given number of dimensions.
    #[must_use]
    pub fn zero(dimension: usize) -> Self {
        Self {
            components: vec![Coord::default(); dimension],
        }
    }

    /// Builds a translation directly from its components.
    #[must_use]
    pub fn from_components(components: Vec<Coord>) -> Self {
        Self { components }
    }

    #[must_use]
    pub fn components(&self) -> &[Coord] {
        &self.components
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    /// The component in the given dimension, if present.
    #[must_use]
    pub fn get(&self, dim: usize) -> Option<Coord> {
        self.components.get(dim).copied()
    }

    /// Returns true if every component is zero, i.e. the identity shift.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|c| c.is_zero())
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{component}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_subtracts_componentwise() {
        let from = Point::from_row(&[0.0, 60.0]);
        let to = Point::from_row(&[4.0, 67.0]);

        let translation = Translation::between(&from, &to);
        assert_eq!(
            translation,
            Translation::from_components(vec![Coord::from_int(4), Coord::from_int(7)])
        );
    }

    #[test]
    fn test_between_projected_uses_masked_dimensions() {
        let from = Point::from_row(&[0.0, 60.0, 1.0]);
        let to = Point::from_row(&[2.0, 72.0, 0.5]);
        let mask = DimensionMask::onset_only();

        let translation = Translation::between_projected(&from, &to, &mask);
        assert_eq!(
            translation,
            Translation::from_components(vec![Coord::from_int(2)])
        );
    }

    #[test]
    fn test_zero_translation() {
        let zero = Translation::zero(2);
        assert!(zero.is_zero());
        assert_eq!(zero.dimension(), 2);

        let nonzero = Translation::from_components(vec![Coord::default(), Coord::from_int(1)]);
        assert!(!nonzero.is_zero());
    }

    #[test]
    fn test_ordering_is_primary_dimension_first() {
        let small = Translation::from_components(vec![Coord::from_int(0), Coord::from_int(9)]);
        let large = Translation::from_components(vec![Coord::from_int(1), Coord::from_int(-9)]);
        assert!(small < large);
    }

    #[test]
    fn test_display() {
        let translation =
            Translation::from_components(vec![Coord::from_f64(2.5), Coord::from_int(0)]);
        assert_eq!(translation.to_string(), "(2.5, 0)");
    }
}
