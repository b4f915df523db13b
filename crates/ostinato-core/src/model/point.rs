use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Neg, Sub};

use crate::model::mask::DimensionMask;
use crate::model::translation::Translation;

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// Decimal places retained when a coordinate is built from a float.
const DECIMAL_PLACES: u32 = 5;

/// Fixed-point scaling factor, 10^DECIMAL_PLACES.
const SCALE: i64 = 10_i64.pow(DECIMAL_PLACES);

/// One exact coordinate component.
///
/// Onset times coming out of score parsers are fractions of a quarter note,
/// so coordinates are stored as fixed-point values with five decimal places
/// of resolution. Rounding happens once, at construction; equality, ordering,
/// hashing, and arithmetic are integer-exact afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord(i64);

impl Coord {
    /// Creates a coordinate from a float, rounding to five decimal places.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self((value * SCALE as f64).round() as i64)
    }

    /// Creates a coordinate from an integer value (e.g., a MIDI pitch number).
    #[must_use]
    pub const fn from_int(value: i64) -> Self {
        Self(value * SCALE)
    }

    /// Returns the coordinate as a float.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Returns true if this coordinate is exactly zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for Coord {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

impl From<f64> for Coord {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl Add for Coord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Coord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Coord {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::from_f64)
    }
}

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// One musical event as an immutable coordinate vector.
///
/// By convention the first dimension is onset time and the second is pitch
/// height; any further dimensions are auxiliary (duration, voice number).
/// Points compare lexicographically: primary dimension first, then the
/// second, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    coords: Vec<Coord>,
}

impl Point {
    /// Creates a point from its coordinate components.
    ///
    /// Points built through [`PointSet`](crate::model::PointSet) and
    /// [`Pattern`](crate::model::Pattern) constructors always have at least
    /// one dimension; those constructors reject empty rows.
    #[must_use]
    pub fn new(coords: Vec<Coord>) -> Self {
        Self { coords }
    }

    /// Creates a point from one row of a raw numeric table.
    #[must_use]
    pub fn from_row(row: &[f64]) -> Self {
        Self::new(row.iter().copied().map(Coord::from_f64).collect())
    }

    /// The number of coordinate dimensions.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// The coordinate in the given dimension, if present.
    #[must_use]
    pub fn get(&self, dim: usize) -> Option<Coord> {
        self.coords.get(dim).copied()
    }

    /// All coordinate components.
    #[must_use]
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// The onset time (first dimension).
    #[must_use]
    pub fn onset_time(&self) -> Option<Coord> {
        self.coords.first().copied()
    }

    /// The pitch number (second dimension).
    #[must_use]
    pub fn pitch(&self) -> Option<Coord> {
        self.get(1)
    }

    /// Returns a copy containing only the dimensions selected by the mask.
    ///
    /// Dimensions the mask names beyond this point's arity are skipped;
    /// callers that need strict bounds checking validate the mask up front
    /// (see [`DimensionMask::check_bounds`]).
    #[must_use]
    pub fn projected(&self, mask: &DimensionMask) -> Self {
        Self::new(
            mask.dims()
                .iter()
                .filter_map(|&d| self.get(d))
                .collect(),
        )
    }

    /// Returns a copy shifted by the given translation.
    ///
    /// Components beyond the translation's dimensionality are left
    /// unchanged, so auxiliary dimensions survive a shift untouched.
    #[must_use]
    pub fn translated(&self, translation: &Translation) -> Self {
        let mut coords = self.coords.clone();
        for (coord, &delta) in coords.iter_mut().zip(translation.components()) {
            *coord = *coord + delta;
        }
        Self { coords }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, coord) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{coord}")?;
        }
        write!(f, ")")
    }
}
