pub mod mask;
pub mod pattern;
pub mod point;
pub mod point_set;
pub mod translation;

pub use mask::DimensionMask;
pub use pattern::{Pattern, Provenance};
pub use point::{Coord, Point};
pub use point_set::PointSet;
pub use translation::Translation;
