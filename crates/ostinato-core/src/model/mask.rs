use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Selects which coordinate dimensions take part in translation matching.
///
/// Matching compares onset time and pitch by default; auxiliary dimensions
/// such as duration or voice number can be excluded by passing an explicit
/// mask to the searcher. Dimension indices are zero-based and must be listed
/// in strictly ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionMask {
    dims: Vec<usize>,
}

impl DimensionMask {
    /// Creates a mask from a list of dimension indices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the list is empty or not strictly
    /// ascending.
    pub fn new(dims: Vec<usize>) -> Result<Self> {
        if dims.is_empty() {
            return Err(Error::InvalidInput(
                "dimension mask must select at least one dimension".to_string(),
            ));
        }
        if dims.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(Error::InvalidInput(
                "dimension mask indices must be strictly ascending".to_string(),
            ));
        }
        Ok(Self { dims })
    }

    /// A mask selecting every dimension up to the given arity.
    #[must_use]
    pub fn all(dimension: usize) -> Self {
        Self {
            dims: (0..dimension).collect(),
        }
    }

    /// A mask selecting only the onset-time dimension.
    #[must_use]
    pub fn onset_only() -> Self {
        Self { dims: vec![0] }
    }

    /// A mask selecting the onset-time and pitch dimensions.
    #[must_use]
    pub fn onset_and_pitch() -> Self {
        Self { dims: vec![0, 1] }
    }

    /// The selected dimension indices, in ascending order.
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// The number of selected dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Checks that every selected dimension exists in points of the given
    /// arity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the mask selects a dimension at or
    /// beyond `dimension`.
    pub fn check_bounds(&self, dimension: usize) -> Result<()> {
        if let Some(&max) = self.dims.last() {
            if max >= dimension {
                return Err(Error::InvalidInput(format!(
                    "dimension mask selects dimension {max}, but points have {dimension} dimensions"
                )));
            }
        }
        Ok(())
    }
}
