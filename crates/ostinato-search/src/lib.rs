//! Translation pattern search for ostinato.
//!
//! Finds all translationally equivalent occurrences of a query pattern in a
//! point set, exact or partial. The search enumerates every pairwise
//! translation between pattern and piece, groups the pairs by translation
//! vector, and keeps each vector at which enough of the pattern is present.
//! For a pattern of m points and a piece of n points that enumeration is
//! O(m·n); the cost is inherent to exhaustive translation search and bounds
//! practical pattern and piece sizes.
//!
//! # Example
//!
//! ```
//! use ostinato_core::model::{Pattern, PointSet, Provenance};
//! use ostinato_search::find_occurrences;
//!
//! let pattern = Pattern::from_rows(&[vec![0.0, 60.0]], "motif", Provenance::Query).unwrap();
//! let piece = PointSet::from_rows(&[
//!     vec![0.0, 60.0],
//!     vec![2.0, 60.0],
//!     vec![4.0, 67.0],
//! ])
//! .unwrap();
//!
//! let result = find_occurrences(&pattern, &piece).unwrap();
//! assert_eq!(result.len(), 3);
//! assert!(result.occurrences().iter().all(ostinato_search::Occurrence::is_exact));
//! ```

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod index;
pub mod matcher;
pub mod result;
pub mod searcher;

pub use ostinato_core::{Error, Result};
pub use result::{Correspondence, Occurrence, SearchResult};
pub use searcher::{find_occurrences, CancelCheck, Searcher};
