//! Core point-set model for ostinato.
//!
//! This crate defines the geometric representation of symbolic music: exact
//! coordinates, points, translation vectors, point sets, query patterns, and
//! the dimension mask that decides which coordinates take part in matching.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;

pub use error::{Error, Result};
