//! # Ostinato
//!
//! A geometric pattern-search library for symbolic music.
//!
//! Ostinato represents pieces of music as point sets in a low-dimensional
//! space (onset time, pitch height, optional auxiliary dimensions) and finds
//! all translationally equivalent occurrences of a query motif inside a
//! piece, exact or partial. Score parsing, notebook display, and rendering
//! live outside this repository; ostinato consumes plain numeric data and
//! emits machine-readable occurrence results.
