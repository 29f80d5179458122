//! Linear algebra layer.
//!
//! Dense square solves for vertex candidates and sparse builders for
//! assembling constraint matrices.

pub mod dense;
pub mod sparse;
