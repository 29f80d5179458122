//! Utility functions.
//!
//! Tolerance helpers and the lazy row-subset generator.

pub mod combinations;
pub mod numerics;
