//! Relaxation (master LP) management.

mod backend;

pub use backend::{RelaxationBackend, VertexBackend};
