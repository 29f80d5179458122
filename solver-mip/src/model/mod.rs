//! Solution and incumbent types for the MIP solver.

mod shared;
mod solution;

pub use shared::SharedIncumbent;
pub use solution::{Incumbent, MipSolution, MipStatus};
