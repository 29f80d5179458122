//! Lazy enumeration of feasible vertices.

use nalgebra::DVector;

use crate::linalg::dense::solve_square;
use crate::problem::{ConstraintSystem, LpInfo, SolverSettings};
use crate::util::combinations::Combinations;

/// A feasible vertex and the rows that define it.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Vertex coordinates (length n).
    pub x: Vec<f64>,

    /// The n row indices held at equality, ascending.
    pub active_set: Vec<usize>,
}

/// Iterator over the feasible vertices of `A x <= b`.
///
/// Yields vertices in lexicographic order of their defining row subsets. A
/// geometric vertex where more than n rows are tight (a degenerate vertex)
/// is yielded once per defining subset.
pub struct VertexIter<'a> {
    system: &'a ConstraintSystem,
    subsets: Combinations,
    tol: f64,
    singular_rtol: f64,
    info: LpInfo,
}

impl<'a> VertexIter<'a> {
    /// Statistics gathered so far.
    pub fn info(&self) -> LpInfo {
        self.info.clone()
    }

    /// Restart from the first row subset and clear the statistics.
    pub fn reset(&mut self) {
        self.subsets.reset();
        self.info = LpInfo::default();
    }
}

impl Iterator for VertexIter<'_> {
    type Item = Vertex;

    fn next(&mut self) -> Option<Vertex> {
        while let Some(rows) = self.subsets.advance() {
            self.info.combinations += 1;

            let a_sub = self.system.a().select_rows(rows.iter());
            let b_sub: DVector<f64> = self.system.b().select_rows(rows.iter());

            let Some(x) = solve_square(&a_sub, &b_sub, self.singular_rtol) else {
                self.info.singular += 1;
                continue;
            };

            if self.system.is_feasible(x.as_slice(), self.tol) {
                self.info.feasible_vertices += 1;
                return Some(Vertex {
                    x: x.as_slice().to_vec(),
                    active_set: rows.to_vec(),
                });
            }
        }
        None
    }
}

/// Enumerate the feasible vertices of `system`.
pub fn feasible_vertices<'a>(system: &'a ConstraintSystem, settings: &SolverSettings) -> VertexIter<'a> {
    VertexIter {
        system,
        subsets: Combinations::new(system.num_constraints(), system.num_vars()),
        tol: settings.tol,
        singular_rtol: settings.singular_rtol,
        info: LpInfo::default(),
    }
}
