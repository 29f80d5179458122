//! Sparse input helpers.
//!
//! Transportation-style constraint matrices are mostly zeros, so callers
//! often find it easier to describe them as triplets. The solver itself
//! works on dense matrices; these helpers bridge the two.

use nalgebra::DMatrix;
use sprs::{CsMat, TriMat};

/// Sparse matrix in CSC format.
pub type SparseCsc = CsMat<f64>;

/// Build a sparse CSC matrix from triplets (row, col, value).
///
/// Duplicate entries are summed.
pub fn from_triplets<I>(nrows: usize, ncols: usize, triplets: I) -> SparseCsc
where
    I: IntoIterator<Item = (usize, usize, f64)>,
{
    let mut tri = TriMat::new((nrows, ncols));
    for (i, j, v) in triplets {
        tri.add_triplet(i, j, v);
    }
    tri.to_csc()
}

/// Expand a sparse matrix into a dense one.
pub fn to_dense(a: &SparseCsc) -> DMatrix<f64> {
    let mut dense = DMatrix::zeros(a.rows(), a.cols());
    for (&val, (row, col)) in a.iter() {
        dense[(row, col)] += val;
    }
    dense
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triplets_to_dense() {
        let a = from_triplets(2, 3, vec![(0, 0, 1.0), (1, 2, -1.0), (0, 0, 2.0)]);
        let d = to_dense(&a);
        assert_eq!(d.nrows(), 2);
        assert_eq!(d.ncols(), 3);
        assert_eq!(d[(0, 0)], 3.0);
        assert_eq!(d[(1, 2)], -1.0);
        assert_eq!(d[(1, 0)], 0.0);
    }
}
