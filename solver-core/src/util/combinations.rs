//! Lazy generator for k-row subsets.
//!
//! Produces every k-subset of `0..m` in lexicographic order without
//! materializing the full list, so memory stays O(k) regardless of C(m, k).

/// Lexicographic k-combinations of `0..m`.
///
/// The generator is restartable: [`Combinations::reset`] rewinds it to the
/// first subset. [`Combinations::advance`] lends the current subset without
/// allocating; the [`Iterator`] impl clones it for convenience.
#[derive(Debug, Clone)]
pub struct Combinations {
    m: usize,
    k: usize,
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl Combinations {
    /// Create a generator over the k-subsets of `0..m`.
    pub fn new(m: usize, k: usize) -> Self {
        Self {
            m,
            k,
            indices: Vec::with_capacity(k),
            started: false,
            exhausted: k > m,
        }
    }

    /// Number of subsets the generator yields in total.
    pub fn total(&self) -> u128 {
        binomial(self.m, self.k)
    }

    /// Rewind to the first subset.
    pub fn reset(&mut self) {
        self.indices.clear();
        self.started = false;
        self.exhausted = self.k > self.m;
    }

    /// Step to the next subset and return it.
    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.exhausted {
            return None;
        }

        if !self.started {
            self.started = true;
            self.indices.clear();
            self.indices.extend(0..self.k);
            return Some(&self.indices);
        }

        // Rightmost position that can still move right.
        let k = self.k;
        let m = self.m;
        let Some(pos) = (0..k).rev().find(|&i| self.indices[i] < m - k + i) else {
            self.exhausted = true;
            return None;
        };

        self.indices[pos] += 1;
        for j in pos + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }

        Some(&self.indices)
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(<[usize]>::to_vec)
    }
}

/// Binomial coefficient C(m, k), saturating at `u128::MAX`.
pub fn binomial(m: usize, k: usize) -> u128 {
    if k > m {
        return 0;
    }
    let k = k.min(m - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (m - i) is divisible by (i + 1) at every step.
        acc = match acc.checked_mul((m - i) as u128) {
            Some(v) => v / (i as u128 + 1),
            None => return u128::MAX,
        };
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_order() {
        let all: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn test_count_matches_binomial() {
        for m in 0..9 {
            for k in 0..=m {
                let count = Combinations::new(m, k).count() as u128;
                assert_eq!(count, binomial(m, k), "C({}, {})", m, k);
            }
        }
    }

    #[test]
    fn test_k_greater_than_m() {
        let mut gen = Combinations::new(2, 3);
        assert!(gen.advance().is_none());
        assert_eq!(gen.total(), 0);
    }

    #[test]
    fn test_m_equals_k_single_subset() {
        let all: Vec<Vec<usize>> = Combinations::new(3, 3).collect();
        assert_eq!(all, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_reset() {
        let mut gen = Combinations::new(5, 3);
        let first: Vec<Vec<usize>> = gen.by_ref().collect();
        assert!(gen.advance().is_none());

        gen.reset();
        let second: Vec<Vec<usize>> = gen.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_binomial_values() {
        assert_eq!(binomial(14, 4), 1001);
        assert_eq!(binomial(31, 12), 141_120_525);
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(3, 5), 0);
    }
}
