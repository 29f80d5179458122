//! Incumbent shared between concurrently explored subtrees.
//!
//! The objective bound lives in an `AtomicU64` holding `f64` bits so that
//! pruning can read it without locking. The point itself sits behind a
//! `Mutex`, which is the source of truth: installs re-check the candidate
//! against the locked value and only ever lower it.
//!
//! A pruning read may observe a slightly stale bound. That only costs extra
//! work, since a stale bound is never lower than the true one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::Incumbent;

/// Concurrent holder for the best integer point.
#[derive(Debug)]
pub struct SharedIncumbent {
    bound: AtomicU64,
    best: Mutex<Incumbent>,
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedIncumbent {
    /// Create an empty incumbent with bound +∞.
    pub fn new() -> Self {
        Self {
            bound: AtomicU64::new(f64::INFINITY.to_bits()),
            best: Mutex::new(Incumbent::new()),
        }
    }

    /// Current objective bound (lock-free, possibly stale).
    #[inline]
    pub fn bound(&self) -> f64 {
        f64::from_bits(self.bound.load(Ordering::Acquire))
    }

    /// Install `x` if `obj` strictly improves on the stored incumbent.
    ///
    /// Returns true if installed.
    pub fn try_install(&self, x: &[f64], obj: f64) -> bool {
        // Cheap reject without touching the lock.
        if obj >= self.bound() {
            return false;
        }

        let mut best = self.lock();
        if best.update(x, obj) {
            self.bound.store(obj.to_bits(), Ordering::Release);
            true
        } else {
            false
        }
    }

    /// Consume the holder and return the incumbent.
    pub fn into_inner(self) -> Incumbent {
        self.best.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, Incumbent> {
        // A panicking installer cannot leave the incumbent half-written:
        // `Incumbent::update` assigns plain fields only.
        self.best.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_install_only_improvements() {
        let inc = SharedIncumbent::new();
        assert_eq!(inc.bound(), f64::INFINITY);

        assert!(inc.try_install(&[1.0], 10.0));
        assert!(!inc.try_install(&[2.0], 10.0));
        assert!(!inc.try_install(&[3.0], 12.0));
        assert!(inc.try_install(&[4.0], 7.0));

        assert_eq!(inc.bound(), 7.0);
        let snap = inc.into_inner();
        assert_eq!(snap.solution, Some(vec![4.0]));
        assert_eq!(snap.update_count, 2);
    }

    #[test]
    fn test_concurrent_installs_keep_minimum() {
        let inc = Arc::new(SharedIncumbent::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let inc = Arc::clone(&inc);
                thread::spawn(move || {
                    for k in 0..100 {
                        let obj = ((t * 37 + k * 11) % 97) as f64;
                        inc.try_install(&[obj], obj);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let inc = Arc::try_unwrap(inc).unwrap();
        assert_eq!(inc.bound(), 0.0);
        let best = inc.into_inner();
        assert_eq!(best.obj_val, 0.0);
        assert_eq!(best.solution, Some(vec![0.0]));
    }
}
