//! Maximal-clique-enumeration (MCE) nearness reduction.

use crate::idset::IdSet;

/// Folds a stream of joint-graph maximal cliques into the clique-weighted
/// balance of the graph's two sides.
///
/// The joint graph's vertices `0..split` belong to side A and `split..n` to
/// side B. Each clique contributes its balance `min(x, y) / max(x, y)`
/// weighted by its size, where `x` and `y` are the per-side member counts;
/// a clique living entirely on one side contributes zero balance but still
/// weighs in the denominator, pulling the score down.
#[derive(Debug, Clone)]
pub struct MceAccumulator {
    split: usize,
    singletons: bool,
    numerator: f32,
    denominator: usize,
}

impl MceAccumulator {
    /// New accumulator for a joint graph whose side A occupies `0..split`.
    #[must_use]
    pub fn new(split: usize, singletons: bool) -> Self {
        Self {
            split,
            singletons,
            numerator: 0.0,
            denominator: 0,
        }
    }

    /// Fold one maximal clique into the running score.
    pub fn add(&mut self, clique: &IdSet) {
        let k = clique.len();
        if k <= 1 && !self.singletons {
            return;
        }
        if k == 0 {
            return;
        }

        let x = clique.iter().filter(|&id| id < self.split).count();
        let y = k - x;
        let (lo, hi) = (x.min(y), x.max(y));

        self.numerator += (lo as f32 / hi as f32) * k as f32;
        self.denominator += k;
    }

    /// The nearness score: 0 when no clique contributed.
    #[must_use]
    pub fn value(&self) -> f32 {
        if self.denominator == 0 {
            0.0
        } else {
            self.numerator / self.denominator as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clique(ids: &[usize]) -> IdSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn balanced_clique_scores_one() {
        // K4 split evenly: x = y = 2, k = 4 => 4/4
        let mut acc = MceAccumulator::new(2, false);
        acc.add(&clique(&[0, 1, 2, 3]));
        assert_eq!(acc.value(), 1.0);
    }

    #[test]
    fn imbalanced_clique_scores_half() {
        // K3 with sides {0} and {1, 2}: (1/2) * 3 / 3
        let mut acc = MceAccumulator::new(1, false);
        acc.add(&clique(&[0, 1, 2]));
        assert_eq!(acc.value(), 0.5);
    }

    #[test]
    fn one_sided_clique_drags_the_score_down() {
        let mut acc = MceAccumulator::new(2, false);
        acc.add(&clique(&[0, 1, 2, 3]));
        // entirely on side A: balance 0, weight 2
        acc.add(&clique(&[0, 1]));
        assert_eq!(acc.value(), 4.0 / 6.0);
    }

    #[test]
    fn singletons_are_skipped_unless_enabled() {
        let mut skip = MceAccumulator::new(1, false);
        skip.add(&clique(&[0]));
        assert_eq!(skip.value(), 0.0);
        assert_eq!(skip.denominator, 0);

        let mut keep = MceAccumulator::new(1, true);
        keep.add(&clique(&[0]));
        keep.add(&clique(&[0, 1]));
        // singleton adds 0 balance with weight 1
        assert_eq!(keep.value(), 2.0 / 3.0);
    }

    #[test]
    fn no_cliques_means_zero() {
        assert_eq!(MceAccumulator::new(3, true).value(), 0.0);
    }

    #[test]
    fn uneven_sides_split_at_side_a_len() {
        // sides {0} and {1, 2, 3}; clique {0, 1}: x = 1, y = 1
        let mut acc = MceAccumulator::new(1, false);
        acc.add(&clique(&[0, 1]));
        assert_eq!(acc.value(), 1.0);
    }
}
