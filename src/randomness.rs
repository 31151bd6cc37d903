use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// The random choices a maze generator makes.
///
/// Every `rand::Rng` is a `RandomSource`. Tests can script the choices with their own implementation.
pub trait RandomSource {
    /// A uniformly chosen index in `0..len`. `len` must be positive.
    fn pick_index(&mut self, len: usize) -> usize;

    /// `amount` distinct indices in `0..len`, uniformly chosen without replacement.
    /// `amount` must not exceed `len`.
    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize>;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        index::sample(self, len, amount).into_vec()
    }
}

/// A fast, non cryptographic generator. Runs with the same seed make the same maze.
pub fn seeded_rng(seed: Option<u64>) -> XorShiftRng {
    match seed {
        Some(s) => XorShiftRng::seed_from_u64(s),
        None => XorShiftRng::from_entropy(),
    }
}


#[cfg(test)]
mod tests {

    use itertools::Itertools;

    use super::*;

    #[test]
    fn picks_stay_in_range() {
        let mut rng = seeded_rng(Some(7));
        for len in 1..20 {
            for _ in 0..50 {
                assert!(rng.pick_index(len) < len);
            }
        }
    }

    #[test]
    fn samples_are_distinct() {
        let mut rng = seeded_rng(Some(11));
        let sample = rng.sample_indices(10, 10);
        assert_eq!(sample.iter().cloned().sorted().collect::<Vec<_>>(),
                   (0..10).collect::<Vec<usize>>());
        assert!(rng.sample_indices(5, 0).is_empty());
    }

    #[test]
    fn same_seed_same_choices() {
        let mut a = seeded_rng(Some(42));
        let mut b = seeded_rng(Some(42));
        let picks_a = (0..32).map(|_| a.pick_index(1000)).collect::<Vec<_>>();
        let picks_b = (0..32).map(|_| b.pick_index(1000)).collect::<Vec<_>>();
        assert_eq!(picks_a, picks_b);
    }
}
