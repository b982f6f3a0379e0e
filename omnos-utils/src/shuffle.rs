//! In-place Fisher–Yates shuffle.
//!
//! Not suitable for anything security-sensitive: the default entry point uses
//! the thread-local pseudo-random generator.

use rand::Rng;

/// Shuffle `items` in place with the thread-local RNG and hand the same slice
/// back.
pub fn shuffle<T>(items: &mut [T]) -> &mut [T] {
    shuffle_with(items, &mut rand::thread_rng())
}

/// Shuffle `items` in place using `rng`.
///
/// Walks from the last index down to 1, swapping each element with one drawn
/// uniformly from `0..=i`. Every permutation is equally likely given a uniform
/// `rng`; a seeded `rng` makes the result reproducible.
pub fn shuffle_with<'a, T, R: Rng + ?Sized>(items: &'a mut [T], rng: &mut R) -> &'a mut [T] {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
    items
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn keeps_every_element() {
        let mut items: Vec<u32> = (0..100).collect();
        shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn returns_the_same_slice() {
        let mut items = vec![1, 2, 3];
        let ptr = items.as_ptr();
        let out = shuffle(&mut items);
        assert_eq!(out.as_ptr(), ptr);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn empty_and_single_are_untouched() {
        let mut empty: [u8; 0] = [];
        assert!(shuffle(&mut empty).is_empty());

        let mut one = ["only"];
        assert_eq!(shuffle(&mut one), ["only"]);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut a: Vec<u32> = (0..50).collect();
        let mut b = a.clone();
        shuffle_with(&mut a, &mut StdRng::seed_from_u64(7));
        shuffle_with(&mut b, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn positions_are_roughly_uniform() {
        // Where does element 0 of a 4-element slice end up?
        let mut rng = StdRng::seed_from_u64(42);
        let mut landed = [0u32; 4];
        for _ in 0..8000 {
            let mut items = [0, 1, 2, 3];
            shuffle_with(&mut items, &mut rng);
            let pos = items.iter().position(|&x| x == 0).expect("element present");
            landed[pos] += 1;
        }
        for count in landed {
            assert!((1600..2400).contains(&count), "skewed distribution: {landed:?}");
        }
    }
}
