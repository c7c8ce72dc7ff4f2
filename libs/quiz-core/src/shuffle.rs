//! In-place Fisher–Yates shuffle over an injected random source.

use rand::Rng;

/// Shuffle `items` in place.
///
/// Walks from the last index down to 1, swapping each element with one
/// drawn uniformly from `0..=i`. Every permutation is equally likely for a
/// uniform `rng`, and a seeded `rng` gives a reproducible order.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
