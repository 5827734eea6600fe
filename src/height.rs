use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The tallest tower `CoinFlip` will ever produce.
pub const MAX_HEIGHT: usize = 32;

/// Chooses the height of each new tower as it is inserted.
///
/// `SkipMap` clamps whatever is returned into `1..=MAX_HEIGHT`.
pub trait HeightGenerator {
    fn gen_height(&mut self) -> usize;
}

/// Geometric heights with p = 1/2: flip a fair coin until it comes up heads
/// and count the flips, heads included.
pub struct CoinFlip {
    rng: StdRng,
}

impl CoinFlip {
    pub fn new() -> CoinFlip {
        CoinFlip { rng: StdRng::from_entropy() }
    }

    /// A generator that produces the same heights every time, for
    /// reproducible layouts.
    pub fn seeded(seed: u64) -> CoinFlip {
        CoinFlip { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for CoinFlip {
    fn default() -> CoinFlip {
        CoinFlip::new()
    }
}

impl HeightGenerator for CoinFlip {
    fn gen_height(&mut self) -> usize {
        // Each bit is one flip; the top bit forces heads on the last one.
        const MASK: u32 = 1 << (MAX_HEIGHT - 1);
        1 + (self.rng.gen::<u32>() | MASK).trailing_zeros() as usize
    }
}

impl<G: HeightGenerator + ?Sized> HeightGenerator for Box<G> {
    fn gen_height(&mut self) -> usize {
        (**self).gen_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heights_are_in_range() {
        let mut gen = CoinFlip::seeded(7);
        for _ in 0..10_000 {
            let h = gen.gen_height();
            assert!(h >= 1 && h <= MAX_HEIGHT);
        }
    }

    #[test]
    fn heights_are_roughly_geometric() {
        const SAMPLES: usize = 100_000;
        let mut gen = CoinFlip::seeded(42);
        let mut counts = [0usize; MAX_HEIGHT + 1];
        let mut total = 0;
        for _ in 0..SAMPLES {
            let h = gen.gen_height();
            counts[h] += 1;
            total += h;
        }

        let mean = total as f64 / SAMPLES as f64;
        assert!((mean - 2.0).abs() < 0.05, "mean height {}", mean);

        let ones = counts[1] as f64 / SAMPLES as f64;
        let twos = counts[2] as f64 / SAMPLES as f64;
        assert!((ones - 0.5).abs() < 0.01, "P(h = 1) = {}", ones);
        assert!((twos - 0.25).abs() < 0.01, "P(h = 2) = {}", twos);
    }

    #[test]
    fn seeded_is_reproducible() {
        let mut a = CoinFlip::seeded(99);
        let mut b = CoinFlip::seeded(99);
        for _ in 0..1000 {
            assert_eq!(a.gen_height(), b.gen_height());
        }
    }
}
