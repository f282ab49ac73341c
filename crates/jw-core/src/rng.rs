//! Seeded random source for jewel design
//!
//! Every roll a design makes comes from one `GameRng`, so a jewel can be
//! regenerated from its seed alone.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ChaCha8-backed roller with roguelike-style helpers.
///
/// `Clone` copies the stream position: a clone replays exactly the rolls
/// the source roller would make next. The property selector prices purchases
/// on clones so the real stream is left alone.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Serialized as the bare seed; a deserialized roller starts its stream over
impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(GameRng::new)
    }
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeded from the OS; the seed is still recorded
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform in `0..n`; 0 when `n` is 0
    pub fn rn2(&mut self, n: u32) -> u32 {
        match n {
            0 => 0,
            _ => self.rng.gen_range(0..n),
        }
    }

    /// Uniform in `1..=n`; 0 when `n` is 0
    pub fn rnd(&mut self, n: u32) -> u32 {
        match n {
            0 => 0,
            _ => self.rng.gen_range(1..=n),
        }
    }

    /// Signed `rn2` for budget arithmetic; 0 when `n <= 0`
    pub fn randint0(&mut self, n: i32) -> i32 {
        if n > 0 { self.rng.gen_range(0..n) } else { 0 }
    }

    /// Signed `rnd` for budget arithmetic; 0 when `n <= 0`
    pub fn randint1(&mut self, n: i32) -> i32 {
        if n > 0 { self.rng.gen_range(1..=n) } else { 0 }
    }

    pub fn one_in(&mut self, n: u32) -> bool {
        self.rn2(n) == 0
    }

    pub fn percent(&mut self, chance: u32) -> bool {
        self.rn2(100) < chance
    }

    /// Uniform pick from a slice; `None` if it is empty
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let len = u32::try_from(items.len()).ok()?;
        items.get(self.rn2(len) as usize)
    }

    /// Pick from `(item, weight)` pairs in proportion to weight; `None` if
    /// every weight is zero
    pub fn choose_weighted<'a, T>(&mut self, items: &'a [(T, u32)]) -> Option<&'a T> {
        let total: u32 = items.iter().map(|(_, w)| *w).sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.rn2(total);
        items.iter().find_map(|(item, weight)| {
            if roll < *weight {
                Some(item)
            } else {
                roll -= weight;
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            assert!(rng.rn2(10) < 10);
            assert!((1..=6).contains(&rng.rnd(6)));
            assert!((1..=6).contains(&rng.randint1(6)));
            assert!((0..4).contains(&rng.randint0(4)));
        }
    }

    #[test]
    fn test_degenerate_bounds_roll_zero() {
        let mut rng = GameRng::new(42);
        assert_eq!(rng.rn2(0), 0);
        assert_eq!(rng.rnd(0), 0);
        assert_eq!(rng.randint1(0), 0);
        assert_eq!(rng.randint1(-3), 0);
        assert_eq!(rng.randint0(-3), 0);
        assert_eq!(rng.choose::<u8>(&[]), None);
    }

    #[test]
    fn test_clone_replays_stream() {
        let mut rng = GameRng::new(7);
        rng.rn2(100);
        let mut copy = rng.clone();
        for _ in 0..50 {
            assert_eq!(rng.rn2(1000), copy.rn2(1000));
        }
    }

    #[test]
    fn test_seed_roundtrip() {
        let rng = GameRng::new(1234);
        let json = serde_json::to_string(&rng).unwrap();
        assert_eq!(json, "1234");
        let back: GameRng = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed(), 1234);
    }

    #[test]
    fn test_choose_weighted_skips_zero_weight() {
        let mut rng = GameRng::new(3);
        let items = [("never", 0), ("always", 5)];
        for _ in 0..100 {
            assert_eq!(rng.choose_weighted(&items), Some(&"always"));
        }
        let empty: [(u8, u32); 1] = [(1, 0)];
        assert_eq!(rng.choose_weighted(&empty), None);
    }
}
