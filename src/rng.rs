//! Seeding helpers for the generator's random source. Everything downstream
//! takes `&mut StdRng`, so a sequence can be checkpointed at any point by
//! cloning the generator.

use std::hash::{DefaultHasher, Hash, Hasher};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic RNG from an arbitrary byte-string seed: the same seed
/// always reproduces the same puzzle.
pub fn from_seed(seed: &[u8]) -> StdRng {
    // DefaultHasher::new() is fixed-key, so this is stable across runs.
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    StdRng::seed_from_u64(hasher.finish())
}

pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}
