//! Seeded random sources with ChaCha8.
//!
//! A `(seed, stream)` pair always yields the same sequence. Different
//! streams under one seed are independent, so replicas of a sampling run
//! never share draws.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG for a given seed and stream.
pub fn stream_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

/// Seeded RNG when a seed is configured, otherwise one seeded from the OS.
pub fn session_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => stream_rng(seed, 0),
        None => ChaCha8Rng::from_entropy(),
    }
}
