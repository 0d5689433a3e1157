//! Seedable random sources
//!
//! All randomness goes through xoshiro256++. It is fast, has good statistical
//! properties, and supports `jump()`, which advances the state by 2^128 draws.
//! The generator uses jumps to hand every batch its own non-overlapping stream,
//! so a run is reproducible from one seed whatever the thread count.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// RNG used for every draw in a trace
pub type TraceRng = Xoshiro256PlusPlus;

/// Create an RNG from a fixed seed
pub fn seeded_rng(seed: u64) -> TraceRng {
    TraceRng::seed_from_u64(seed)
}

/// Pick a fresh seed from the thread-local entropy source
///
/// The seed (rather than an entropy-seeded RNG) is returned so the caller can
/// log it and the run can be replayed exactly.
pub fn random_seed() -> u64 {
    rand::random()
}

/// Iterator of independent per-batch RNG streams derived from one seed
///
/// Stream `k` is the seeded state jumped `k` times.
pub struct BatchStreams {
    next: TraceRng,
}

impl BatchStreams {
    pub fn new(seed: u64) -> Self {
        Self {
            next: seeded_rng(seed),
        }
    }

    /// Hand out the next stream and advance past it
    pub fn next_stream(&mut self) -> TraceRng {
        let stream = self.next.clone();
        self.next.jump();
        stream
    }
}

impl Iterator for BatchStreams {
    type Item = TraceRng;

    fn next(&mut self) -> Option<TraceRng> {
        Some(self.next_stream())
    }
}
