//! Adapter from `rand` generators to the engine's [`RandomSource`].

use battle_core::RandomSource;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Wraps any [`RngCore`] so it can feed evasion rolls.
#[derive(Clone, Debug)]
pub struct RandSource<R = ChaCha8Rng> {
    rng: R,
}

impl<R: RngCore> RandSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn inner(&self) -> &R {
        &self.rng
    }
}

impl RandSource<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seeded generator fast-forwarded to `word_pos`, as reported by
    /// [`RandSource::word_pos`].
    pub fn resumed(seed: u64, word_pos: u128) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_word_pos(word_pos);
        Self::new(rng)
    }

    pub fn word_pos(&self) -> u128 {
        self.rng.get_word_pos()
    }
}

impl<R: RngCore> RandomSource for RandSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}
