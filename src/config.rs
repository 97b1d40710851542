use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Knobs for an equity run.
///
/// ```
/// use holdem_sim::config::SimConfig;
///
/// let cfg = SimConfig::default().with_samples(5_000).with_seed(7).with_workers(4);
/// assert_eq!(cfg.samples, 5_000);
/// assert_eq!(cfg.opponents, 3);
/// assert_eq!(cfg.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SimConfig {
    /// Monte-Carlo trials per estimate.
    pub samples: u32,
    /// Opponents holding random hole cards.
    pub opponents: usize,
    /// Fixed seed for reproducible runs; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Parallel workers sharing the trials. 1 runs on the calling thread.
    pub workers: usize,
}

impl SimConfig {
    pub const DEFAULT_SAMPLES: u32 = 1000;
    pub const DEFAULT_OPPONENTS: usize = 3;

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_opponents(mut self, opponents: usize) -> Self {
        self.opponents = opponents;
        self
    }

    /// Set a deterministic seed for reproducible estimates.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Zero is treated as one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Base RNG for this configuration.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::rng().next_u64()),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            samples: Self::DEFAULT_SAMPLES,
            opponents: Self::DEFAULT_OPPONENTS,
            seed: None,
            workers: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn defaults_match_the_simulator() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.samples, 1000);
        assert_eq!(cfg.opponents, 3);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.workers, 1);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let cfg = SimConfig::default().with_seed(99);
        let a: u64 = cfg.rng().random();
        let b: u64 = cfg.rng().random();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_workers_clamps_to_one() {
        assert_eq!(SimConfig::default().with_workers(0).workers, 1);
    }
}
