//! Injectable randomness for simulated outcomes.
//!
//! Every simulated figure (follower counts, send/charge success, analytics)
//! is drawn through [`SharedRandom`], so tests can swap the entropy-backed
//! generator for a constant or scripted sequence.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A source of uniform values in `[0, 1)`.
pub trait RandomSource: Send {
    fn next_f64(&mut self) -> f64;
}

/// Pseudo-random generator, seeded or drawn from entropy.
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self { rng }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Always yields the same value.
pub struct ConstantRandom(f64);

impl ConstantRandom {
    pub fn new(value: f64) -> Self {
        Self(clamp_unit(value))
    }
}

impl RandomSource for ConstantRandom {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

/// Cycles through a fixed list of values.
pub struct ScriptedRandom {
    values: Vec<f64>,
    pos: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values: values.into_iter().map(clamp_unit).collect(),
            pos: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0 - f64::EPSILON)
}

/// Cloneable handle to a random source shared between agents.
#[derive(Clone)]
pub struct SharedRandom {
    inner: Arc<Mutex<Box<dyn RandomSource>>>,
}

impl SharedRandom {
    pub fn new(source: impl RandomSource + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(source))),
        }
    }

    pub fn seeded(seed: Option<u64>) -> Self {
        Self::new(SeededRandom::new(seed))
    }

    pub fn constant(value: f64) -> Self {
        Self::new(ConstantRandom::new(value))
    }

    pub fn scripted(values: Vec<f64>) -> Self {
        Self::new(ScriptedRandom::new(values))
    }

    /// Uniform value in `[0, 1)`.
    pub fn roll(&self) -> f64 {
        self.inner.lock().next_f64()
    }

    /// True with the given probability. A probability of 1.0 always succeeds
    /// and 0.0 never does.
    pub fn chance(&self, probability: f64) -> bool {
        self.roll() < probability
    }

    /// Integer in `[low, high)`. Returns `low` for an empty range.
    pub fn range(&self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        let span = high - low;
        let offset = (self.roll() * span as f64) as u64;
        low + offset.min(span - 1)
    }

    /// Float in `[low, high)`.
    pub fn range_f64(&self, low: f64, high: f64) -> f64 {
        low + self.roll() * (high - low)
    }

    /// Index into a collection of `len` items.
    pub fn index(&self, len: usize) -> usize {
        self.range(0, len as u64) as usize
    }
}

impl std::fmt::Debug for SharedRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRandom").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SharedRandom::seeded(Some(7));
        let b = SharedRandom::seeded(Some(7));
        let left: Vec<f64> = (0..5).map(|_| a.roll()).collect();
        let right: Vec<f64> = (0..5).map(|_| b.roll()).collect();
        assert_eq!(left, right);
        assert!(left.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_constant_chance() {
        let low = SharedRandom::constant(0.0);
        assert!(low.chance(0.7));
        assert!(!low.chance(0.0));

        let high = SharedRandom::constant(1.0);
        assert!(!high.chance(0.7));
        assert!(high.chance(1.0));
    }

    #[test]
    fn test_range_bounds() {
        assert_eq!(SharedRandom::constant(0.0).range(10, 20), 10);
        assert_eq!(SharedRandom::constant(1.0).range(10, 20), 19);
        assert_eq!(SharedRandom::constant(0.5).range(10, 20), 15);
        assert_eq!(SharedRandom::constant(0.5).range(5, 5), 5);
    }

    #[test]
    fn test_scripted_cycles() {
        let rng = SharedRandom::scripted(vec![0.1, 0.9]);
        assert_eq!(rng.roll(), 0.1);
        assert_eq!(rng.roll(), 0.9);
        assert_eq!(rng.roll(), 0.1);
    }

    #[test]
    fn test_scripted_empty_yields_zero() {
        let rng = SharedRandom::scripted(vec![]);
        assert_eq!(rng.roll(), 0.0);
    }

    #[test]
    fn test_clones_share_state() {
        let rng = SharedRandom::scripted(vec![0.2, 0.4]);
        let other = rng.clone();
        assert_eq!(rng.roll(), 0.2);
        assert_eq!(other.roll(), 0.4);
    }
}
