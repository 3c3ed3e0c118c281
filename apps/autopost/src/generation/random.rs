//! Injectable randomness. Production seeds from entropy; tests pass a fixed seed.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource: Send {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

pub struct StdRandom(StdRng);

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for StdRandom {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Shared handle to a `RandomSource`. Each draw takes the lock briefly; it is
/// never held across an await.
pub struct Dice {
    source: Mutex<Box<dyn RandomSource>>,
}

impl Dice {
    pub fn new(source: impl RandomSource + 'static) -> Self {
        Self {
            source: Mutex::new(Box::new(source)),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRandom::from_entropy())
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRandom::seeded(seed))
    }

    pub fn unit(&self) -> f64 {
        // A poisoned lock only means another draw panicked; the RNG state is still usable.
        let mut source = self.source.lock().unwrap_or_else(|e| e.into_inner());
        source.next_unit()
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.unit() * len as f64) as usize).min(len.saturating_sub(1))
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.index(items.len()))
    }

    /// Uniform integer in `[min, max]`. Swapped bounds are normalized.
    pub fn range_inclusive(&self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = u64::from(hi - lo) + 1;
        lo + ((self.unit() * span as f64) as u64).min(span - 1) as u32
    }
}
