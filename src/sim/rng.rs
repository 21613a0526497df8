//! Injectable uniform random source
//!
//! Gameplay draws go through [`UniformSource`] so tests can script exact
//! outcomes while production uses a seeded PCG stream.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Anything that can produce uniform floats in [0, 1)
pub trait UniformSource {
    fn next_uniform(&mut self) -> f32;
}

impl UniformSource for Pcg32 {
    #[inline]
    fn next_uniform(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// PCG stream for a run seed
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Fresh run seed from the thread-local generator
pub fn random_seed() -> u64 {
    rand::random()
}

/// Replays a fixed list of draws, cycling when exhausted
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedSource {
    values: Vec<f32>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(values: &[f32]) -> Self {
        assert!(!values.is_empty());
        Self {
            values: values.to_vec(),
            cursor: 0,
        }
    }

    /// Always returns the same draw
    pub(crate) fn constant(value: f32) -> Self {
        Self::new(&[value])
    }
}

#[cfg(test)]
impl UniformSource for ScriptedSource {
    fn next_uniform(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
