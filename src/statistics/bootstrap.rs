//! Bootstrap resampling of landing samples.
//!
//! Each resample draws `n` observations with replacement. Resample `i` is
//! driven by its own RNG seeded from `(seed, i)`, so the output is identical
//! whether the resamples run serially or on the rayon pool, and whatever
//! order workers finish in.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::sample::SampleSet;
use crate::types::{Observation, Vector2};

/// Counter-based RNG seed generation using SplitMix64.
///
/// A stateless mix of a base seed and a counter, so that neighbouring
/// resamples get well-separated RNG streams.
#[inline]
pub fn counter_rng_seed(base_seed: u64, counter: u64) -> u64 {
    // SplitMix64, see https://xoshiro.di.unimi.it/splitmix64.c
    let mut z = base_seed.wrapping_add(counter.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Resample with replacement into an existing buffer.
///
/// # Panics
///
/// Panics if `out.len() != data.len()`.
pub fn bootstrap_resample_into<R: Rng>(data: &[Observation], rng: &mut R, out: &mut [Observation]) {
    assert_eq!(
        out.len(),
        data.len(),
        "Output buffer must have same length as input data"
    );

    if data.is_empty() {
        return;
    }

    let n = data.len();
    for slot in out.iter_mut() {
        *slot = data[rng.random_range(0..n)];
    }
}

/// Resample with replacement into a new vector of the same length.
pub fn bootstrap_resample<R: Rng>(data: &[Observation], rng: &mut R) -> Vec<Observation> {
    let mut out = data.to_vec();
    bootstrap_resample_into(data, rng, &mut out);
    out
}

fn mean_of(data: &[Observation]) -> Vector2 {
    let sum = data
        .iter()
        .fold(Vector2::zeros(), |acc, o| acc + o.to_vector());
    sum / data.len() as f64
}

/// Generates bootstrap replicates of a [`SampleSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResamplingEngine {
    iterations: usize,
    seed: u64,
}

impl ResamplingEngine {
    /// Create an engine producing `iterations` resamples from `seed`.
    pub fn new(iterations: usize, seed: u64) -> Self {
        Self { iterations, seed }
    }

    /// Create an engine seeded from the process-local RNG.
    pub fn from_entropy(iterations: usize) -> Self {
        Self::new(iterations, rand::random())
    }

    /// Number of resamples generated per call.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The base seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn rng_for(&self, i: usize) -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(self.seed, i as u64))
    }

    /// Draw a single resample, the `index`-th of this engine's sequence.
    pub fn resample(&self, samples: &SampleSet, index: usize) -> Vec<Observation> {
        bootstrap_resample(samples.observations(), &mut self.rng_for(index))
    }

    /// Mean of every resample, in resample-index order.
    pub fn resample_means(&self, samples: &SampleSet) -> Vec<Vector2> {
        let data = samples.observations();
        let n = data.len();

        #[cfg(feature = "parallel")]
        let means: Vec<Vector2> = crate::thread_pool::install(|| {
            (0..self.iterations)
                .into_par_iter()
                .map_init(
                    || vec![Observation::new(0.0, 0.0); n],
                    |buffer, i| {
                        bootstrap_resample_into(data, &mut self.rng_for(i), buffer);
                        mean_of(buffer)
                    },
                )
                .collect()
        });

        #[cfg(not(feature = "parallel"))]
        let means: Vec<Vector2> = self.resample_means_serial(samples);

        tracing::debug!(
            iterations = self.iterations,
            seed = self.seed,
            sample_size = n,
            "bootstrap resample means computed"
        );

        means
    }

    /// Resample means computed on the calling thread only.
    ///
    /// Produces exactly the same values as [`resample_means`](Self::resample_means).
    pub fn resample_means_serial(&self, samples: &SampleSet) -> Vec<Vector2> {
        let data = samples.observations();
        let mut buffer = data.to_vec();
        (0..self.iterations)
            .map(|i| {
                bootstrap_resample_into(data, &mut self.rng_for(i), &mut buffer);
                mean_of(&buffer)
            })
            .collect()
    }
}
