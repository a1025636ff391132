use crate::kernel;
use crate::particle_store::ParticleStore;
use crate::utilities::{locate_clip, normalized_cdf};
use nalgebra::Vector3;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Normalised cumulative distribution over per-particle weights.
///
/// Entry `i` holds the summed weight of particles `0..=i` divided by the
/// total weight, so the last entry is 1. The distribution is empty when
/// there is nothing to sample (no particles, or all weights zero).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CumulativeDistribution {
    values: Vec<f64>,
}

impl CumulativeDistribution {
    pub fn from_weights<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            values: normalized_cdf(weights),
        }
    }

    /// Distribution weighting each particle of `store` by its metal mass
    pub fn from_metal_masses(store: &ParticleStore) -> Self {
        Self::from_weights(store.iter().map(|p| p.metal_mass()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Index selected by the uniform deviate `u`
    pub fn locate(&self, u: f64) -> Option<usize> {
        locate_clip(&self.values, u)
    }

    /// Draw an index with probability proportional to its weight
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.values.is_empty() {
            return None;
        }
        let u: f64 = rng.gen();
        self.locate(u)
    }
}

/// Draws random positions distributed like the dust density.
///
/// A particle is chosen with probability proportional to its metal mass, and
/// the position is offset from its center by a three-dimensional Gaussian
/// with standard deviation `h / (2.42·√2)`. The Gaussian stands in for the
/// cubic spline kernel, which has nearly the same second moment but no cheap
/// exact sampling method.
#[derive(Debug, Clone, Default)]
pub struct PositionSampler {
    cumulative: CumulativeDistribution,
}

impl PositionSampler {
    pub fn new(store: &ParticleStore) -> Self {
        Self {
            cumulative: CumulativeDistribution::from_metal_masses(store),
        }
    }

    pub fn cumulative(&self) -> &CumulativeDistribution {
        &self.cumulative
    }

    /// True when sampling would never produce a position
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Sample a position, or `None` if there is no dust to sample from.
    ///
    /// `store` must be the store the sampler was built from.
    pub fn sample<R: Rng + ?Sized>(&self, store: &ParticleStore, rng: &mut R) -> Option<[f64; 3]> {
        let index = self.cumulative.sample_index(rng)?;
        let particle = store.get(index)?;

        let x: f64 = StandardNormal.sample(rng);
        let y: f64 = StandardNormal.sample(rng);
        let z: f64 = StandardNormal.sample(rng);
        let offset = Vector3::new(x, y, z) * kernel::gaussian_sigma(particle.radius());

        Some((Vector3::from(particle.center()) + offset).into())
    }
}
