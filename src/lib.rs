//! Dust density field built from smoothed-particle (SPH) gas data.
//!
//! Particles are validated into a [`ParticleStore`], indexed by a uniform
//! [`ParticleGrid`], and exposed through [`SphDustDistribution`], which
//! evaluates point densities, box masses and total mass, and draws random
//! positions distributed like the dust for Monte Carlo transport.
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use sph_dust::{BoundingBox, FieldConfig, ParticleRecord, SphDustDistribution};
//!
//! let records = [ParticleRecord::new([0.0, 0.0, 0.0], 1.0, 1.0, 1.0)];
//! let field = SphDustDistribution::new(FieldConfig::new(), &records).unwrap();
//!
//! assert!((field.mass() - 1.0).abs() < 1e-12);
//! assert!(field.density([5.0, 0.0, 0.0]) == 0.0);
//! let all = BoundingBox::around([0.0, 0.0, 0.0], 2.0);
//! assert!((field.mass_in_box(&all) - 1.0).abs() < 1e-12);
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let position = field.generate_position(&mut rng).unwrap();
//! assert!(position.iter().all(|x| x.is_finite()));
//! ```

pub mod bounding_box;
pub mod components;
pub mod config;
pub mod distribution;
pub mod error;
pub mod grid;
pub mod kernel;
pub mod particle;
pub mod particle_store;
pub mod sampling;
pub mod utilities;

pub use bounding_box::{Axis, BoundingBox};
pub use components::DustComponents;
pub use config::FieldConfig;
pub use distribution::{SphDustDistribution, SphDustDistributionBuilder};
pub use error::FieldError;
pub use grid::{GridStatistics, ParticleGrid};
pub use particle::{ParticleRecord, SphParticle};
pub use particle_store::ParticleStore;
pub use sampling::{CumulativeDistribution, PositionSampler};
