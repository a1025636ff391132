use crate::bounding_box::BoundingBox;
use crate::error::FieldError;
use crate::kernel;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// One row of an SPH gas particle catalog, in caller-normalised units.
///
/// A missing or non-positive temperature means "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Smoothing length
    pub h: f64,
    /// Gas mass
    pub mass: f64,
    /// Metallicity, the metal fraction of the gas mass
    pub metallicity: f64,
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl ParticleRecord {
    pub fn new(position: [f64; 3], h: f64, mass: f64, metallicity: f64) -> Self {
        Self {
            x: position[0],
            y: position[1],
            z: position[2],
            h,
            mass,
            metallicity,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Temperature if it is known (present and positive)
    pub fn known_temperature(&self) -> Option<f64> {
        self.temperature.filter(|t| *t > 0.0)
    }
}

impl From<[f64; 7]> for ParticleRecord {
    /// Column order `x, y, z, h, M, Z, T`
    fn from(row: [f64; 7]) -> Self {
        let [x, y, z, h, mass, metallicity, temperature] = row;
        Self {
            x,
            y,
            z,
            h,
            mass,
            metallicity,
            temperature: (temperature > 0.0).then_some(temperature),
        }
    }
}

/// An SPH gas particle carrying metals (and therefore dust).
///
/// Immutable once constructed; the metal mass is computed up front because
/// every density and mass query needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct SphParticle {
    center: [f64; 3],
    h: f64,
    mass: f64,
    metallicity: f64,
    metal_mass: f64,
}

impl SphParticle {
    pub fn new(center: [f64; 3], h: f64, mass: f64, metallicity: f64) -> Self {
        Self {
            center,
            h,
            mass,
            metallicity,
            metal_mass: mass * metallicity,
        }
    }

    /// Validate a raw record and convert it into a particle.
    ///
    /// `index` is the record's position in the input and is only used for
    /// the error message.
    pub fn from_record(record: &ParticleRecord, index: usize) -> Result<Self, FieldError> {
        let invalid = |reason: &str| FieldError::InvalidParticle {
            index,
            reason: reason.to_string(),
        };
        let values = [
            record.x,
            record.y,
            record.z,
            record.h,
            record.mass,
            record.metallicity,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid("non-finite value"));
        }
        if record.h <= 0.0 {
            return Err(invalid("smoothing length must be positive"));
        }
        if !(0.0..=1.0).contains(&record.metallicity) {
            return Err(invalid("metallicity must lie in [0, 1]"));
        }
        Ok(Self::new(
            [record.x, record.y, record.z],
            record.h,
            record.mass,
            record.metallicity,
        ))
    }

    pub fn center(&self) -> [f64; 3] {
        self.center
    }

    /// Smoothing length, which is also the radius of the kernel support
    pub fn radius(&self) -> f64 {
        self.h
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn metallicity(&self) -> f64 {
        self.metallicity
    }

    pub fn metal_mass(&self) -> f64 {
        self.metal_mass
    }

    /// Metal density contributed by this particle at `position`
    pub fn metal_density(&self, position: [f64; 3]) -> f64 {
        let offset = Vector3::from(position) - Vector3::from(self.center);
        self.metal_mass * kernel::density_weight(offset.norm(), self.h)
    }

    /// Metal mass of this particle inside `bbox`
    pub fn metal_mass_in_box(&self, bbox: &BoundingBox) -> f64 {
        let mut fraction = 1.0;
        for i in 0..3 {
            fraction *= kernel::box_fraction_1d(
                bbox.lower_left[i] - self.center[i],
                bbox.upper_right[i] - self.center[i],
                self.h,
            );
            if fraction == 0.0 {
                return 0.0;
            }
        }
        self.metal_mass * fraction
    }
}
