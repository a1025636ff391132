use crate::bounding_box::Axis;
use thiserror::Error;

/// Errors raised while configuring, building or querying a dust field.
///
/// Configuration problems abort construction, so a partially built field is
/// never handed out. Usage errors indicate a caller defect (asking for a
/// particle or component that does not exist).
///
/// A negative total gas or metal mass is not an error: the field is
/// suppressed instead and reports this through
/// [`crate::SphDustDistribution::suppressed`].
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("grid resolution must be at least 1, got {0}")]
    InvalidGridResolution(usize),

    #[error("bounding extent along the {axis} axis must be positive, got {extent}")]
    NonPositiveExtent { axis: Axis, extent: f64 },

    #[error("dust-to-metal fraction must be finite and non-negative, got {0}")]
    InvalidDustFraction(f64),

    #[error("support multiplier must be finite and at least 1, got {0}")]
    InvalidSupportMultiplier(f64),

    #[error("particle record {index} is invalid: {reason}")]
    InvalidParticle { index: usize, reason: String },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("particle index {index} out of range (field holds {count} particles)")]
    ParticleIndexOutOfRange { index: usize, count: usize },

    #[error("component index {index} out of range (field has {count} components)")]
    ComponentOutOfRange { index: usize, count: usize },
}
