// Build-time configuration for the SPH dust field
use crate::error::FieldError;
use serde::{Deserialize, Serialize};

/// Default number of grid cells along each axis of the particle grid.
pub const DEFAULT_GRID_RESOLUTION: usize = 20;

/// Configuration for building an [`crate::SphDustDistribution`].
///
/// The configuration is passed explicitly to the builder; there is no global
/// instance. All fields have defaults, so a JSON document only needs to list
/// the values it overrides:
///
/// ```
/// use sph_dust::FieldConfig;
///
/// let config = FieldConfig::from_json_str(r#"{ "dust_fraction": 0.4 }"#).unwrap();
/// assert_eq!(config.grid_resolution, 20);
/// assert_eq!(config.dust_fraction, 0.4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of grid cells per axis (the grid holds `G×G×G` cells).
    pub grid_resolution: usize,
    /// Particles hotter than this are ignored. `None` or a non-positive
    /// value disables the filter.
    pub max_temperature: Option<f64>,
    /// Fraction of the metal mass locked up in dust grains.
    pub dust_fraction: f64,
    /// Compact-support radius of a particle in units of its smoothing length.
    pub support_multiplier: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            grid_resolution: DEFAULT_GRID_RESOLUTION,
            max_temperature: None,
            dust_fraction: 1.0,
            support_multiplier: 1.0,
        }
    }
}

impl FieldConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration document and validate it
    pub fn from_json_str(json: &str) -> Result<Self, FieldError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_grid_resolution(mut self, grid_resolution: usize) -> Self {
        self.grid_resolution = grid_resolution;
        self
    }

    pub fn with_max_temperature(mut self, max_temperature: f64) -> Self {
        self.max_temperature = Some(max_temperature);
        self
    }

    pub fn with_dust_fraction(mut self, dust_fraction: f64) -> Self {
        self.dust_fraction = dust_fraction;
        self
    }

    pub fn with_support_multiplier(mut self, support_multiplier: f64) -> Self {
        self.support_multiplier = support_multiplier;
        self
    }

    /// Effective temperature cutoff, `None` when filtering is disabled
    pub fn temperature_cutoff(&self) -> Option<f64> {
        self.max_temperature.filter(|t| *t > 0.0)
    }

    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.grid_resolution < 1 {
            return Err(FieldError::InvalidGridResolution(self.grid_resolution));
        }
        if !self.dust_fraction.is_finite() || self.dust_fraction < 0.0 {
            return Err(FieldError::InvalidDustFraction(self.dust_fraction));
        }
        if !self.support_multiplier.is_finite() || self.support_multiplier < 1.0 {
            return Err(FieldError::InvalidSupportMultiplier(self.support_multiplier));
        }
        Ok(())
    }
}
