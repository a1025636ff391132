use crate::bounding_box::BoundingBox;
use crate::distribution::SphDustDistribution;
use crate::error::FieldError;

/// A small fixed collection of dust distributions overlaid in the same space.
///
/// Per-component queries take a component index and fail with
/// [`FieldError::ComponentOutOfRange`] when it does not exist. Combined
/// queries sum over all components.
#[derive(Debug, Clone)]
pub struct DustComponents {
    components: Vec<SphDustDistribution>,
}

impl DustComponents {
    pub fn new(components: Vec<SphDustDistribution>) -> Self {
        Self { components }
    }

    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    pub fn component(&self, index: usize) -> Result<&SphDustDistribution, FieldError> {
        self.components
            .get(index)
            .ok_or_else(|| FieldError::ComponentOutOfRange {
                index,
                count: self.components.len(),
            })
    }

    pub fn density(&self, index: usize, position: [f64; 3]) -> Result<f64, FieldError> {
        Ok(self.component(index)?.density(position))
    }

    pub fn mass_in_box(&self, index: usize, bbox: &BoundingBox) -> Result<f64, FieldError> {
        Ok(self.component(index)?.mass_in_box(bbox))
    }

    pub fn mass(&self, index: usize) -> Result<f64, FieldError> {
        Ok(self.component(index)?.mass())
    }

    /// Summed density of all components
    pub fn total_density(&self, position: [f64; 3]) -> f64 {
        self.components.iter().map(|c| c.density(position)).sum()
    }

    /// Summed mass of all components
    pub fn total_mass(&self) -> f64 {
        self.components.iter().map(|c| c.mass()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SphDustDistribution> {
        self.components.iter()
    }
}

impl From<SphDustDistribution> for DustComponents {
    fn from(distribution: SphDustDistribution) -> Self {
        Self::new(vec![distribution])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::particle::ParticleRecord;

    fn field_at(x: f64, dust_fraction: f64) -> SphDustDistribution {
        let config = FieldConfig::new().with_dust_fraction(dust_fraction);
        SphDustDistribution::new(config, &[ParticleRecord::new([x, 0.0, 0.0], 1.0, 1.0, 1.0)])
            .unwrap()
    }

    #[test]
    fn test_single_component_from_distribution() {
        let components = DustComponents::from(field_at(0.0, 1.0));
        assert_eq!(components.num_components(), 1);
        assert!((components.mass(0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_component() {
        let components = DustComponents::from(field_at(0.0, 1.0));
        assert!(matches!(
            components.density(1, [0.0; 3]),
            Err(FieldError::ComponentOutOfRange { index: 1, count: 1 })
        ));
        assert!(components.mass(3).is_err());
        let bbox = BoundingBox::around([0.0; 3], 1.0);
        assert!(components.mass_in_box(2, &bbox).is_err());
    }

    #[test]
    fn test_totals_sum_components() {
        let components = DustComponents::new(vec![field_at(0.0, 1.0), field_at(0.0, 0.5)]);
        assert!((components.total_mass() - 1.5).abs() < 1e-12);
        let d0 = components.density(0, [0.2, 0.0, 0.0]).unwrap();
        let d1 = components.density(1, [0.2, 0.0, 0.0]).unwrap();
        assert!((d0 - 2.0 * d1).abs() < 1e-12);
        assert!((components.total_density([0.2, 0.0, 0.0]) - (d0 + d1)).abs() < 1e-12);
        assert_eq!(components.iter().count(), 2);
    }
}
