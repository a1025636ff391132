use crate::error::FieldError;
use crate::particle::{ParticleRecord, SphParticle};
use std::ops::Index;

/// Validated, immutable collection of SPH gas particles.
///
/// Particle order follows the input order; the grid and the cumulative
/// distribution used for sampling both refer to particles by their index in
/// this store.
///
/// If the total gas mass or the total metal mass of the retained particles
/// turns out negative, the whole set is discarded and both totals are zeroed.
/// The store is then `suppressed`, so the dust field it feeds disappears
/// instead of reporting negative densities.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<SphParticle>,
    total_mass: f64,
    total_metal_mass: f64,
    num_ignored: usize,
    suppressed: bool,
    negative_masses: bool,
}

impl ParticleStore {
    /// Build a store from raw records.
    ///
    /// A record is ignored when both its temperature and `max_temperature`
    /// are known and positive and the temperature exceeds the cutoff.
    pub fn from_records<'a, I>(records: I, max_temperature: Option<f64>) -> Result<Self, FieldError>
    where
        I: IntoIterator<Item = &'a ParticleRecord>,
    {
        let cutoff = max_temperature.filter(|t| *t > 0.0);
        let mut store = ParticleStore::default();

        for (index, record) in records.into_iter().enumerate() {
            if let (Some(t), Some(t_max)) = (record.known_temperature(), cutoff) {
                if t > t_max {
                    store.num_ignored += 1;
                    continue;
                }
            }
            let particle = SphParticle::from_record(record, index)?;
            store.total_mass += particle.mass();
            store.total_metal_mass += particle.metal_mass();
            if particle.mass() < 0.0 {
                store.negative_masses = true;
            }
            store.particles.push(particle);
        }

        if store.total_mass < 0.0 || store.total_metal_mass < 0.0 {
            store.particles.clear();
            store.total_mass = 0.0;
            store.total_metal_mass = 0.0;
            store.suppressed = true;
        }

        Ok(store)
    }

    /// Number of retained particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SphParticle> {
        self.particles.get(index)
    }

    pub fn particles(&self) -> &[SphParticle] {
        &self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SphParticle> {
        self.particles.iter()
    }

    /// Sum of the gas masses of the retained particles
    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    /// Sum of the metal masses of the retained particles
    pub fn total_metal_mass(&self) -> f64 {
        self.total_metal_mass
    }

    /// Number of particles dropped by the temperature cutoff
    pub fn num_ignored(&self) -> usize {
        self.num_ignored
    }

    /// True when a negative total forced the particle set to be discarded
    pub fn suppressed(&self) -> bool {
        self.suppressed
    }

    /// True when at least one particle with negative mass was read
    pub fn has_negative_masses(&self) -> bool {
        self.negative_masses
    }
}

impl Index<usize> for ParticleStore {
    type Output = SphParticle;

    fn index(&self, index: usize) -> &SphParticle {
        &self.particles[index]
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a SphParticle;
    type IntoIter = std::slice::Iter<'a, SphParticle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(x: f64, mass: f64, metallicity: f64) -> ParticleRecord {
        ParticleRecord::new([x, 0.0, 0.0], 1.0, mass, metallicity)
    }

    #[test]
    fn test_totals_accumulate() {
        let records = vec![record(0.0, 2.0, 0.5), record(1.0, 4.0, 0.25)];
        let store = ParticleStore::from_records(&records, None).unwrap();
        assert_eq!(store.len(), 2);
        assert!((store.total_mass() - 6.0).abs() < 1e-12);
        assert!((store.total_metal_mass() - 2.0).abs() < 1e-12);
        assert!(!store.suppressed());
        assert!(!store.has_negative_masses());
    }

    #[test]
    fn test_order_preserved() {
        let records: Vec<ParticleRecord> = (0..10).map(|i| record(i as f64, 1.0, 0.1)).collect();
        let store = ParticleStore::from_records(&records, None).unwrap();
        for (i, particle) in store.iter().enumerate() {
            assert_eq!(particle.center()[0], i as f64);
        }
        assert_eq!(store[3].center()[0], 3.0);
    }

    #[test]
    fn test_temperature_filter() {
        let records = vec![
            record(0.0, 1.0, 0.1).with_temperature(100.0),
            record(1.0, 1.0, 0.1).with_temperature(1e6),
            record(2.0, 1.0, 0.1),
            record(3.0, 1.0, 0.1).with_temperature(-1.0),
        ];
        let store = ParticleStore::from_records(&records, Some(1e4)).unwrap();
        assert_eq!(store.num_ignored(), 1);
        assert_eq!(store.len(), 3);
        assert_eq!(store[1].center()[0], 2.0);
    }

    #[test]
    fn test_temperature_filter_disabled() {
        let records = vec![record(0.0, 1.0, 0.1).with_temperature(1e9)];
        for cutoff in [None, Some(0.0), Some(-10.0)] {
            let store = ParticleStore::from_records(&records, cutoff).unwrap();
            assert_eq!(store.num_ignored(), 0);
            assert_eq!(store.len(), 1);
        }
    }

    #[test]
    fn test_negative_total_suppresses_everything() {
        let records = vec![record(0.0, 1.0, 0.1), record(1.0, -3.0, 0.1)];
        let store = ParticleStore::from_records(&records, None).unwrap();
        assert!(store.suppressed());
        assert!(store.is_empty());
        assert_eq!(store.total_mass(), 0.0);
        assert_eq!(store.total_metal_mass(), 0.0);
    }

    #[test]
    fn test_negative_particle_with_positive_total_is_kept() {
        let records = vec![record(0.0, 5.0, 0.1), record(1.0, -1.0, 0.1)];
        let store = ParticleStore::from_records(&records, None).unwrap();
        assert!(!store.suppressed());
        assert!(store.has_negative_masses());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_invalid_record_aborts() {
        let records = vec![record(0.0, 1.0, 0.1), ParticleRecord::new([0.0; 3], -1.0, 1.0, 0.1)];
        let result = ParticleStore::from_records(&records, None);
        assert!(matches!(
            result,
            Err(FieldError::InvalidParticle { index: 1, .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<ParticleRecord> = Vec::new();
        let store = ParticleStore::from_records(&records, None).unwrap();
        assert!(store.is_empty());
        assert!(!store.suppressed());
        assert_eq!(store.get(0), None);
    }
}
