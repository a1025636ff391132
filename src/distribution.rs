use crate::bounding_box::{Axis, BoundingBox};
use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::grid::{GridStatistics, ParticleGrid};
use crate::particle::ParticleRecord;
use crate::particle_store::ParticleStore;
use crate::sampling::PositionSampler;
use rand::Rng;

/// Number of density samples used for each surface density estimate.
pub const SIGMA_SAMPLES: usize = 10_000;

/// Collects particle records and configuration before the field exists.
///
/// The builder has no query methods: a dust distribution can only be queried
/// after [`SphDustDistributionBuilder::build`] has consumed the builder, so a
/// half-built field is never observable.
#[derive(Debug, Clone, Default)]
pub struct SphDustDistributionBuilder {
    config: FieldConfig,
    records: Vec<ParticleRecord>,
}

impl SphDustDistributionBuilder {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
        }
    }

    /// Append a single particle record
    pub fn add_record(&mut self, record: ParticleRecord) -> &mut Self {
        self.records.push(record);
        self
    }

    /// Append records in order
    pub fn extend_records<I>(&mut self, records: I) -> &mut Self
    where
        I: IntoIterator<Item = ParticleRecord>,
    {
        self.records.extend(records);
        self
    }

    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    /// Validate the configuration, load the particles, and build the grid and
    /// the sampling distribution.
    pub fn build(self) -> Result<SphDustDistribution, FieldError> {
        self.config.validate()?;

        let store = ParticleStore::from_records(&self.records, self.config.temperature_cutoff())?;
        if store.suppressed() {
            log::warn!("Total cold and/or metallic gas mass is negative; suppressing all dust");
        }
        log::info!("Number of high-temperature particles ignored: {}", store.num_ignored());
        log::info!("Number of SPH gas particles containing dust: {}", store.len());
        log::info!("Total gas mass: {}", store.total_mass());
        log::info!("Total metal mass: {}", store.total_metal_mass());

        let g = self.config.grid_resolution;
        log::info!("Constructing intermediate {}x{}x{} grid for particles...", g, g, g);
        let grid = ParticleGrid::new(&store, g, self.config.support_multiplier)?;
        let stats = grid.statistics();
        log::info!("Smallest number of particles per cell: {}", stats.min_particles_per_cell);
        log::info!("Largest  number of particles per cell: {}", stats.max_particles_per_cell);
        log::info!(
            "Average  number of particles per cell: {:.1}",
            stats.average_particles_per_cell()
        );

        let sampler = PositionSampler::new(&store);
        log::debug!("Cumulative distribution over {} particles", sampler.cumulative().len());

        Ok(SphDustDistribution {
            config: self.config,
            store,
            grid,
            sampler,
        })
    }
}

/// Dust density field reconstructed from SPH gas particles.
///
/// Every query takes `&self` and reads only data fixed at build time, so one
/// distribution can be shared by any number of threads without locking.
/// All densities and masses are clamped to be non-negative.
#[derive(Debug, Clone)]
pub struct SphDustDistribution {
    config: FieldConfig,
    store: ParticleStore,
    grid: ParticleGrid,
    sampler: PositionSampler,
}

impl SphDustDistribution {
    /// Build a distribution directly from a slice of records
    pub fn new(config: FieldConfig, records: &[ParticleRecord]) -> Result<Self, FieldError> {
        let mut builder = SphDustDistributionBuilder::new(config);
        builder.extend_records(records.iter().copied());
        builder.build()
    }

    pub fn builder(config: FieldConfig) -> SphDustDistributionBuilder {
        SphDustDistributionBuilder::new(config)
    }

    /// Spatial dimension of the distribution
    pub fn dimension(&self) -> usize {
        3
    }

    pub fn num_components(&self) -> usize {
        1
    }

    /// Dust mass density at `position`
    pub fn density(&self, position: [f64; 3]) -> f64 {
        let sum: f64 = self
            .grid
            .particles_for_point(position)
            .iter()
            .map(|&i| self.store[i].metal_density(position))
            .sum();
        (sum * self.config.dust_fraction).max(0.0)
    }

    /// Dust mass inside the axis-aligned box `bbox`.
    ///
    /// Each particle's share is integrated with the truncated Gaussian of
    /// [`crate::kernel::box_fraction_1d`], not with the cubic spline used by
    /// [`density`](Self::density). Boxes covering whole supports agree
    /// exactly with the total mass, but a box cutting through a support can
    /// differ by a few percent from the integral of `density` over it.
    pub fn mass_in_box(&self, bbox: &BoundingBox) -> f64 {
        let sum: f64 = self
            .grid
            .particles_for_box(bbox)
            .iter()
            .map(|&i| self.store[i].metal_mass_in_box(bbox))
            .sum();
        (sum * self.config.dust_fraction).max(0.0)
    }

    /// Total dust mass
    pub fn mass(&self) -> f64 {
        let sum: f64 = self.store.iter().map(|p| p.metal_mass()).sum();
        (sum * self.config.dust_fraction).max(0.0)
    }

    /// Surface density along the given principal axis through the origin.
    ///
    /// This is a Monte Carlo style estimate: the density is sampled at
    /// [`SIGMA_SAMPLES`] equally spaced points across the grid extent, and
    /// the mean is multiplied by the extent length. Narrow features between
    /// the sample points can be missed, so treat the result as approximate.
    pub fn sigma(&self, axis: Axis) -> f64 {
        let extent = match self.grid.extent() {
            Some(extent) => extent,
            None => return 0.0,
        };
        let min = extent.min(axis);
        let length = extent.extent(axis);
        let mut sum = 0.0;
        let mut position = [0.0; 3];
        for k in 0..SIGMA_SAMPLES {
            position[axis.index()] = min + k as f64 * length / SIGMA_SAMPLES as f64;
            sum += self.density(position);
        }
        (sum / SIGMA_SAMPLES as f64) * length
    }

    pub fn sigma_x(&self) -> f64 {
        self.sigma(Axis::X)
    }

    pub fn sigma_y(&self) -> f64 {
        self.sigma(Axis::Y)
    }

    pub fn sigma_z(&self) -> f64 {
        self.sigma(Axis::Z)
    }

    /// Random position drawn from the dust density, `None` when the field holds no dust.
    ///
    /// The random source is supplied by the caller, so seeding stays under its control.
    pub fn generate_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<[f64; 3]> {
        self.sampler.sample(&self.store, rng)
    }

    pub fn num_particles(&self) -> usize {
        self.store.len()
    }

    /// Number of particles ignored because they were too hot
    pub fn num_ignored(&self) -> usize {
        self.store.num_ignored()
    }

    pub fn particle_center(&self, index: usize) -> Result<[f64; 3], FieldError> {
        self.store
            .get(index)
            .map(|p| p.center())
            .ok_or_else(|| FieldError::ParticleIndexOutOfRange {
                index,
                count: self.store.len(),
            })
    }

    /// True when a negative total mass caused all dust to be suppressed
    pub fn suppressed(&self) -> bool {
        self.store.suppressed()
    }

    /// Whether `mass_in_box` results are meaningful for building dust grids.
    ///
    /// Individual negative-mass particles can make partial box masses
    /// inconsistent even when the totals are positive.
    pub fn supports_mass_in_box(&self) -> bool {
        !self.store.has_negative_masses()
    }

    pub fn grid_statistics(&self) -> &GridStatistics {
        self.grid.statistics()
    }

    pub fn grid(&self) -> &ParticleGrid {
        &self.grid
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}
