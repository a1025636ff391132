//! Uniform grid over the particle space.
//!
//! The grid covers the bounding box of all particle supports with `G×G×G`
//! equally sized cells. Each cell lists the indices (into the
//! [`ParticleStore`]) of every particle whose support cube overlaps it, so a
//! point lookup only needs the single cell containing the point.

use crate::bounding_box::{Axis, BoundingBox};
use crate::error::FieldError;
use crate::particle_store::ParticleStore;

/// Occupancy statistics gathered while building a [`ParticleGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridStatistics {
    pub num_cells: usize,
    pub min_particles_per_cell: usize,
    pub max_particles_per_cell: usize,
    /// Sum of the cell list lengths. A particle overlapping several cells
    /// is counted once per cell.
    pub total_placements: usize,
}

impl GridStatistics {
    pub fn average_particles_per_cell(&self) -> f64 {
        if self.num_cells == 0 {
            0.0
        } else {
            self.total_placements as f64 / self.num_cells as f64
        }
    }
}

/// Spatial index mapping grid cells to the particles that overlap them.
///
/// Built once from a [`ParticleStore`] and never modified afterwards.
#[derive(Debug, Clone)]
pub struct ParticleGrid {
    resolution: usize,
    extent: Option<BoundingBox>,
    cell_width: [f64; 3],
    cells: Vec<Vec<usize>>,
    statistics: GridStatistics,
}

impl ParticleGrid {
    /// Build the grid for `store` with `resolution` cells per axis.
    ///
    /// Each particle is placed in the inclusive range of cells covering the
    /// cube of half-width `support_multiplier·h` around its center. An empty
    /// store yields an empty grid whose queries all return nothing.
    pub fn new(
        store: &ParticleStore,
        resolution: usize,
        support_multiplier: f64,
    ) -> Result<Self, FieldError> {
        if resolution < 1 {
            return Err(FieldError::InvalidGridResolution(resolution));
        }

        let extent = match store
            .iter()
            .map(|p| BoundingBox::around(p.center(), support_multiplier * p.radius()))
            .reduce(|a, b| a.union(&b))
        {
            Some(extent) => extent,
            None => return Ok(Self::empty(resolution)),
        };

        for axis in Axis::ALL {
            let width = extent.extent(axis);
            // also catches NaN
            if !(width > 0.0) {
                return Err(FieldError::NonPositiveExtent {
                    axis,
                    extent: width,
                });
            }
        }

        let num_cells =
            cell_count(resolution).ok_or(FieldError::InvalidGridResolution(resolution))?;

        let g = resolution as f64;
        let cell_width = [extent.width[0] / g, extent.width[1] / g, extent.width[2] / g];
        let mut grid = ParticleGrid {
            resolution,
            extent: Some(extent),
            cell_width,
            cells: vec![Vec::new(); num_cells],
            statistics: GridStatistics::default(),
        };

        for (index, particle) in store.iter().enumerate() {
            let support =
                BoundingBox::around(particle.center(), support_multiplier * particle.radius());
            let (lower, upper) = grid.cell_range(&support);
            for k in lower[2]..=upper[2] {
                for j in lower[1]..=upper[1] {
                    for i in lower[0]..=upper[0] {
                        let flat = grid.flat_index(i, j, k);
                        grid.cells[flat].push(index);
                    }
                }
            }
        }

        grid.statistics = GridStatistics {
            num_cells: grid.cells.len(),
            min_particles_per_cell: grid.cells.iter().map(Vec::len).min().unwrap_or(0),
            max_particles_per_cell: grid.cells.iter().map(Vec::len).max().unwrap_or(0),
            total_placements: grid.cells.iter().map(Vec::len).sum(),
        };
        Ok(grid)
    }

    fn empty(resolution: usize) -> Self {
        ParticleGrid {
            resolution,
            extent: None,
            cell_width: [0.0; 3],
            cells: Vec::new(),
            statistics: GridStatistics::default(),
        }
    }

    /// Number of cells along each axis
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Box covered by the grid, `None` when the grid holds no particles
    pub fn extent(&self) -> Option<&BoundingBox> {
        self.extent.as_ref()
    }

    pub fn cell_width(&self) -> [f64; 3] {
        self.cell_width
    }

    pub fn statistics(&self) -> &GridStatistics {
        &self.statistics
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Particles listed in the cell with integer coordinates `(i, j, k)`
    pub fn cell(&self, i: usize, j: usize, k: usize) -> Option<&[usize]> {
        let g = self.resolution;
        if self.cells.is_empty() || i >= g || j >= g || k >= g {
            return None;
        }
        Some(&self.cells[self.flat_index(i, j, k)])
    }

    /// Indices of all particles whose support may contain `position`.
    ///
    /// Points outside the grid lie outside every particle support, so they
    /// get an empty slice.
    pub fn particles_for_point(&self, position: [f64; 3]) -> &[usize] {
        match &self.extent {
            Some(extent) if extent.contains(position) => {
                let i = self.cell_coordinate(0, position[0]);
                let j = self.cell_coordinate(1, position[1]);
                let k = self.cell_coordinate(2, position[2]);
                &self.cells[self.flat_index(i, j, k)]
            }
            _ => &[],
        }
    }

    /// Indices of all particles whose support may overlap `bbox`.
    ///
    /// The union over the touched cells, deduplicated and in store order.
    pub fn particles_for_box(&self, bbox: &BoundingBox) -> Vec<usize> {
        match &self.extent {
            Some(extent) if extent.intersects(bbox) => {}
            _ => return Vec::new(),
        }

        let (lower, upper) = self.cell_range(bbox);
        let mut indices = Vec::new();
        for k in lower[2]..=upper[2] {
            for j in lower[1]..=upper[1] {
                for i in lower[0]..=upper[0] {
                    indices.extend_from_slice(&self.cells[self.flat_index(i, j, k)]);
                }
            }
        }
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    #[inline]
    fn flat_index(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.resolution * (j + self.resolution * k)
    }

    /// Cell coordinate along `axis` containing `value`, clipped to the grid
    #[inline]
    fn cell_coordinate(&self, axis: usize, value: f64) -> usize {
        let lower = match &self.extent {
            Some(extent) => extent.lower_left[axis],
            None => return 0,
        };
        let t = ((value - lower) / self.cell_width[axis]).floor();
        if t <= 0.0 {
            0
        } else {
            (t as usize).min(self.resolution - 1)
        }
    }

    fn cell_range(&self, bbox: &BoundingBox) -> ([usize; 3], [usize; 3]) {
        let mut lower = [0; 3];
        let mut upper = [0; 3];
        for axis in 0..3 {
            lower[axis] = self.cell_coordinate(axis, bbox.lower_left[axis]);
            upper[axis] = self.cell_coordinate(axis, bbox.upper_right[axis]);
        }
        (lower, upper)
    }
}

/// Number of cells in a `resolution³` grid, `None` if the cell table could not be allocated
fn cell_count(resolution: usize) -> Option<usize> {
    let cells = resolution.checked_pow(3)?;
    let bytes = cells.checked_mul(std::mem::size_of::<Vec<usize>>())?;
    (bytes <= isize::MAX as usize).then_some(cells)
}
