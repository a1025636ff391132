use serde::{Deserialize, Serialize};
use std::fmt;

/// Principal axes of the Cartesian frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis in a `[f64; 3]` position
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Axis-aligned box given by its lower-left and upper-right corners.
///
/// Used both for the extent of the particle grid and for `mass_in_box`
/// queries. Center and width are cached because the grid reads them on
/// every lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lower_left: [f64; 3],
    pub upper_right: [f64; 3],
    pub center: [f64; 3],
    pub width: [f64; 3],
}

impl BoundingBox {
    pub fn new(lower_left: [f64; 3], upper_right: [f64; 3]) -> Self {
        let center = [
            0.5 * (lower_left[0] + upper_right[0]),
            0.5 * (lower_left[1] + upper_right[1]),
            0.5 * (lower_left[2] + upper_right[2]),
        ];
        let width = [
            upper_right[0] - lower_left[0],
            upper_right[1] - lower_left[1],
            upper_right[2] - lower_left[2],
        ];
        BoundingBox {
            lower_left,
            upper_right,
            center,
            width,
        }
    }

    /// Cube of half-width `half_width` centred on `center`
    pub fn around(center: [f64; 3], half_width: f64) -> Self {
        Self::new(
            [
                center[0] - half_width,
                center[1] - half_width,
                center[2] - half_width,
            ],
            [
                center[0] + half_width,
                center[1] + half_width,
                center[2] + half_width,
            ],
        )
    }

    /// Smallest box enclosing both `self` and `other`
    pub fn union(&self, other: &BoundingBox) -> Self {
        let mut lower = self.lower_left;
        let mut upper = self.upper_right;
        for i in 0..3 {
            lower[i] = lower[i].min(other.lower_left[i]);
            upper[i] = upper[i].max(other.upper_right[i]);
        }
        Self::new(lower, upper)
    }

    pub fn min(&self, axis: Axis) -> f64 {
        self.lower_left[axis.index()]
    }

    pub fn max(&self, axis: Axis) -> f64 {
        self.upper_right[axis.index()]
    }

    pub fn extent(&self, axis: Axis) -> f64 {
        self.width[axis.index()]
    }

    pub fn volume(&self) -> f64 {
        self.width[0] * self.width[1] * self.width[2]
    }

    /// Closed containment test (points on a face count as inside)
    pub fn contains(&self, point: [f64; 3]) -> bool {
        (0..3).all(|i| point[i] >= self.lower_left[i] && point[i] <= self.upper_right[i])
    }

    /// Closed overlap test; boxes that only share a face intersect
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        (0..3).all(|i| {
            self.lower_left[i] <= other.upper_right[i] && other.lower_left[i] <= self.upper_right[i]
        })
    }
}
