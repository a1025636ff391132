//! Smoothing kernel of an SPH gas particle.
//!
//! Point densities use the cubic spline kernel with compact support radius
//! `h` (the smoothing length):
//!
//! ```text
//! W(u) = 8/π (1 − 6u² + 6u³)   0 ≤ u ≤ ½
//!      = 16/π (1 − u)³         ½ < u < 1
//!      = 0                     u ≥ 1
//! ```
//!
//! with `u = r/h`, so that the density of a particle with metal mass `m` is
//! `m·W(r/h)/h³` and integrates to `m` over all space.
//!
//! The spline cannot be integrated analytically over an arbitrary box, and it
//! cannot be sampled exactly at low cost either. Both operations therefore use
//! a Gaussian with standard deviation `h / (2.42·√2)`. Its second moment
//! (`<r²> ≈ 0.256 h²`) is close to that of the spline (`<r²> ≈ 0.225 h²`).
//! For box integrals the Gaussian is truncated to the cube `[c−h, c+h]³` and
//! renormalised, which makes a box covering the whole support return exactly
//! the particle mass.

use std::f64::consts::{PI, SQRT_2};

/// Value of `h / (σ·√2)` for the Gaussian that approximates the cubic spline.
pub const GAUSSIAN_SCALE: f64 = 2.42;

/// Dimensionless cubic spline kernel, `u = r/h`
#[inline]
pub fn cubic_spline(u: f64) -> f64 {
    if u < 0.0 || u >= 1.0 {
        0.0
    } else if u <= 0.5 {
        8.0 / PI * (1.0 - 6.0 * u * u + 6.0 * u * u * u)
    } else {
        let t = 1.0 - u;
        16.0 / PI * t * t * t
    }
}

/// Kernel value per unit mass at `distance` from a particle with smoothing length `h`
#[inline]
pub fn density_weight(distance: f64, h: f64) -> f64 {
    cubic_spline(distance / h) / (h * h * h)
}

/// Standard deviation of the Gaussian approximation for smoothing length `h`
#[inline]
pub fn gaussian_sigma(h: f64) -> f64 {
    h / (GAUSSIAN_SCALE * SQRT_2)
}

/// Fraction of a particle's mass between offsets `lower` and `upper` along one axis.
///
/// Offsets are measured from the particle center. The truncated Gaussian is
/// zero outside `[-h, h]`, so any interval covering it returns exactly 1.
pub fn box_fraction_1d(lower: f64, upper: f64, h: f64) -> f64 {
    let lo = lower.clamp(-h, h);
    let hi = upper.clamp(-h, h);
    if hi <= lo {
        return 0.0;
    }
    let s = GAUSSIAN_SCALE / h;
    let norm = 2.0 * libm::erf(GAUSSIAN_SCALE);
    (libm::erf(s * hi) - libm::erf(s * lo)) / norm
}
