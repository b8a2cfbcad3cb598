//! Magnitude to rendered intensity conversion
//!
//! Stars are drawn as isotropic Gaussians with peak `alpha` and scale `sigma`.
//! The energy of a spot is taken as `alpha * sigma^2 * pi`.
//!
//! Below the saturation breakpoint `I_max = I_ref * sigma_0^2 * pi` the spot
//! keeps the base width `sigma_0` and only its peak scales. Above it the peak
//! is pinned at the sensor ceiling `I_ref` and the excess energy widens the
//! spot instead, so `alpha * sigma^2 * pi == I_star` in both regimes.

use std::f64::consts::PI;

use crate::config::ViewConfig;

/// Peak amplitude and width of a rendered Gaussian spot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianSpot {
    /// Peak intensity
    pub alpha: f64,
    /// Gaussian scale in pixels
    pub sigma: f64,
}

impl GaussianSpot {
    /// Kernel value at `distance` pixels from the spot center
    pub fn value_at(&self, distance: f64) -> f64 {
        self.alpha * (-(distance * distance) / (self.sigma * self.sigma)).exp()
    }
}

/// Linear intensity of a star of magnitude `magnitude`.
///
/// `I_star = I_ref * 10^((m_ref - m) / 2.5)`, so a star at `m_ref` has
/// exactly `I_ref` and each 5 magnitudes brighter is 100x more intense.
pub fn magnitude_to_intensity(magnitude: f64, config: &ViewConfig) -> f64 {
    config.i_ref * 10f64.powf((config.m_ref - magnitude) / 2.5)
}

/// Brightest intensity that can be drawn with the base width `sigma_0`
pub fn max_unsaturated_intensity(config: &ViewConfig) -> f64 {
    config.i_ref * config.sigma_0 * config.sigma_0 * PI
}

/// Choose the spot shape for a star of linear intensity `i_star`.
///
/// At `i_star == I_max` the result is exactly `(I_ref, sigma_0)`.
pub fn spot_for_intensity(i_star: f64, config: &ViewConfig) -> GaussianSpot {
    let i_max = max_unsaturated_intensity(config);

    if i_star < i_max {
        GaussianSpot {
            alpha: i_star / (config.sigma_0 * config.sigma_0 * PI),
            sigma: config.sigma_0,
        }
    } else {
        // sigma^2 / sigma_0^2 == i_star / I_max keeps alpha * sigma^2 * pi == i_star
        GaussianSpot {
            alpha: config.i_ref,
            sigma: config.sigma_0 * (i_star / i_max).sqrt(),
        }
    }
}

/// Spot shape for a catalog magnitude
pub fn spot_for_magnitude(magnitude: f64, config: &ViewConfig) -> GaussianSpot {
    spot_for_intensity(magnitude_to_intensity(magnitude, config), config)
}

/// Linear inverse gamma of the display: one `I_ref` maps to full scale.
pub fn gamma_inverse(intensity: f64, config: &ViewConfig) -> f64 {
    intensity / config.i_ref
}
