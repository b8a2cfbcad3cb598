//! Attenuation ladder calibration scene
//!
//! A horizontal row of reference stars drawn at the saturation breakpoint
//! intensity `I_ref * sigma_0^2 * pi`. Under each reference star sits the
//! same star dimmed by `exp(-tau)`, with `tau` stepping through log-spaced
//! optical depths. Photographing the screen and comparing each pair gives
//! the measured attenuation against the commanded one.

use ndarray::Array2;

use crate::{
    config::ViewConfig,
    image_proc::{draw_star, threshold_truncate},
    photometry::max_unsaturated_intensity,
    scene::DISPLAY_CEILING,
};

/// `count` values evenly spaced in log10 between `10^start_exp` and `10^end_exp`, inclusive.
pub fn log_spaced(start_exp: f64, end_exp: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![10f64.powf(start_exp)],
        _ => {
            let step = (end_exp - start_exp) / (count - 1) as f64;
            (0..count)
                .map(|i| 10f64.powf(start_exp + step * i as f64))
                .collect()
        }
    }
}

/// Layout of the ladder on screen, in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct AttenuationLadder {
    /// Optical depths, one column per value
    pub taus: Vec<f64>,
    /// Column position before the first star; each column advances by `x_step` first
    pub x_origin: f64,
    pub x_step: f64,
    /// Vertical distance between a reference star and its attenuated twin
    pub y_step: f64,
}

impl Default for AttenuationLadder {
    fn default() -> Self {
        Self {
            taus: log_spaced(-4.0, -1.0, 40),
            x_origin: 100.0,
            x_step: 40.0,
            y_step: 40.0,
        }
    }
}

impl AttenuationLadder {
    /// Row of the reference stars; the pair straddles the screen's horizontal midline.
    pub fn reference_row(&self, config: &ViewConfig) -> f64 {
        config.screen_height as f64 / 2.0 - self.y_step / 2.0
    }

    /// Screen positions and intensities as `(x, y, intensity)` for every star
    pub fn stars(&self, config: &ViewConfig) -> Vec<(f64, f64, f64)> {
        let i_zero = max_unsaturated_intensity(config);
        let y = self.reference_row(config);

        let mut stars = Vec::with_capacity(self.taus.len() * 2);
        let mut x = self.x_origin;
        for tau in &self.taus {
            x += self.x_step;
            stars.push((x, y, i_zero));
            stars.push((x, y + self.y_step, i_zero * (-tau).exp()));
        }
        stars
    }

    /// Render the ladder into a thresholded frame sized to the screen.
    pub fn render(&self, config: &ViewConfig) -> Array2<f64> {
        let mut image = Array2::zeros((config.screen_height, config.screen_width));

        let stars = self.stars(config);
        if let Some((last_x, _, _)) = stars.last() {
            if *last_x >= config.screen_width as f64 {
                log::warn!(
                    "Attenuation ladder extends to x = {last_x}, past the {} px wide screen",
                    config.screen_width
                );
            }
        }

        for (x, y, intensity) in stars {
            draw_star(&mut image, x, y, intensity, config);
        }

        threshold_truncate(&mut image, DISPLAY_CEILING);
        image
    }
}
