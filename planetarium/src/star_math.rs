//! Projection of catalog stars onto the screen
//!
//! Star positions are first expressed relative to the boresight attitude.
//! Each relative angle is then mapped independently onto the flat screen
//! through `distance * tan(angle)`, offset by the camera position relative to
//! the screen center. Both screen axes are mirrored: positive relative RA
//! moves a star towards the left edge and positive relative Dec towards the
//! top row.
//!
//! A star is visible when its relative RA lies within `max_ra` of the
//! boresight, measured across the `0 / 2π` wrap, and its relative Dec lies
//! strictly within `(-max_de, max_de)`.

use std::f64::consts::{PI, TAU};

use crate::{algo::normalize_angle, catalog::StarRecord, config::ViewConfig};

/// Half field of view `(max_ra, max_de)` in radians seen from the observer
pub fn field_half_angles(config: &ViewConfig) -> (f64, f64) {
    let (width_m, height_m) = config.screen_size_m();
    let max_ra = (width_m / (2.0 * config.screen_distance)).atan();
    let max_de = (height_m / (2.0 * config.screen_distance)).atan();
    (max_ra, max_de)
}

/// Maps catalog stars to screen pixels for one attitude
#[derive(Debug, Clone)]
pub struct ScreenProjector {
    attitude_ra: f64,
    attitude_dec: f64,
    max_ra: f64,
    max_de: f64,
    distance: f64,
    h_pixel_size: f64,
    v_pixel_size: f64,
    camera_x_offset: f64,
    camera_y_offset: f64,
    half_width: f64,
    half_height: f64,
}

impl ScreenProjector {
    pub fn new(config: &ViewConfig) -> Self {
        let (max_ra, max_de) = field_half_angles(config);

        Self {
            attitude_ra: config.attitude_ra,
            attitude_dec: config.attitude_dec,
            max_ra,
            max_de,
            distance: config.screen_distance,
            h_pixel_size: config.h_pixel_size,
            v_pixel_size: config.v_pixel_size,
            camera_x_offset: config.camera_x_offset,
            camera_y_offset: config.camera_y_offset,
            half_width: config.screen_width as f64 / 2.0,
            half_height: config.screen_height as f64 / 2.0,
        }
    }

    /// Star position relative to the boresight.
    ///
    /// Relative RA is folded into `[0, 2π]`, relative Dec into `[-π, π]`.
    pub fn relative_coordinates(&self, star: &StarRecord) -> (f64, f64) {
        let ra = normalize_angle(star.ra - self.attitude_ra, 0.0, TAU);
        let de = normalize_angle(star.dec - self.attitude_dec, -PI, PI);
        (ra, de)
    }

    /// Field of view test on boresight-relative coordinates
    pub fn is_visible(&self, relative_ra: f64, relative_de: f64) -> bool {
        let ra_in_view = relative_ra > TAU - self.max_ra || relative_ra < self.max_ra;
        let de_in_view = relative_de > -self.max_de && relative_de < self.max_de;
        ra_in_view && de_in_view
    }

    /// Screen pixel coordinates for boresight-relative coordinates, whether or
    /// not they are visible. Coordinates are rounded to whole pixels.
    pub fn to_screen(&self, relative_ra: f64, relative_de: f64) -> (f64, f64) {
        // Meters from the screen center
        let x = self.camera_x_offset + self.distance * relative_ra.tan();
        let y = self.camera_y_offset + self.distance * relative_de.tan();

        let x_screen = (-x / self.h_pixel_size + self.half_width).round();
        let y_screen = (-y / self.v_pixel_size + self.half_height).round();
        (x_screen, y_screen)
    }

    /// Project a star, returning `None` when it is outside the field of view.
    pub fn project(&self, star: &StarRecord) -> Option<(f64, f64)> {
        let (ra, de) = self.relative_coordinates(star);
        if !self.is_visible(ra, de) {
            return None;
        }
        Some(self.to_screen(ra, de))
    }
}
