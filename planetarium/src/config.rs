//! Viewing configuration for the planetarium renderer
//!
//! A [`ViewConfig`] describes the physical projection screen, where the camera
//! sits relative to it, the current pointing attitude and the photometric
//! constants used to turn magnitudes into pixel intensities. Configurations can
//! be persisted to and loaded from JSON files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while validating or persisting a [`ViewConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be strictly positive, got {1}")]
    NotPositive(&'static str, f64),
    #[error("{0} must be finite, got {1}")]
    NotFinite(&'static str, f64),
    #[error("screen must be at least 1x1 pixels, got {0}x{1}")]
    EmptyScreen(usize, usize),
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Screen geometry, attitude and photometric constants for one viewing setup.
///
/// The defaults describe the projection wall the renderer was calibrated
/// against: a 2.364 m x 1.335 m screen at 1920x1080 viewed from 5.954 m.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Screen width in pixels
    pub screen_width: usize,
    /// Screen height in pixels
    pub screen_height: usize,
    /// Distance from the observer to the screen in meters
    pub screen_distance: f64,
    /// Horizontal pixel pitch in meters per pixel
    pub h_pixel_size: f64,
    /// Vertical pixel pitch in meters per pixel
    pub v_pixel_size: f64,

    /// Camera position with respect to the screen center, meters
    pub camera_x_offset: f64,
    pub camera_y_offset: f64,

    /// Boresight right ascension in radians
    pub attitude_ra: f64,
    /// Boresight declination in radians
    pub attitude_dec: f64,

    /// Reference intensity, also the sensor saturation ceiling
    pub i_ref: f64,
    /// Magnitude that maps to `i_ref`
    pub m_ref: f64,
    /// Base Gaussian width in pixels for unsaturated stars
    pub sigma_0: f64,

    /// Max size of the spread to one side in pixels.
    /// 1 means the stamped square is 3x3.
    pub psf_half_extent: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            screen_distance: 5.954,
            h_pixel_size: 2.364 / 1920.0,
            v_pixel_size: 1.335 / 1080.0,
            camera_x_offset: 0.0,
            camera_y_offset: 0.0,
            attitude_ra: 0.0,
            attitude_dec: 0.0,
            i_ref: 1.0,
            m_ref: 6.0,
            sigma_0: 1.0,
            psf_half_extent: 8,
        }
    }
}

impl ViewConfig {
    /// Check the physical invariants the renderer relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::EmptyScreen(
                self.screen_width,
                self.screen_height,
            ));
        }

        let positive = [
            ("screen_distance", self.screen_distance),
            ("h_pixel_size", self.h_pixel_size),
            ("v_pixel_size", self.v_pixel_size),
            ("sigma_0", self.sigma_0),
            ("i_ref", self.i_ref),
        ];
        for (name, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(name, value));
            }
            if value <= 0.0 {
                return Err(ConfigError::NotPositive(name, value));
            }
        }

        let finite = [
            ("camera_x_offset", self.camera_x_offset),
            ("camera_y_offset", self.camera_y_offset),
            ("attitude_ra", self.attitude_ra),
            ("attitude_dec", self.attitude_dec),
            ("m_ref", self.m_ref),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(name, value));
            }
        }

        Ok(())
    }

    /// Screen dimensions as `(width, height)` in pixels
    pub fn dimensions(&self) -> (usize, usize) {
        (self.screen_width, self.screen_height)
    }

    /// Physical screen size in meters as `(width, height)`
    pub fn screen_size_m(&self) -> (f64, f64) {
        (
            self.screen_width as f64 * self.h_pixel_size,
            self.screen_height as f64 * self.v_pixel_size,
        )
    }

    /// Save as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file and validate. Missing fields take their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
