use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigError, ViewConfig};

/// Viewing configuration arguments shared across the planetarium binaries.
///
/// A JSON config file provides the base values; the remaining flags override
/// individual fields on top of it.
#[derive(Parser, Debug, Clone, Default)]
pub struct ViewArgs {
    /// JSON view configuration file (defaults to the calibrated projection wall)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Boresight right ascension in degrees
    #[arg(long)]
    pub ra: Option<f64>,

    /// Boresight declination in degrees
    #[arg(long)]
    pub dec: Option<f64>,

    /// Screen width in pixels
    #[arg(long)]
    pub width: Option<usize>,

    /// Screen height in pixels
    #[arg(long)]
    pub height: Option<usize>,

    /// Reference intensity (saturation ceiling)
    #[arg(long = "i-ref")]
    pub i_ref: Option<f64>,

    /// Magnitude rendered at the reference intensity
    #[arg(long = "m-ref")]
    pub m_ref: Option<f64>,

    /// Base PSF width in pixels
    #[arg(long = "sigma0")]
    pub sigma_0: Option<f64>,

    /// PSF half extent in pixels
    #[arg(long = "psf-extent")]
    pub psf_half_extent: Option<u32>,
}

impl ViewArgs {
    /// Build and validate the configuration described by these arguments.
    pub fn resolve(&self) -> Result<ViewConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ViewConfig::load_from_file(path)?,
            None => ViewConfig::default(),
        };

        if let Some(ra) = self.ra {
            config.attitude_ra = ra.to_radians();
        }
        if let Some(dec) = self.dec {
            config.attitude_dec = dec.to_radians();
        }
        if let Some(width) = self.width {
            config.screen_width = width;
        }
        if let Some(height) = self.height {
            config.screen_height = height;
        }
        if let Some(i_ref) = self.i_ref {
            config.i_ref = i_ref;
        }
        if let Some(m_ref) = self.m_ref {
            config.m_ref = m_ref;
        }
        if let Some(sigma_0) = self.sigma_0 {
            config.sigma_0 = sigma_0;
        }
        if let Some(extent) = self.psf_half_extent {
            config.psf_half_extent = extent;
        }

        config.validate()?;
        Ok(config)
    }
}
