//! Photometrically calibrated star field rendering
//!
//! This crate projects a star catalog onto a flat projection screen for a
//! given observer attitude and paints each visible star as a Gaussian spot
//! whose peak and width follow the star's magnitude. Frames are normalized
//! to `[0, 1]` for display or export.

pub mod algo;
pub mod catalog;
pub mod config;
pub mod image_proc;
pub mod photometry;
pub mod scene;
pub mod shared_args;
pub mod sims;
pub mod star_math;

// Re-exports for easier access
pub use catalog::{Catalog, CatalogError, StarRecord, BUNDLED_CATALOG};
pub use config::{ConfigError, ViewConfig};
pub use image_proc::io::{save_normalized_image, ExportError};
pub use photometry::{magnitude_to_intensity, spot_for_intensity, GaussianSpot};
pub use scene::{project_catalog, render_frame, AttitudeCommand, Planetarium};
pub use shared_args::ViewArgs;
pub use sims::AttenuationLadder;
pub use star_math::{field_half_angles, ScreenProjector};
