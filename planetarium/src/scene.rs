//! Full-catalog rendering and attitude control
//!
//! [`render_frame`] is a pure function of a catalog and a [`ViewConfig`]:
//! every visible star is projected, shaped by the photometric model and
//! stamped into a fresh buffer, which is then truncated to `[0, 1]`.
//!
//! [`Planetarium`] owns the configuration for an interactive session and
//! applies discrete one-degree attitude steps between renders.

use ndarray::Array2;
use std::f64::consts::{PI, TAU};

use crate::{
    algo::normalize_angle,
    catalog::Catalog,
    config::{ConfigError, ViewConfig},
    image_proc::{add_stars_to_image, threshold_truncate, ScreenStar},
    photometry::spot_for_magnitude,
    star_math::ScreenProjector,
};

/// Brightest value a rendered frame can hold
pub const DISPLAY_CEILING: f64 = 1.0;

/// Size of one attitude step in degrees
pub const ATTITUDE_STEP_DEG: f64 = 1.0;

/// Discrete navigation commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttitudeCommand {
    RaIncrease,
    RaDecrease,
    DecIncrease,
    DecDecrease,
}

impl AttitudeCommand {
    /// `(d_ra, d_dec)` in radians
    pub fn delta(&self) -> (f64, f64) {
        let step = ATTITUDE_STEP_DEG.to_radians();
        match self {
            AttitudeCommand::RaIncrease => (step, 0.0),
            AttitudeCommand::RaDecrease => (-step, 0.0),
            AttitudeCommand::DecIncrease => (0.0, step),
            AttitudeCommand::DecDecrease => (0.0, -step),
        }
    }
}

/// Project every visible catalog star and compute its spot shape.
pub fn project_catalog(catalog: &Catalog, config: &ViewConfig) -> Vec<ScreenStar> {
    let projector = ScreenProjector::new(config);

    catalog
        .iter()
        .filter_map(|star| {
            let (x, y) = projector.project(star)?;
            Some(ScreenStar {
                x,
                y,
                spot: spot_for_magnitude(star.magnitude, config),
            })
        })
        .collect()
}

/// Render one thresholded frame of `catalog` as seen with `config`.
///
/// The returned array has shape `(screen_height, screen_width)` and values in
/// `[0, 1]`.
pub fn render_frame(catalog: &Catalog, config: &ViewConfig) -> Array2<f64> {
    let visible = project_catalog(catalog, config);
    log::debug!(
        "{} of {} stars visible at RA {:.2}°, Dec {:.2}°",
        visible.len(),
        catalog.len(),
        config.attitude_ra.to_degrees(),
        config.attitude_dec.to_degrees()
    );

    let mut image = add_stars_to_image(
        config.screen_width,
        config.screen_height,
        &visible,
        config,
    );
    threshold_truncate(&mut image, DISPLAY_CEILING);
    image
}

/// Interactive renderer state: one configuration whose attitude moves in steps.
#[derive(Debug, Clone)]
pub struct Planetarium {
    config: ViewConfig,
}

impl Planetarium {
    /// Validate `config` and take ownership of it.
    pub fn new(config: ViewConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Current `(ra, dec)` attitude in radians
    pub fn attitude(&self) -> (f64, f64) {
        (self.config.attitude_ra, self.config.attitude_dec)
    }

    /// Point the boresight at `(ra, dec)` radians. Angles are wrapped.
    pub fn set_attitude(&mut self, ra: f64, dec: f64) {
        self.config.attitude_ra = normalize_angle(ra, 0.0, TAU);
        self.config.attitude_dec = normalize_angle(dec, -PI, PI);
    }

    /// Step the attitude by one degree in the commanded direction.
    pub fn apply(&mut self, command: AttitudeCommand) {
        let (d_ra, d_dec) = command.delta();
        self.set_attitude(
            self.config.attitude_ra + d_ra,
            self.config.attitude_dec + d_dec,
        );
        log::info!(
            "Attitude {:?}: RA {:.1}°, Dec {:.1}°",
            command,
            self.config.attitude_ra.to_degrees(),
            self.config.attitude_dec.to_degrees()
        );
    }

    /// Render `catalog` at the current attitude.
    pub fn render(&self, catalog: &Catalog) -> Array2<f64> {
        render_frame(catalog, &self.config)
    }

    /// Step the attitude and render the resulting frame.
    pub fn apply_and_render(&mut self, command: AttitudeCommand, catalog: &Catalog) -> Array2<f64> {
        self.apply(command);
        self.render(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StarRecord;
    use approx::assert_relative_eq;

    fn scenario_config() -> ViewConfig {
        ViewConfig {
            screen_width: 800,
            screen_height: 600,
            screen_distance: 0.3,
            h_pixel_size: 0.0002,
            v_pixel_size: 0.0002,
            i_ref: 1.0,
            m_ref: 3.0,
            sigma_0: 1.0,
            psf_half_extent: 5,
            ..ViewConfig::default()
        }
    }

    fn peak(image: &Array2<f64>) -> ((usize, usize), f64) {
        image
            .indexed_iter()
            .fold(((0, 0), f64::MIN), |best, (index, &value)| {
                if value > best.1 {
                    (index, value)
                } else {
                    best
                }
            })
    }

    #[test]
    fn test_single_reference_star() {
        let catalog = Catalog::new(vec![StarRecord::from_degrees(3.0, 0.0, 0.0)]);
        let image = render_frame(&catalog, &scenario_config());

        assert_eq!(image.dim(), (600, 800));
        let ((row, col), value) = peak(&image);
        assert_eq!((col, row), (400, 300));
        assert_relative_eq!(value, 1.0 / PI, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_catalog_is_black() {
        let image = render_frame(&Catalog::default(), &scenario_config());
        assert!(image.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_bright_star_is_clamped() {
        let config = scenario_config();
        // Two saturated stars on top of each other sum to 2 before the threshold
        let catalog = Catalog::new(vec![
            StarRecord::from_degrees(-2.0, 0.0, 0.0),
            StarRecord::from_degrees(-2.0, 0.0, 0.0),
        ]);
        let image = render_frame(&catalog, &config);
        assert_eq!(image[[300, 400]], 1.0);
        assert!(image.iter().all(|&v| v <= 1.0));
    }

    #[test]
    fn test_brighter_never_renders_dimmer() {
        let config = scenario_config();
        let mut previous = f64::INFINITY;
        for step in 0..40 {
            let magnitude = -4.0 + step as f64 * 0.5;
            let catalog = Catalog::new(vec![StarRecord::new(magnitude, 0.0, 0.0)]);
            let (_, value) = peak(&render_frame(&catalog, &config));
            assert!(value <= previous, "mag {magnitude}: {value} > {previous}");
            previous = value;
        }
    }

    #[test]
    fn test_non_overlapping_stars_add() {
        let config = scenario_config();
        let a = StarRecord::from_degrees(3.5, 2.0, 1.0);
        let b = StarRecord::from_degrees(4.0, 358.0, -3.0);

        let alone_a = render_frame(&Catalog::new(vec![a]), &config);
        let alone_b = render_frame(&Catalog::new(vec![b]), &config);
        let both = render_frame(&Catalog::new(vec![a, b]), &config);

        assert_eq!(both, &alone_a + &alone_b);
    }

    #[test]
    fn test_render_order_does_not_matter() {
        let config = scenario_config();
        let stars: Vec<StarRecord> = (0..12)
            .map(|i| StarRecord::from_degrees(2.0 + i as f64 * 0.1, i as f64 * 0.01, 0.0))
            .collect();
        let forward = render_frame(&Catalog::new(stars.clone()), &config);
        let reversed_catalog: Catalog = stars.into_iter().rev().collect();
        let reversed = render_frame(&reversed_catalog, &config);

        for (f, r) in forward.iter().zip(reversed.iter()) {
            assert_relative_eq!(*f, *r, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_project_catalog_culls() {
        let config = scenario_config();
        let catalog = Catalog::new(vec![
            StarRecord::from_degrees(3.0, 0.0, 0.0),
            StarRecord::from_degrees(3.0, 90.0, 0.0),
            StarRecord::from_degrees(3.0, 0.0, -45.0),
        ]);
        let visible = project_catalog(&catalog, &config);
        assert_eq!(visible.len(), 1);
        assert_eq!((visible[0].x, visible[0].y), (400.0, 300.0));
        assert_eq!(visible[0].spot.sigma, 1.0);
    }

    #[test]
    fn test_attitude_steps() {
        let mut planetarium = Planetarium::new(scenario_config()).unwrap();
        planetarium.apply(AttitudeCommand::RaIncrease);
        planetarium.apply(AttitudeCommand::DecDecrease);

        let (ra, dec) = planetarium.attitude();
        assert_relative_eq!(ra, 1f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(dec, (-1f64).to_radians(), epsilon = 1e-12);

        planetarium.apply(AttitudeCommand::RaDecrease);
        planetarium.apply(AttitudeCommand::RaDecrease);
        let (ra, _) = planetarium.attitude();
        assert_relative_eq!(ra, 359f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_attitude_step_moves_star() {
        let catalog = Catalog::new(vec![StarRecord::from_degrees(3.0, 0.0, 0.0)]);
        let mut planetarium = Planetarium::new(scenario_config()).unwrap();

        let image = planetarium.apply_and_render(AttitudeCommand::RaIncrease, &catalog);
        let ((row, col), _) = peak(&image);
        // Boresight is now 1° ahead of the star in RA; the mirrored axis puts it right of center
        let offset = (0.3 * 1f64.to_radians().tan() / 0.0002).round() as usize;
        assert_eq!((col, row), (400 + offset, 300));
    }

    #[test]
    fn test_full_turn_restores_frame() {
        let catalog = Catalog::new(vec![
            StarRecord::from_degrees(3.0, 0.0, 0.0),
            StarRecord::from_degrees(2.0, 3.3, 2.1),
            StarRecord::from_degrees(4.5, 356.2, -1.7),
        ]);
        let mut planetarium = Planetarium::new(scenario_config()).unwrap();
        let start = planetarium.render(&catalog);

        for _ in 0..360 {
            planetarium.apply(AttitudeCommand::RaIncrease);
        }
        for _ in 0..360 {
            planetarium.apply(AttitudeCommand::DecDecrease);
        }

        let (ra, dec) = planetarium.attitude();
        assert!(ra < 1e-9 || (TAU - ra) < 1e-9, "ra = {ra}");
        assert!(dec.abs() < 1e-9, "dec = {dec}");

        let end = planetarium.render(&catalog);
        for (s, e) in start.iter().zip(end.iter()) {
            assert_relative_eq!(*s, *e, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ViewConfig {
            h_pixel_size: 0.0,
            ..scenario_config()
        };
        assert!(Planetarium::new(config).is_err());
    }
}
