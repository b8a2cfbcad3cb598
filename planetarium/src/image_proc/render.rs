use ndarray::Array2;

use crate::{
    config::ViewConfig,
    photometry::{gamma_inverse, spot_for_intensity, GaussianSpot},
};

/// A star that passed the visibility test, with its screen position and spot shape
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenStar {
    pub x: f64,
    pub y: f64,
    pub spot: GaussianSpot,
}

/// Additively stamp a Gaussian spot centered at `(x, y)` into `image`.
///
/// Every pixel of the `(2 * half_extent + 1)` square around the rounded center
/// receives `spot.value_at(d) / I_ref`, where `d` is the distance from the
/// unrounded center. Only pixels with `0 < x < width` and `0 < y < height`
/// are written; row and column 0 are never touched. Contributions falling
/// outside are dropped.
///
/// `image` is indexed `[[y, x]]`.
pub fn stamp_gaussian(
    image: &mut Array2<f64>,
    x: f64,
    y: f64,
    spot: &GaussianSpot,
    half_extent: u32,
    config: &ViewConfig,
) {
    let (height, width) = image.dim();
    let reach = half_extent as f64;

    // Closest discrete pixel to the star location
    let xc = x.round();
    let yc = y.round();

    // Nothing of the window can land on the buffer
    if !(xc + reach >= 1.0 && xc - reach < width as f64)
        || !(yc + reach >= 1.0 && yc - reach < height as f64)
    {
        return;
    }

    let xc = xc as i64;
    let yc = yc as i64;
    let half_extent = half_extent as i64;

    for px in (xc - half_extent)..=(xc + half_extent) {
        for py in (yc - half_extent)..=(yc + half_extent) {
            if px <= 0 || py <= 0 || px >= width as i64 || py >= height as i64 {
                continue;
            }

            let distance = ((x - px as f64).powi(2) + (y - py as f64).powi(2)).sqrt();
            image[[py as usize, px as usize]] += gamma_inverse(spot.value_at(distance), config);
        }
    }
}

/// Draw a star of linear intensity `i_star` at an already projected screen position.
pub fn draw_star(image: &mut Array2<f64>, x: f64, y: f64, i_star: f64, config: &ViewConfig) {
    let spot = spot_for_intensity(i_star, config);
    stamp_gaussian(image, x, y, &spot, config.psf_half_extent, config);
}

/// Render a list of projected stars into a fresh `height x width` image.
///
/// The image is not thresholded.
pub fn add_stars_to_image(
    width: usize,
    height: usize,
    stars: &[ScreenStar],
    config: &ViewConfig,
) -> Array2<f64> {
    let mut image = Array2::zeros((height, width));

    for star in stars {
        stamp_gaussian(
            &mut image,
            star.x,
            star.y,
            &star.spot,
            config.psf_half_extent,
            config,
        );
    }

    image
}

/// Truncate every value above `ceiling` to exactly `ceiling`. Values below are kept.
pub fn threshold_truncate(image: &mut Array2<f64>, ceiling: f64) {
    image.mapv_inplace(|value| if value > ceiling { ceiling } else { value });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    fn test_config() -> ViewConfig {
        ViewConfig {
            screen_width: 64,
            screen_height: 48,
            i_ref: 1.0,
            m_ref: 3.0,
            sigma_0: 1.0,
            psf_half_extent: 5,
            ..ViewConfig::default()
        }
    }

    fn unit_spot() -> GaussianSpot {
        GaussianSpot {
            alpha: 1.0,
            sigma: 1.0,
        }
    }

    fn touched_pixels(image: &Array2<f64>) -> usize {
        image.iter().filter(|&&v| v != 0.0).count()
    }

    #[test]
    fn test_stamp_peak_and_neighbours() {
        let config = test_config();
        let mut image = Array2::zeros((48, 64));
        stamp_gaussian(&mut image, 20.0, 10.0, &unit_spot(), 5, &config);

        assert_eq!(image[[10, 20]], 1.0);
        assert_relative_eq!(image[[10, 21]], (-1.0f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(image[[11, 21]], (-2.0f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(image[[15, 25]], (-50.0f64).exp(), epsilon = 1e-30);
        assert_eq!(image[[16, 20]], 0.0);
        assert_eq!(image[[10, 26]], 0.0);
        assert_eq!(touched_pixels(&image), 11 * 11);
    }

    #[test]
    fn test_stamp_uses_unrounded_center() {
        let config = test_config();
        let mut image = Array2::zeros((48, 64));
        stamp_gaussian(&mut image, 20.4, 10.0, &unit_spot(), 2, &config);

        // Window is centered on the rounded pixel but distances use 20.4
        assert_relative_eq!(image[[10, 20]], (-0.16f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(image[[10, 21]], (-0.36f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(image[[10, 18]], (-(2.4f64 * 2.4)).exp(), epsilon = 1e-12);
        assert_eq!(image[[10, 23]], 0.0);
    }

    #[test]
    fn test_stamp_applies_gamma_inverse() {
        let config = ViewConfig {
            i_ref: 4.0,
            ..test_config()
        };
        let mut image = Array2::zeros((48, 64));
        let spot = GaussianSpot {
            alpha: 2.0,
            sigma: 1.0,
        };
        stamp_gaussian(&mut image, 30.0, 30.0, &spot, 3, &config);
        assert_eq!(image[[30, 30]], 0.5);
    }

    #[test]
    fn test_stamp_is_additive() {
        let config = test_config();
        let mut image = Array2::zeros((48, 64));
        stamp_gaussian(&mut image, 20.0, 20.0, &unit_spot(), 3, &config);
        stamp_gaussian(&mut image, 20.0, 20.0, &unit_spot(), 3, &config);
        assert_eq!(image[[20, 20]], 2.0);
        assert_relative_eq!(image[[20, 21]], 2.0 * (-1.0f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_stamp_skips_first_row_and_column() {
        let config = test_config();
        let mut image = Array2::zeros((48, 64));
        stamp_gaussian(&mut image, 0.0, 0.0, &unit_spot(), 2, &config);

        assert_eq!(image[[0, 0]], 0.0);
        assert_eq!(image[[0, 1]], 0.0);
        assert_eq!(image[[1, 0]], 0.0);
        assert_relative_eq!(image[[1, 1]], (-2.0f64).exp(), epsilon = 1e-12);
        // Only the 2x2 block of pixels with both indices in 1..=2 survives
        assert_eq!(touched_pixels(&image), 4);
    }

    #[test]
    fn test_stamp_keeps_last_row_and_column() {
        let config = test_config();
        let mut image = Array2::zeros((48, 64));
        stamp_gaussian(&mut image, 63.0, 47.0, &unit_spot(), 1, &config);

        assert_eq!(image[[47, 63]], 1.0);
        assert_eq!(touched_pixels(&image), 4);
    }

    #[test]
    fn test_stamp_out_of_bounds_is_dropped() {
        let config = test_config();
        let mut image = Array2::zeros((48, 64));
        for (x, y) in [
            (-50.0, 10.0),
            (10.0, -50.0),
            (500.0, 10.0),
            (10.0, 500.0),
            (1.0e300, 1.0e300),
            (-1.0e300, 3.0),
            (f64::INFINITY, 3.0),
            (f64::NAN, 3.0),
        ] {
            stamp_gaussian(&mut image, x, y, &unit_spot(), 5, &config);
        }
        assert_eq!(touched_pixels(&image), 0);
    }

    #[test]
    fn test_draw_star_unsaturated_peak() {
        let config = test_config();
        let mut image = Array2::zeros((48, 64));
        draw_star(&mut image, 32.0, 24.0, 1.0, &config);
        assert_relative_eq!(image[[24, 32]], 1.0 / PI, epsilon = 1e-12);
    }

    #[test]
    fn test_draw_star_saturated_widens() {
        let config = test_config();
        let mut narrow = Array2::zeros((48, 64));
        let mut wide = Array2::zeros((48, 64));
        draw_star(&mut narrow, 32.0, 24.0, PI, &config);
        draw_star(&mut wide, 32.0, 24.0, 16.0 * PI, &config);

        // Both peaks sit at the ceiling; the brighter star spreads further
        assert_eq!(narrow[[24, 32]], 1.0);
        assert_eq!(wide[[24, 32]], 1.0);
        assert!(wide[[24, 35]] > narrow[[24, 35]]);
        assert_relative_eq!(wide[[24, 36]], (-1.0f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_add_stars_to_image_matches_manual_stamps() {
        let config = test_config();
        let stars = vec![
            ScreenStar {
                x: 10.0,
                y: 12.0,
                spot: unit_spot(),
            },
            ScreenStar {
                x: 40.0,
                y: 30.0,
                spot: GaussianSpot {
                    alpha: 0.5,
                    sigma: 2.0,
                },
            },
        ];
        let image = add_stars_to_image(64, 48, &stars, &config);
        assert_eq!(image.dim(), (48, 64));

        let mut expected = Array2::zeros((48, 64));
        for s in &stars {
            stamp_gaussian(&mut expected, s.x, s.y, &s.spot, 5, &config);
        }
        assert_eq!(image, expected);
    }

    #[test]
    fn test_threshold_truncates_only_above_ceiling() {
        let mut image = Array2::from_shape_vec((1, 4), vec![0.0, 0.5, 1.0, 7.5]).unwrap();
        threshold_truncate(&mut image, 1.0);
        assert_eq!(image.as_slice().unwrap(), &[0.0, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn test_threshold_idempotent_fuzz() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut image = Array2::from_shape_fn((20, 30), |_| rng.gen_range(0.0..3.0));

        threshold_truncate(&mut image, 1.0);
        let once = image.clone();
        threshold_truncate(&mut image, 1.0);

        assert_eq!(image, once);
        assert!(image.iter().all(|&v| v <= 1.0));
    }

    #[test]
    fn test_fuzz_stamps_stay_finite_and_bounded() {
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(42);
        let mut image = Array2::zeros((48, 64));

        for _ in 0..200 {
            let x = rng.gen_range(-20.0..84.0);
            let y = rng.gen_range(-20.0..68.0);
            let i_star = rng.gen_range(0.01..50.0);
            draw_star(&mut image, x, y, i_star, &config);
        }

        assert!(image.iter().all(|v| v.is_finite() && *v >= 0.0));
        assert!(image.row(0).iter().all(|&v| v == 0.0));
        assert!(image.column(0).iter().all(|&v| v == 0.0));
    }
}
