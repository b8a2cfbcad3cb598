//! Rasterization of projected stars and image export

pub mod io;
pub mod render;

pub use io::{save_normalized_image, to_u8_image};
pub use render::{add_stars_to_image, draw_star, stamp_gaussian, threshold_truncate, ScreenStar};
