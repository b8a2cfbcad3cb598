//! Image export for rendered frames
//!
//! Rendered frames hold intensities in `[0, 1]`. They are written out as
//! 8-bit grayscale by linear scaling with 255.

use image::{ImageBuffer, Luma};
use ndarray::Array2;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing a frame to disk
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("image of {0}x{1} pixels does not fit an 8-bit image buffer")]
    Dimensions(usize, usize),
}

/// Scale a normalized intensity image to `u8`, rounding and saturating.
///
/// # Example
/// ```
/// use ndarray::array;
/// use planetarium::image_proc::to_u8_image;
///
/// let frame = array![[0.0, 0.5, 1.0]];
/// assert_eq!(to_u8_image(&frame), array![[0u8, 128, 255]]);
/// ```
pub fn to_u8_image(image: &Array2<f64>) -> Array2<u8> {
    image.mapv(|value| (value * 255.0).round().clamp(0.0, 255.0) as u8)
}

/// Save a normalized intensity image as an 8-bit grayscale file.
///
/// The format is chosen from the file extension.
pub fn save_normalized_image<P: AsRef<Path>>(
    image: &Array2<f64>,
    path: P,
) -> Result<(), ExportError> {
    let (height, width) = image.dim();
    let pixels = to_u8_image(image);

    let img_width = u32::try_from(width).map_err(|_| ExportError::Dimensions(width, height))?;
    let img_height = u32::try_from(height).map_err(|_| ExportError::Dimensions(width, height))?;

    let img_buffer = ImageBuffer::from_fn(img_width, img_height, |x, y| {
        Luma([pixels[[y as usize, x as usize]]])
    });

    img_buffer.save(path.as_ref())?;
    log::info!("Saved {}x{} frame to {}", width, height, path.as_ref().display());

    Ok(())
}
