//! Downsampled working raster the lattice is laid over

use crate::io::configuration::{LATTICE_DIVISOR, MAX_SOURCE_DIMENSION, MAX_WORKING_PIXELS};
use crate::io::error::{HalftoneError, Result, invalid_configuration};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use ndarray::Array3;
use num_traits::ToPrimitive;

/// Working raster dimensions for a source image
///
/// Sources above [`MAX_SOURCE_DIMENSION`] are first divided down so their
/// longest side fits, then every side is divided by `scale`. Each side is
/// rounded up and never drops below one pixel.
///
/// # Errors
///
/// Returns an error if the source has a zero dimension, `scale` is not a
/// positive finite number, or the result exceeds [`MAX_WORKING_PIXELS`]
pub fn working_dimensions(source_width: u32, source_height: u32, scale: f64) -> Result<(u32, u32)> {
    if source_width == 0 || source_height == 0 {
        return Err(HalftoneError::InvalidSourceData {
            reason: format!("source is {source_width}x{source_height}, expected non-zero size"),
        });
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(HalftoneError::InvalidSourceData {
            reason: format!("scale {scale} must be a positive finite number"),
        });
    }

    let longest = f64::from(source_width.max(source_height));
    let div = (longest / MAX_SOURCE_DIMENSION).max(1.0);

    let side = |length: u32| -> Result<u32> {
        (f64::from(length) / div / scale)
            .ceil()
            .max(1.0)
            .to_u32()
            .ok_or_else(|| HalftoneError::InvalidSourceData {
                reason: format!("working size for side {length} does not fit in u32"),
            })
    };

    let (width, height) = (side(source_width)?, side(source_height)?);
    if u64::from(width) * u64::from(height) > MAX_WORKING_PIXELS {
        return Err(invalid_configuration(
            "distance_between",
            &(scale * LATTICE_DIVISOR),
            &format!(
                "gives a {width}x{height} working raster, more than {MAX_WORKING_PIXELS} pixels"
            ),
        ));
    }

    Ok((width, height))
}

/// RGBA pixel buffer indexed as `(row, column, channel)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingRaster {
    pixels: Array3<u8>,
}

impl WorkingRaster {
    /// Resample a source frame to `width × height` with bilinear filtering
    pub fn from_frame(frame: &RgbaImage, width: u32, height: u32) -> Self {
        let resized = if frame.dimensions() == (width, height) {
            frame.clone()
        } else {
            imageops::resize(frame, width, height, FilterType::Triangle)
        };

        let mut pixels = Array3::zeros((height as usize, width as usize, 4));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for (c, &value) in pixel.0.iter().enumerate() {
                if let Some(slot) = pixels.get_mut((y as usize, x as usize, c)) {
                    *slot = value;
                }
            }
        }

        Self { pixels }
    }

    /// Wrap an existing `(height, width, 4)` pixel array
    ///
    /// # Errors
    ///
    /// Returns an error if the last axis does not hold four channels
    pub fn from_pixels(pixels: Array3<u8>) -> Result<Self> {
        let (_, _, channels) = pixels.dim();
        if channels != 4 {
            return Err(HalftoneError::InvalidSourceData {
                reason: format!("expected 4 channels, found {channels}"),
            });
        }
        Ok(Self { pixels })
    }

    /// Replace the pixel data with a new frame at the current size
    pub fn redraw(&mut self, frame: &RgbaImage) {
        *self = Self::from_frame(frame, self.width() as u32, self.height() as u32);
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Green channel at a pixel, the luminance proxy used for sampling
    pub fn green(&self, x: usize, y: usize) -> Option<u8> {
        self.pixels.get((y, x, 1)).copied()
    }

    /// Underlying pixel array
    pub const fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }
}
