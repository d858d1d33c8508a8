//! ditherpress: palette quantization and dithering for raster images.
//!
//! The core transforms a decoded RGBA8 [`PixelBuffer`](buffer::PixelBuffer)
//! into a palette-exact buffer via one of three algorithms (Floyd-Steinberg
//! and Atkinson error diffusion, ordered Bayer thresholding), optionally
//! preceded by a shrink-only resize and a global contrast stretch. Decoding,
//! scaling and final encoding are delegated to the `image` crate.

use image::DynamicImage;

use crate::config::DitherSettings;
use crate::error::Result;

pub mod buffer;
pub mod color_palette;
pub mod config;
pub mod contrast;
pub mod dithering;
pub mod error;
pub mod image_utils;
pub mod pipeline;

/// Convenience entry point: decode-side glue around [`pipeline::process`].
pub fn run(settings: &DitherSettings, original_img: DynamicImage) -> Result<DynamicImage> {
    let buffer = image_utils::dynimg_to_buffer(&original_img)?;
    let result = pipeline::process(buffer, settings)?;
    Ok(image_utils::buffer_to_dynimg(result))
}
