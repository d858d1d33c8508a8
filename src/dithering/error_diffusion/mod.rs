use crate::{
    buffer::PixelBuffer,
    color_palette::Palette,
    dithering::error_diffusion::matrices::{ATKINSON, FLOYD_STEINBERG, KernelEntry},
    error::{DitherpressError, Result},
};

pub mod matrices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDiffusionType {
    FloydSteinberg,
    Atkinson,
}

impl ErrorDiffusionType {
    pub fn dither(
        self,
        buffer: &mut PixelBuffer,
        palette: &Palette,
        diffusion_factor: f64,
    ) -> Result {
        match self {
            ErrorDiffusionType::FloydSteinberg => {
                dither_helper(&FLOYD_STEINBERG, buffer, palette, diffusion_factor)
            }
            ErrorDiffusionType::Atkinson => {
                dither_helper(&ATKINSON, buffer, palette, diffusion_factor)
            }
        }
    }
}

/// Raster-scan error diffusion over an explicit (dx, dy) kernel.
///
/// The scan order is load-bearing: each pixel is quantized against values
/// that already include error diffused from its predecessors, so this loop
/// must stay strictly sequential. Neighbors falling outside the raster are
/// skipped, never wrapped -- a +1 offset at the end of a row does not spill
/// onto the next row.
fn dither_helper(
    kernel: &[KernelEntry],
    buffer: &mut PixelBuffer,
    palette: &Palette,
    diffusion_factor: f64,
) -> Result {
    if palette.is_empty() {
        return Err(DitherpressError::EmptyPalette);
    }

    let width = buffer.width() as isize;
    let height = buffer.height() as isize;
    let data = buffer.data_mut();

    for y in 0..height {
        for x in 0..width {
            let idx = ((y * width + x) * 4) as usize;

            let old = [
                data[idx] as f64,
                data[idx + 1] as f64,
                data[idx + 2] as f64,
            ];
            let new = palette.nearest(old);

            data[idx] = new.r;
            data[idx + 1] = new.g;
            data[idx + 2] = new.b;

            let error = [
                old[0] - new.r as f64,
                old[1] - new.g as f64,
                old[2] - new.b as f64,
            ];

            for &(dx, dy, weight) in kernel {
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || nx >= width || ny >= height {
                    continue;
                }

                let nidx = ((ny * width + nx) * 4) as usize;
                for channel in 0..3 {
                    let value = data[nidx + channel] as f64
                        + error[channel] * weight * diffusion_factor;
                    // Ties round to even, matching clamped 8-bit stores.
                    data[nidx + channel] = value.clamp(0.0, 255.0).round_ties_even() as u8;
                }
            }
        }
    }

    Ok(())
}
