use rayon::prelude::*;

use crate::{
    buffer::PixelBuffer,
    color_palette::Palette,
    error::{DitherpressError, Result},
};

/// 4x4 Bayer threshold matrix.
pub const BAYER4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Ordered (Bayer) dithering, in place.
///
/// Each channel is perturbed by a position-derived threshold before the
/// nearest-color lookup; no error propagates between pixels, so the output
/// of a pixel depends only on its own color and its (x mod 4, y mod 4)
/// position. That independence makes row-parallel processing safe.
pub fn dither_ordered(buffer: &mut PixelBuffer, palette: &Palette) -> Result {
    if palette.is_empty() {
        return Err(DitherpressError::EmptyPalette);
    }

    let row_bytes = buffer.width() as usize * 4;
    buffer
        .data_mut()
        .par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let threshold = (BAYER4[y % 4][x % 4] as f64 / 16.0) - 0.5;

                // The perturbed channels are matched unrounded.
                let perturbed = [
                    (px[0] as f64 + threshold * 32.0).clamp(0.0, 255.0),
                    (px[1] as f64 + threshold * 32.0).clamp(0.0, 255.0),
                    (px[2] as f64 + threshold * 32.0).clamp(0.0, 255.0),
                ];

                let new = palette.nearest(perturbed);
                px[0] = new.r;
                px[1] = new.g;
                px[2] = new.b;
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_palette::{PaletteSpec, Rgb};

    fn uniform(width: u32, height: u32, value: u8) -> PixelBuffer {
        let data = (0..width * height)
            .flat_map(|_| [value, value, value, 255])
            .collect();
        PixelBuffer::new(width, height, data).unwrap()
    }

    #[test]
    fn mid_gray_follows_the_bayer_pattern() {
        // For value 128 the perturbed channel is 112 + 2 * m, which crosses
        // the black/white midpoint at m = 8: matrix entries <= 7 go black.
        let mut buffer = uniform(4, 4, 128);
        let palette = PaletteSpec::BlackWhite.generate();
        dither_ordered(&mut buffer, &palette).unwrap();

        for y in 0..4usize {
            for x in 0..4usize {
                let expected = if BAYER4[y][x] <= 7 {
                    Rgb::new(0, 0, 0)
                } else {
                    Rgb::new(255, 255, 255)
                };
                let idx = (y * 4 + x) * 4;
                let px = &buffer.data()[idx..idx + 3];
                assert_eq!(Rgb::new(px[0], px[1], px[2]), expected, "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn pattern_tiles_with_period_four() {
        let mut small = uniform(4, 4, 97);
        let mut large = uniform(8, 8, 97);
        let palette = PaletteSpec::Minimal3.generate();
        dither_ordered(&mut small, &palette).unwrap();
        dither_ordered(&mut large, &palette).unwrap();

        for y in 0..8usize {
            for x in 0..8usize {
                let a = large.index(x as u32, y as u32);
                let b = small.index((x % 4) as u32, (y % 4) as u32);
                assert_eq!(&large.data()[a..a + 4], &small.data()[b..b + 4]);
            }
        }
    }

    #[test]
    fn no_cross_pixel_dependency() {
        // Quantizing a sub-rectangle in isolation must agree with the same
        // positions inside the full image -- unlike error diffusion, where
        // the scan history matters.
        let gradient: Vec<u8> = (0..6u32 * 6)
            .flat_map(|i| {
                let v = (i * 251 % 256) as u8;
                [v, v.wrapping_mul(3), v.wrapping_add(40), 255]
            })
            .collect();
        let mut full = PixelBuffer::new(6, 6, gradient.clone()).unwrap();

        // First row alone.
        let mut row = PixelBuffer::new(6, 1, gradient[..6 * 4].to_vec()).unwrap();

        let palette = PaletteSpec::Cga4.generate();
        dither_ordered(&mut full, &palette).unwrap();
        dither_ordered(&mut row, &palette).unwrap();

        assert_eq!(&full.data()[..6 * 4], row.data());
    }

    #[test]
    fn extreme_values_saturate() {
        let palette = PaletteSpec::BlackWhite.generate();

        let mut white = uniform(4, 4, 255);
        dither_ordered(&mut white, &palette).unwrap();
        assert!(white.data().chunks_exact(4).all(|px| px[0] == 255));

        let mut black = uniform(4, 4, 0);
        dither_ordered(&mut black, &palette).unwrap();
        assert!(black.data().chunks_exact(4).all(|px| px[0] == 0));
    }
}
