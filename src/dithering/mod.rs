use crate::{
    buffer::PixelBuffer,
    color_palette::Palette,
    dithering::{error_diffusion::ErrorDiffusionType, threshold::dither_ordered},
    error::Result,
};

pub mod error_diffusion;
pub mod threshold;

/// The three quantization strategies. Error-diffusion variants scale the
/// propagated error by `diffusion_factor`; the ordered variant ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitheringType {
    FloydSteinberg,
    Ordered,
    Atkinson,
}

impl DitheringType {
    /// Rewrites every pixel's RGB channels to an exact palette entry, in
    /// place. Alpha is passed through untouched.
    pub fn dither(
        self,
        buffer: &mut PixelBuffer,
        palette: &Palette,
        diffusion_factor: f64,
    ) -> Result {
        match self {
            DitheringType::FloydSteinberg => ErrorDiffusionType::FloydSteinberg.dither(
                buffer,
                palette,
                diffusion_factor,
            ),
            DitheringType::Atkinson => {
                ErrorDiffusionType::Atkinson.dither(buffer, palette, diffusion_factor)
            }
            DitheringType::Ordered => dither_ordered(buffer, palette),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_palette::PaletteSpec;

    #[test]
    fn every_output_pixel_is_a_palette_entry() {
        let palette = PaletteSpec::Cga4.generate();
        let data: Vec<u8> = (0..16 * 16)
            .flat_map(|i| [(i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8, 255])
            .collect();

        for algorithm in [
            DitheringType::FloydSteinberg,
            DitheringType::Ordered,
            DitheringType::Atkinson,
        ] {
            let mut buffer = PixelBuffer::new(16, 16, data.clone()).unwrap();
            algorithm.dither(&mut buffer, &palette, 0.75).unwrap();

            for px in buffer.data().chunks_exact(4) {
                let rgb = crate::color_palette::Rgb::new(px[0], px[1], px[2]);
                assert!(
                    palette.colors().contains(&rgb),
                    "{:?} produced off-palette pixel {:?}",
                    algorithm,
                    rgb
                );
                assert_eq!(px[3], 255);
            }
        }
    }

    #[test]
    fn algorithms_are_deterministic() {
        let palette = PaletteSpec::BlackWhite.generate();
        let data: Vec<u8> = (0..8 * 8).flat_map(|i| [(i * 31 % 256) as u8; 4]).collect();

        for algorithm in [
            DitheringType::FloydSteinberg,
            DitheringType::Ordered,
            DitheringType::Atkinson,
        ] {
            let mut first = PixelBuffer::new(8, 8, data.clone()).unwrap();
            let mut second = PixelBuffer::new(8, 8, data.clone()).unwrap();
            algorithm.dither(&mut first, &palette, 0.6).unwrap();
            algorithm.dither(&mut second, &palette, 0.6).unwrap();
            assert_eq!(first, second);
        }
    }
}
