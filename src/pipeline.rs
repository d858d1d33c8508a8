use image::{ImageBuffer, Rgba, imageops};

use crate::{buffer::PixelBuffer, config::DitherSettings, error::Result};

/// Runs the full quantization pipeline on one buffer:
/// optional resize, optional contrast stretch, palette synthesis, dithering.
///
/// The returned buffer carries the final dimensions, which differ from the
/// input's only when `settings.resize` shrank it.
pub fn process(buffer: PixelBuffer, settings: &DitherSettings) -> Result<PixelBuffer> {
    let mut buffer = if settings.resize {
        resize(buffer, settings.max_dimension)?
    } else {
        buffer
    };

    if settings.enhance_contrast {
        crate::contrast::enhance_contrast(&mut buffer);
    }

    let palette = settings.palette.generate();
    settings
        .algorithm
        .dither(&mut buffer, &palette, settings.diffusion_factor)?;

    Ok(buffer)
}

/// Shrink-only, aspect-preserving target dimensions: the larger dimension is
/// capped at `max_dimension` and the other scales proportionally (rounded,
/// but never below one pixel, so extreme aspect ratios stay valid rasters).
/// Images already within the bound keep their size; nothing is ever enlarged.
pub fn resized_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let max = max_dimension as f64;
    if width > height && width > max_dimension {
        let scaled = (height as f64 * (max / width as f64)).round() as u32;
        (max_dimension, scaled.max(1))
    } else if height > width && height > max_dimension {
        let scaled = (width as f64 * (max / height as f64)).round() as u32;
        (scaled.max(1), max_dimension)
    } else if width == height && width > max_dimension {
        (max_dimension, max_dimension)
    } else {
        (width, height)
    }
}

/// Bilinear downscale through the image crate; no-op when the buffer is
/// already within bounds.
fn resize(buffer: PixelBuffer, max_dimension: u32) -> Result<PixelBuffer> {
    let (width, height) = (buffer.width(), buffer.height());
    let (target_width, target_height) = resized_dimensions(width, height, max_dimension);
    if (target_width, target_height) == (width, height) {
        return Ok(buffer);
    }

    let source: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, buffer.into_raw())
            .expect("PixelBuffer invariant guarantees a full RGBA raster");
    let scaled = imageops::resize(
        &source,
        target_width,
        target_height,
        imageops::FilterType::Triangle,
    );

    PixelBuffer::new(target_width, target_height, scaled.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color_palette::PaletteSpec,
        config::OutputFormat,
        dithering::DitheringType,
    };

    fn settings(algorithm: DitheringType, palette: PaletteSpec) -> DitherSettings {
        DitherSettings {
            algorithm,
            palette,
            diffusion_factor: 1.0,
            resize: false,
            max_dimension: 400,
            enhance_contrast: false,
            output_format: OutputFormat::Png,
            gif_quality: 10,
        }
    }

    #[test]
    fn resize_policy() {
        assert_eq!(resized_dimensions(1000, 500, 400), (400, 200));
        assert_eq!(resized_dimensions(500, 1000, 400), (200, 400));
        assert_eq!(resized_dimensions(500, 500, 400), (400, 400));
        // Never enlarges.
        assert_eq!(resized_dimensions(300, 200, 400), (300, 200));
        assert_eq!(resized_dimensions(400, 400, 400), (400, 400));
    }

    #[test]
    fn extreme_aspect_ratio_keeps_one_pixel() {
        // The short side rounds to zero arithmetically; it must clamp to a
        // valid 1-pixel edge instead.
        assert_eq!(resized_dimensions(1000, 1, 400), (400, 1));
        assert_eq!(resized_dimensions(1, 1000, 400), (1, 400));
    }

    #[test]
    fn extreme_aspect_ratio_survives_processing() {
        let buffer = PixelBuffer::new(1000, 1, vec![180; 1000 * 4]).unwrap();
        let mut config = settings(DitheringType::Ordered, PaletteSpec::BlackWhite);
        config.resize = true;
        config.max_dimension = 400;

        let result = process(buffer, &config).unwrap();
        assert_eq!((result.width(), result.height()), (400, 1));
    }

    #[test]
    fn white_image_stays_white() {
        let buffer = PixelBuffer::new(2, 2, vec![255; 16]).unwrap();
        for algorithm in [
            DitheringType::FloydSteinberg,
            DitheringType::Ordered,
            DitheringType::Atkinson,
        ] {
            let result = process(
                buffer.clone(),
                &settings(algorithm, PaletteSpec::BlackWhite),
            )
            .unwrap();
            assert_eq!(result.data(), vec![255; 16].as_slice());
        }
    }

    #[test]
    fn resize_then_dither_reports_final_dimensions() {
        let buffer = PixelBuffer::new(8, 4, vec![200; 8 * 4 * 4]).unwrap();
        let mut config = settings(DitheringType::Ordered, PaletteSpec::BlackWhite);
        config.resize = true;
        config.max_dimension = 4;

        let result = process(buffer, &config).unwrap();
        assert_eq!((result.width(), result.height()), (4, 2));
        assert_eq!(result.data().len(), 4 * 2 * 4);
    }

    #[test]
    fn contrast_runs_before_dithering() {
        // Two mid-tones far from both palette extremes; with the stretch
        // enabled they land exactly on black and white before quantization,
        // so even factor-1 diffusion leaves no residue on the neighbor.
        let buffer = PixelBuffer::new(
            2,
            1,
            vec![100, 100, 100, 255, 180, 180, 180, 255],
        )
        .unwrap();
        let mut config = settings(DitheringType::FloydSteinberg, PaletteSpec::BlackWhite);
        config.enhance_contrast = true;

        let result = process(buffer, &config).unwrap();
        assert_eq!(result.data(), &[0, 0, 0, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn source_buffer_is_not_aliased() {
        // `process` consumes its buffer; callers keep the original by
        // cloning, and the clone must be unaffected.
        let original = PixelBuffer::new(2, 2, vec![128; 16]).unwrap();
        let kept = original.clone();
        let _ = process(original, &settings(DitheringType::Ordered, PaletteSpec::BlackWhite))
            .unwrap();
        assert!(kept.data().iter().step_by(4).all(|&v| v == 128));
    }
}
