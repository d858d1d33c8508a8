use std::{fs::File, io::BufWriter, path::Path};

use image::{
    DynamicImage, ExtendedColorType, ImageBuffer, ImageFormat, ImageReader, Rgba,
    codecs::gif::GifEncoder,
};

use crate::{
    buffer::PixelBuffer,
    config::OutputFormat,
    error::Result,
};

pub fn read_image(path: &Path) -> Result<DynamicImage> {
    let image = ImageReader::open(path)?.decode()?;
    Ok(image)
}

/// Flattens a decoded image into the pipeline's RGBA8 buffer form.
pub fn dynimg_to_buffer(image: &DynamicImage) -> Result<PixelBuffer> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::new(width, height, rgba.into_raw())
}

pub fn buffer_to_dynimg(buffer: PixelBuffer) -> DynamicImage {
    let (width, height) = (buffer.width(), buffer.height());
    DynamicImage::ImageRgba8(
        ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(width, height, buffer.into_raw())
            .expect("PixelBuffer invariant guarantees a full RGBA raster"),
    )
}

/// Hands a quantized image to the selected external encoder.
///
/// The pixels are already palette-exact, so the GIF path only maps colors to
/// an index table; `gif_quality` (1 best .. 20 fastest) steers the encoder's
/// speed knob. WebP uses the image crate's lossless encoder.
pub fn write_image(
    image: &DynamicImage,
    path: &Path,
    format: OutputFormat,
    gif_quality: u8,
) -> Result {
    match format {
        OutputFormat::Png => {
            image.write_to(&mut File::create(path)?, ImageFormat::Png)?;
        }
        OutputFormat::Webp => {
            image.write_to(&mut File::create(path)?, ImageFormat::WebP)?;
        }
        OutputFormat::Gif => {
            let rgba = image.to_rgba8();
            let (width, height) = rgba.dimensions();
            let writer = BufWriter::new(File::create(path)?);
            // Quality 1..=20 maps onto the encoder's speed range 1..=30.
            let speed = (gif_quality as i32 * 3 / 2).max(1);
            let mut encoder = GifEncoder::new_with_speed(writer, speed);
            encoder.encode(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)?;
        }
    }
    Ok(())
}
