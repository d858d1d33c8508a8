use rayon::prelude::*;

use crate::buffer::PixelBuffer;

/// Global linear contrast stretch, in place.
///
/// Luma here is the plain arithmetic mean of R, G and B (not a perceptual
/// weighting). The global luma min/max drive an identical remap of every
/// channel, so a channel that sits outside the luma range clips -- that hue
/// shift is part of the contract, not a bug to correct.
pub fn enhance_contrast(buffer: &mut PixelBuffer) {
    let (min, max) = buffer
        .data()
        .par_chunks_exact(4)
        .map(|px| (px[0] as f64 + px[1] as f64 + px[2] as f64) / 3.0)
        .fold(
            || (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), luma| (min.min(luma), max.max(luma)),
        )
        .reduce(
            || (f64::INFINITY, f64::NEG_INFINITY),
            |(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)),
        );

    // Flat image: nothing to stretch, and avoids dividing by zero.
    let range = max - min;
    if range <= 0.0 {
        return;
    }

    buffer.data_mut().par_chunks_exact_mut(4).for_each(|px| {
        for channel in px.iter_mut().take(3) {
            let stretched = ((*channel as f64 - min) / range * 255.0).round();
            *channel = stretched.clamp(0.0, 255.0) as u8;
        }
    });
}
