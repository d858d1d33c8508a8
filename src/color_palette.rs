use itertools::Itertools;

use crate::error::{DitherpressError, Result};

/// An opaque 8-bit RGB color. Alpha never participates in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// How to synthesize the target palette for one dithering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSpec {
    /// Black and white, 2 colors
    BlackWhite,
    /// Uniform RGB lattice with 2^bits levels per channel (bits in 1..=4)
    RgbCube(u8),
    /// First n entries of the smallest cube lattice holding n colors (n in 2..=64)
    CustomCube(u8),
    /// Classic CGA/retro palette: black, cyan, magenta, white
    Cga4,
    /// Ultra-minimal: black, mid-gray, white
    Minimal3,
}

impl PaletteSpec {
    /// Builds the ordered color set for this spec. Pure and deterministic;
    /// every variant yields a non-empty palette.
    pub fn generate(self) -> Palette {
        let colors = match self {
            PaletteSpec::BlackWhite => vec![BLACK, WHITE],
            PaletteSpec::RgbCube(bits) => {
                let levels = 1u32 << bits;
                cube_lattice(levels, levels.pow(3) as usize)
            }
            PaletteSpec::CustomCube(n) => {
                let side = (n as f64).powf(1.0 / 3.0).ceil() as u32;
                cube_lattice(side, n as usize)
            }
            PaletteSpec::Cga4 => vec![
                BLACK,
                Rgb::new(0, 255, 255),
                Rgb::new(255, 0, 255),
                WHITE,
            ],
            PaletteSpec::Minimal3 => vec![BLACK, Rgb::new(128, 128, 128), WHITE],
        };

        Palette { colors }
    }
}

/// Enumerate an evenly spaced `side^3` lattice in r-major, then g, then b
/// order and keep the first `count` entries.
fn cube_lattice(side: u32, count: usize) -> Vec<Rgb> {
    let step = if side > 1 { 255.0 / (side - 1) as f64 } else { 255.0 };

    (0..side)
        .cartesian_product(0..side)
        .cartesian_product(0..side)
        .map(|((r, g), b)| {
            Rgb::new(
                (r as f64 * step).round() as u8,
                (g as f64 * step).round() as u8,
                (b as f64 * step).round() as u8,
            )
        })
        .take(count)
        .collect()
}

/// An ordered, non-empty set of target colors.
///
/// Order matters for tie-breaking: the first entry at minimum distance wins
/// a nearest-color lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Result<Self> {
        if colors.is_empty() {
            return Err(DitherpressError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Nearest palette entry to `color` by squared Euclidean RGB distance.
    ///
    /// Channels are `f64` so error-perturbed values can be matched without
    /// rounding first. Distance stays squared on purpose: the square root is
    /// monotonic and would only cost cycles.
    pub fn closest(&self, color: [f64; 3]) -> Result<Rgb> {
        if self.colors.is_empty() {
            return Err(DitherpressError::EmptyPalette);
        }
        Ok(self.nearest(color))
    }

    /// Infallible lookup for callers that have already checked non-emptiness.
    pub(crate) fn nearest(&self, [r, g, b]: [f64; 3]) -> Rgb {
        let mut min_distance = f64::INFINITY;
        let mut closest = self.colors[0];

        for &entry in &self.colors {
            let dr = r - entry.r as f64;
            let dg = g - entry.g as f64;
            let db = b - entry.b as f64;
            let distance = dr * dr + dg * dg + db * db;

            // Strict comparison: the first entry at the minimum wins.
            if distance < min_distance {
                min_distance = distance;
                closest = entry;
            }
        }

        closest
    }
}
