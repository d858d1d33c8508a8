use std::{
    fs::File,
    io::{Read, Write},
};

use json::JsonValue;

use crate::{
    color_palette::PaletteSpec,
    dithering::DitheringType,
    error::{DitherpressError, Result},
};

/// Final encoding handed to the external encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Webp,
    Gif,
}

/// Immutable settings bundle for one processing run.
///
/// Built once per call, never patched in place. `algorithm`, `palette` and
/// `diffusion_factor` are required in the JSON form; the remaining fields
/// default to `resize = false`, `max_dimension = 400`,
/// `enhance_contrast = false`, `output_format = png`, `gif_quality = 10`
/// when absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DitherSettings {
    pub algorithm: DitheringType,
    pub palette: PaletteSpec,
    /// Scales propagated error in the error-diffusion algorithms, in [0, 1].
    /// Ignored by ordered dithering.
    pub diffusion_factor: f64,
    pub resize: bool,
    pub max_dimension: u32,
    pub enhance_contrast: bool,
    pub output_format: OutputFormat,
    /// GIF encoder quality/speed trade-off in [1, 20]; 1 is best quality.
    pub gif_quality: u8,
}

impl DitherSettings {
    fn to_config(json_string: String) -> Result<DitherSettings> {
        let parsed = json::parse(json_string.as_str())?;

        // Unrecognized algorithm strings intentionally fall back to
        // Floyd-Steinberg; unrecognized palettes are hard errors.
        let algorithm = match parsed["algorithm"].as_str() {
            Some("ordered") => DitheringType::Ordered,
            Some("atkinson") => DitheringType::Atkinson,
            Some(_) => DitheringType::FloydSteinberg,
            None => return config_error("Couldn't parse algorithm"),
        };

        let palette = match parsed["palette"].as_str() {
            Some("bw") => PaletteSpec::BlackWhite,
            Some("rgb") => {
                let bits = match parsed["color_depth"].as_u8() {
                    Some(val) => val,
                    None => return config_error("Couldn't parse color_depth"),
                };
                if !(1..=4).contains(&bits) {
                    return config_error("color_depth should be in the range 1..=4");
                }
                PaletteSpec::RgbCube(bits)
            }
            Some("custom") => {
                let count = match parsed["custom_colors"].as_u8() {
                    Some(val) => val,
                    None => return config_error("Couldn't parse custom_colors"),
                };
                if !(2..=64).contains(&count) {
                    return config_error("custom_colors should be in the range 2..=64");
                }
                PaletteSpec::CustomCube(count)
            }
            Some("2bit") => PaletteSpec::Cga4,
            Some("extreme") => PaletteSpec::Minimal3,
            Some(other) => {
                return Err(DitherpressError::InvalidPaletteSpec(other.to_string()));
            }
            None => return config_error("Couldn't parse palette"),
        };

        let diffusion_factor = match parsed["diffusion_factor"].as_f64() {
            Some(val) => val,
            None => return config_error("Couldn't parse diffusion_factor"),
        };
        if !(0.0..=1.0).contains(&diffusion_factor) {
            return config_error("diffusion_factor should be in the range 0.0..=1.0");
        }

        let resize = parsed["resize"].as_bool().unwrap_or(false);
        let max_dimension = match parsed["max_dimension"] {
            JsonValue::Null => 400,
            ref val => match val.as_u32() {
                Some(dim) if dim >= 1 => dim,
                _ => return config_error("max_dimension should be a positive integer"),
            },
        };
        let enhance_contrast = parsed["enhance_contrast"].as_bool().unwrap_or(false);

        let output_format = match parsed["output_format"].as_str() {
            None | Some("png") => OutputFormat::Png,
            Some("webp") => OutputFormat::Webp,
            Some("gif") => OutputFormat::Gif,
            Some(_) => return config_error("Not recognized output_format"),
        };

        let gif_quality = match parsed["gif_quality"] {
            JsonValue::Null => 10,
            ref val => match val.as_u8() {
                Some(q) if (1..=20).contains(&q) => q,
                _ => return config_error("gif_quality should be in the range 1..=20"),
            },
        };

        Ok(DitherSettings {
            algorithm,
            palette,
            diffusion_factor,
            resize,
            max_dimension,
            enhance_contrast,
            output_format,
            gif_quality,
        })
    }

    fn to_json(&self) -> String {
        let mut data = JsonValue::new_object();

        data["algorithm"] = self.algorithm.into();
        data["palette"] = match self.palette {
            PaletteSpec::BlackWhite => "bw".into(),
            PaletteSpec::RgbCube(_) => "rgb".into(),
            PaletteSpec::CustomCube(_) => "custom".into(),
            PaletteSpec::Cga4 => "2bit".into(),
            PaletteSpec::Minimal3 => "extreme".into(),
        };
        if let PaletteSpec::RgbCube(bits) = self.palette {
            data["color_depth"] = bits.into();
        }
        if let PaletteSpec::CustomCube(count) = self.palette {
            data["custom_colors"] = count.into();
        }
        data["diffusion_factor"] = self.diffusion_factor.into();
        data["resize"] = self.resize.into();
        data["max_dimension"] = self.max_dimension.into();
        data["enhance_contrast"] = self.enhance_contrast.into();
        data["output_format"] = match self.output_format {
            OutputFormat::Png => "png".into(),
            OutputFormat::Webp => "webp".into(),
            OutputFormat::Gif => "gif".into(),
        };
        data["gif_quality"] = self.gif_quality.into();

        data.to_string()
    }

    pub fn read_config(path: &str) -> Result<DitherSettings> {
        let mut file = File::open(path)?;
        let mut buff: Vec<u8> = Vec::new();
        let _ = file.read_to_end(&mut buff)?;

        let json_string = String::from_utf8(buff)
            .map_err(|e| DitherpressError::Config(e.to_string()))?;

        DitherSettings::to_config(json_string)
    }

    pub fn write_config(&self, path: &str) -> Result {
        let string = self.to_json();
        let mut file = File::create(path)?;
        file.write_all(string.as_bytes())?;
        Ok(())
    }
}

fn config_error(msg: &str) -> Result<DitherSettings> {
    Err(DitherpressError::Config(String::from(msg)))
}

impl From<DitheringType> for JsonValue {
    fn from(algorithm: DitheringType) -> Self {
        match algorithm {
            DitheringType::FloydSteinberg => JsonValue::String(String::from("floydSteinberg")),
            DitheringType::Ordered => JsonValue::String(String::from("ordered")),
            DitheringType::Atkinson => JsonValue::String(String::from("atkinson")),
        }
    }
}
