use std::fmt;

/// The main error type for the ditherpress crate
#[derive(Debug)]
pub enum DitherpressError {
    /// Error occurred while reading or decoding an image
    ImageDecode(image::ImageError),

    /// Error occurred while writing or encoding an image
    ImageEncode(image::ImageError),

    /// Error occurred during I/O operations (file read/write)
    Io(std::io::Error),

    /// A palette specification string or parameter was not recognized
    InvalidPaletteSpec(String),

    /// A zero-entry palette reached the color matcher
    EmptyPalette,

    /// Pixel buffer length does not match width * height * 4, or a dimension is zero
    InvalidDimensions {
        width: u32,
        height: u32,
        len: usize,
    },

    /// Error occurred while parsing or validating a settings file
    Config(String),
}

impl fmt::Display for DitherpressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DitherpressError::ImageDecode(e) => write!(f, "Image decode error: {}", e),
            DitherpressError::ImageEncode(e) => write!(f, "Image encode error: {}", e),
            DitherpressError::Io(e) => write!(f, "I/O error: {}", e),
            DitherpressError::InvalidPaletteSpec(s) => {
                write!(f, "Invalid palette spec: {}", s)
            }
            DitherpressError::EmptyPalette => write!(f, "Palette has no entries"),
            DitherpressError::InvalidDimensions { width, height, len } => write!(
                f,
                "Buffer of {} bytes does not describe a {}x{} RGBA image",
                len, width, height
            ),
            DitherpressError::Config(s) => write!(f, "Config parse error: {}", s),
        }
    }
}

impl std::error::Error for DitherpressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DitherpressError::ImageDecode(e) | DitherpressError::ImageEncode(e) => Some(e),
            DitherpressError::Io(e) => Some(e),
            _ => None,
        }
    }
}

// From implementations for automatic conversion from common error types

impl From<image::ImageError> for DitherpressError {
    fn from(err: image::ImageError) -> Self {
        // Distinguish between decode and encode errors based on the error kind
        match &err {
            image::ImageError::Encoding(_) => DitherpressError::ImageEncode(err),
            _ => DitherpressError::ImageDecode(err),
        }
    }
}

impl From<std::io::Error> for DitherpressError {
    fn from(err: std::io::Error) -> Self {
        DitherpressError::Io(err)
    }
}

impl From<json::Error> for DitherpressError {
    fn from(err: json::Error) -> Self {
        DitherpressError::Config(err.to_string())
    }
}

// Convenience type alias for Results using DitherpressError
pub type Result<T = ()> = std::result::Result<T, DitherpressError>;
