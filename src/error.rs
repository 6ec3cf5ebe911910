//! Error types for encoding, presets and the session

use std::path::PathBuf;

use kontrol_transport::TransportError;
use thiserror::Error;

/// A model value that cannot be put on the wire
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: u32 },

    #[error("Invalid page {0} (expected 0-3)")]
    InvalidPage(u8),

    #[error("Image too large for one bitmap frame: {width}x{height}")]
    ImageTooLarge { width: u32, height: u32 },
}

impl EncodingError {
    pub(crate) fn out_of_range(field: &'static str, value: impl Into<u32>) -> Self {
        EncodingError::OutOfRange {
            field,
            value: value.into(),
        }
    }
}

/// A received key-zone frame that does not match the known layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unexpected frame length {got}, expected {expected}")]
    WrongLength { expected: usize, got: usize },

    #[error("Tag mismatch: expected 0x{expected:02X}, got 0x{got:02X}")]
    WrongTag { expected: u8, got: u8 },

    #[error("Unknown {field} code 0x{code:02X}")]
    UnknownCode { field: &'static str, code: u16 },
}

#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse preset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize preset: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Anything that can go wrong during an apply cycle or poll tick
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Preset(#[from] PresetError),
}
