use thiserror::Error;

use crate::image::ImageError;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum BadgeError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// The reference image could not be loaded or encoded
    Image(#[from] ImageError),

    #[error("invalid configuration: {0}")]
    /// The TOML configuration could not be parsed
    Config(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    /// A configuration value parsed but cannot be used, e.g. an unknown page size
    Setting(String),

    #[error("invalid badge records: {0}")]
    /// The JSON badge records could not be parsed
    Records(#[from] serde_json::Error),

    #[error("invalid colour format: {0:?}")]
    /// A colour string had the right shape but contained non-hex digits
    InvalidColourFormat(String),

    #[error("invalid page geometry: {0}")]
    /// The page / card dimensions cannot produce a usable grid
    Geometry(String),

    #[error("page {0} is missing from the document")]
    /// A page listed in the page order no longer exists in the arena
    PageMissing(usize),
}
