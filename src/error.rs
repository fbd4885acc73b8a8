//! Error types for qrpages operations

use thiserror::Error;

/// Result type alias using qrpages' Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrpages operations
#[derive(Error, Debug)]
pub enum Error {
    /// Requested campaign is not part of the campaign table
    #[error("Campaign '{name}' not found. Available: {}", .available.join(", "))]
    CampaignNotFound {
        /// The name that was looked up
        name: String,
        /// Every campaign name known to the catalog
        available: Vec<String>,
    },

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Structured output could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}
