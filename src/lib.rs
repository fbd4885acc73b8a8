//! qrpages - campaign QR code assets for static-site hosting
//!
//! Expands a fixed table of named campaigns into redirect URLs under a site
//! root and renders each one to PNG (and SVG) files on disk. Scanning a code
//! lands on the site's redirect page for that campaign, which forwards to the
//! UTM-tagged destination.
//!
//! # Features
//!
//! - **Catalog**: immutable size-preset and campaign tables, injectable from configuration
//! - **Links**: UTM query construction and redirect URL resolution via `url`
//! - **Rendering**: QR symbol encoding delegated to `qrcode`, PNG via `image`, optional SVG
//! - **Batch generation**: best-effort over every campaign with a failure summary
//!
//! # Example
//!
//! ```no_run
//! use qrpages::{Catalog, Generator};
//!
//! fn main() -> qrpages::Result<()> {
//!     let generator = Generator::new(
//!         Catalog::builtin(),
//!         "https://example.github.io/qr-hosting/",
//!         "assets/qr-codes",
//!     )?;
//!
//!     let output = generator.generate_campaign("msft-2025", "poster")?;
//!     println!("{} -> {}", output.redirect_url, output.files);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod links;
pub mod logging;
pub mod output;
pub mod qr;

// Re-exports for convenience
pub use error::{Error, Result};

pub use catalog::{
    Campaign, Catalog, DEFAULT_BOX_SIZE, DEFAULT_PRESET, MAX_BOX_SIZE, SizePreset, UtmParams,
};
pub use config::{GeneratorOptions, LogRotation, LoggingOptions, QrPagesConfig};
pub use generator::{BatchReport, CampaignFailure, CampaignOutput, Generator};
pub use links::{build_tracking_url, join_redirect_url};
pub use qr::{AssetFormat, ErrorCorrection, GeneratedAsset, GeneratedFiles, QrEncoder};
