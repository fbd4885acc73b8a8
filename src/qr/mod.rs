//! QR code rendering
//!
//! Symbol encoding is delegated to the `qrcode` crate. This module maps the
//! tool's correction letters and size presets onto it and describes the
//! files a generation produces.

mod encoder;

pub use encoder::{QUIET_ZONE_MODULES, QrEncoder, RenderedSymbol};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Error-correction strength of a QR symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// ~7% of codewords recoverable
    #[serde(rename = "L")]
    Low,
    /// ~15% of codewords recoverable
    #[serde(rename = "M")]
    Medium,
    /// ~25% of codewords recoverable
    #[default]
    #[serde(rename = "Q")]
    Quartile,
    /// ~30% of codewords recoverable
    #[serde(rename = "H")]
    High,
}

impl ErrorCorrection {
    /// Map a correction letter (`L`, `M`, `Q`, `H`, case-insensitive) to a level.
    ///
    /// Missing or unrecognised letters fall back to [`ErrorCorrection::Quartile`].
    pub fn from_letter(letter: Option<&str>) -> Self {
        match letter.map(|l| l.trim().to_ascii_uppercase()).as_deref() {
            Some("L") => Self::Low,
            Some("M") => Self::Medium,
            Some("Q") => Self::Quartile,
            Some("H") => Self::High,
            other => {
                if let Some(unknown) = other {
                    tracing::debug!(letter = unknown, "Unknown error correction level, using Q");
                }
                Self::default()
            }
        }
    }

    /// Single-letter label
    pub fn letter(self) -> char {
        match self {
            Self::Low => 'L',
            Self::Medium => 'M',
            Self::Quartile => 'Q',
            Self::High => 'H',
        }
    }

    pub(crate) fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            Self::Low => qrcode::EcLevel::L,
            Self::Medium => qrcode::EcLevel::M,
            Self::Quartile => qrcode::EcLevel::Q,
            Self::High => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFormat {
    /// Raster PNG image
    Png,
    /// Vector SVG document
    Svg,
}

impl AssetFormat {
    /// File extension without the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for AssetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A file written by a generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedAsset {
    /// Location on disk
    pub path: PathBuf,
    /// Format tag
    pub format: AssetFormat,
}

/// Paths written by one generation, keyed by format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GeneratedFiles(BTreeMap<AssetFormat, PathBuf>);

impl GeneratedFiles {
    pub(crate) fn insert(&mut self, format: AssetFormat, path: PathBuf) {
        self.0.insert(format, path);
    }

    /// Path written for `format`, if any
    pub fn get(&self, format: AssetFormat) -> Option<&Path> {
        self.0.get(&format).map(PathBuf::as_path)
    }

    /// The raster output path
    pub fn png(&self) -> Option<&Path> {
        self.get(AssetFormat::Png)
    }

    /// The vector output path, present only when the SVG backend is built in
    pub fn svg(&self) -> Option<&Path> {
        self.get(AssetFormat::Svg)
    }

    /// Number of files written
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was written
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the written assets in format order
    pub fn assets(&self) -> impl Iterator<Item = GeneratedAsset> + '_ {
        self.0.iter().map(|(format, path)| GeneratedAsset {
            path: path.clone(),
            format: *format,
        })
    }
}

impl fmt::Display for GeneratedFiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .0
            .iter()
            .map(|(format, path)| format!("{format}: {}", path.display()))
            .collect::<Vec<_>>();
        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correction_letters() {
        assert_eq!(ErrorCorrection::from_letter(Some("L")), ErrorCorrection::Low);
        assert_eq!(ErrorCorrection::from_letter(Some("m")), ErrorCorrection::Medium);
        assert_eq!(ErrorCorrection::from_letter(Some("Q")), ErrorCorrection::Quartile);
        assert_eq!(ErrorCorrection::from_letter(Some("H")), ErrorCorrection::High);
    }

    #[test]
    fn correction_fallback() {
        assert_eq!(ErrorCorrection::from_letter(None), ErrorCorrection::Quartile);
        assert_eq!(ErrorCorrection::from_letter(Some("X")), ErrorCorrection::Quartile);
        assert_eq!(ErrorCorrection::from_letter(Some("")), ErrorCorrection::Quartile);
        assert_eq!(ErrorCorrection::from_letter(Some("HH")), ErrorCorrection::Quartile);
    }

    #[test]
    fn generated_files_lookup() {
        let mut files = GeneratedFiles::default();
        files.insert(AssetFormat::Svg, PathBuf::from("out/a.svg"));
        files.insert(AssetFormat::Png, PathBuf::from("out/a.png"));

        assert_eq!(files.len(), 2);
        assert_eq!(files.png(), Some(Path::new("out/a.png")));
        let formats: Vec<_> = files.assets().map(|a| a.format).collect();
        assert_eq!(formats, vec![AssetFormat::Png, AssetFormat::Svg]);
        assert_eq!(files.to_string(), "png: out/a.png, svg: out/a.svg");
    }

    #[test]
    fn generated_files_serialize_by_format() {
        let mut files = GeneratedFiles::default();
        files.insert(AssetFormat::Png, PathBuf::from("out/a.png"));
        let value = serde_json::to_value(&files).unwrap();
        assert_eq!(value, serde_json::json!({ "png": "out/a.png" }));
    }
}
