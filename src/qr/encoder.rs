//! QR code encoder

use crate::error::{Error, Result};
use crate::qr::ErrorCorrection;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

/// Width of the blank border around the symbol, in modules
pub const QUIET_ZONE_MODULES: u32 = 4;

/// QR code encoder with a fixed correction level and module scale
#[derive(Debug, Clone, Copy)]
pub struct QrEncoder {
    ec_level: ErrorCorrection,
    box_size: u32,
}

/// A symbol encoded once and ready to be rendered to any backend
pub struct RenderedSymbol {
    code: QrCode,
    box_size: u32,
    pixel_size: u32,
}

impl QrEncoder {
    /// Create an encoder with the given correction level and pixels per module
    pub fn new(ec_level: ErrorCorrection, box_size: u32) -> Self {
        Self {
            ec_level,
            box_size: box_size.max(1),
        }
    }

    /// Whether this build can produce SVG output
    pub fn supports_svg() -> bool {
        cfg!(feature = "svg")
    }

    /// Pixels per module
    pub fn box_size(&self) -> u32 {
        self.box_size
    }

    /// Encode `data` into a symbol, choosing the smallest version that fits.
    ///
    /// Fails when the payload exceeds version 40 or the rendered side length
    /// would not fit in a `u32`.
    pub fn encode(&self, data: &str) -> Result<RenderedSymbol> {
        let code =
            QrCode::with_error_correction_level(data.as_bytes(), self.ec_level.to_ec_level())
                .map_err(|e| {
                    Error::QrEncode(format!(
                        "{} bytes at level {}: {e}",
                        data.len(),
                        self.ec_level
                    ))
                })?;

        let pixel_size = (code.width() as u32 + 2 * QUIET_ZONE_MODULES)
            .checked_mul(self.box_size)
            .ok_or_else(|| {
                Error::QrEncode(format!(
                    "box size {} is too large for a {}-module symbol",
                    self.box_size,
                    code.width()
                ))
            })?;

        tracing::trace!(
            version = ?code.version(),
            modules = code.width(),
            pixel_size,
            ec_level = %self.ec_level,
            "Encoded QR symbol"
        );

        Ok(RenderedSymbol {
            code,
            box_size: self.box_size,
            pixel_size,
        })
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new(ErrorCorrection::default(), crate::catalog::DEFAULT_BOX_SIZE)
    }
}

impl RenderedSymbol {
    /// Modules per side, excluding the quiet zone
    pub fn modules(&self) -> u32 {
        self.code.width() as u32
    }

    /// Side length in pixels of the rendered image, quiet zone included
    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    /// Render as a black-on-white grayscale bitmap
    pub fn to_image(&self) -> GrayImage {
        self.code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .module_dimensions(self.box_size, self.box_size)
            .dark_color(Luma([0]))
            .light_color(Luma([255]))
            .build()
    }

    /// Render as PNG bytes
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(self.to_image())
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }

    /// Render as an SVG document
    #[cfg(feature = "svg")]
    pub fn to_svg(&self) -> String {
        use qrcode::render::svg;

        self.code
            .render::<svg::Color>()
            .quiet_zone(true)
            .module_dimensions(self.box_size, self.box_size)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build()
    }
}
