//! Campaign QR asset generation
//!
//! The [`Generator`] owns an immutable [`Catalog`], the site base URL and
//! the output directory. Every call is a synchronous, independent unit of
//! work: encode the payload, then write a PNG and (when the `svg` feature is
//! built in) an SVG next to it.

use crate::catalog::{Campaign, Catalog, SizePreset};
use crate::error::{Error, Result};
use crate::links::join_redirect_url;
use crate::qr::{AssetFormat, ErrorCorrection, GeneratedFiles, QrEncoder};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Result of generating a single campaign
#[derive(Debug, Clone, Serialize)]
pub struct CampaignOutput {
    /// Campaign name
    pub campaign: String,
    /// URL encoded into the QR code (site base joined with the campaign name)
    pub redirect_url: String,
    /// Where the redirect page forwards to
    pub destination: String,
    /// Campaign destination tagged with its UTM parameters
    pub tracking_url: String,
    /// Files written
    pub files: GeneratedFiles,
}

/// A campaign that could not be generated during a batch run
#[derive(Debug, Clone, Serialize)]
pub struct CampaignFailure {
    /// Campaign name
    pub campaign: String,
    /// Rendered error message
    pub error: String,
}

/// Outcome of [`Generator::generate_all`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Campaigns generated successfully, in table order
    pub generated: Vec<CampaignOutput>,
    /// Campaigns that failed, in table order
    pub failed: Vec<CampaignFailure>,
}

impl BatchReport {
    /// Whether every campaign was generated
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of campaigns attempted
    pub fn attempted(&self) -> usize {
        self.generated.len() + self.failed.len()
    }
}

/// Batch QR generator bound to one site and output directory
#[derive(Debug, Clone)]
pub struct Generator {
    catalog: Catalog,
    base_url: String,
    output_dir: PathBuf,
}

impl Generator {
    /// Create a generator, creating `output_dir` if it does not exist yet.
    pub fn new(
        catalog: Catalog,
        base_url: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| {
            Error::Config(format!(
                "Failed to create output directory {}: {e}",
                output_dir.display()
            ))
        })?;

        Ok(Self {
            catalog,
            base_url: base_url.into(),
            output_dir,
        })
    }

    /// Directory assets are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Site base URL redirect pages are hosted under
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every known campaign, in table order
    pub fn campaigns(&self) -> &[Campaign] {
        self.catalog.campaigns()
    }

    /// Every known size preset, in table order
    pub fn size_presets(&self) -> &[SizePreset] {
        self.catalog.presets()
    }

    /// Redirect URL encoded for `campaign`: the base URL joined with the name
    pub fn redirect_url(&self, campaign: &str) -> String {
        join_redirect_url(&self.base_url, campaign)
    }

    /// Encode `data` and write `<output_dir>/<filename>.png` (and `.svg`).
    ///
    /// Unknown presets use the default box size and unknown or missing
    /// correction letters use `Q`.
    pub fn generate(
        &self,
        data: &str,
        filename: &str,
        preset: &str,
        error_correction: Option<&str>,
    ) -> Result<GeneratedFiles> {
        let ec_level = ErrorCorrection::from_letter(error_correction);
        let box_size = self.catalog.box_size(preset);
        let symbol = QrEncoder::new(ec_level, box_size).encode(data)?;

        let mut files = GeneratedFiles::default();

        let png_path = self.asset_path(filename, AssetFormat::Png);
        fs::write(&png_path, symbol.to_png()?)?;
        files.insert(AssetFormat::Png, png_path);

        #[cfg(feature = "svg")]
        {
            let svg_path = self.asset_path(filename, AssetFormat::Svg);
            fs::write(&svg_path, symbol.to_svg())?;
            files.insert(AssetFormat::Svg, svg_path);
        }

        #[cfg(not(feature = "svg"))]
        tracing::warn!(
            "SVG support not available, writing PNG only. Rebuild with `--features svg`"
        );

        info!(
            filename,
            preset,
            box_size,
            ec_level = %ec_level,
            modules = symbol.modules(),
            files = files.len(),
            "Generated QR code"
        );

        Ok(files)
    }

    /// Generate the QR code for a named campaign.
    ///
    /// The encoded payload is the redirect URL, never the destination itself.
    /// Fails with [`Error::CampaignNotFound`] before touching the disk when
    /// the name is unknown.
    pub fn generate_campaign(&self, name: &str, preset: &str) -> Result<CampaignOutput> {
        let campaign = self
            .catalog
            .campaign(name)
            .ok_or_else(|| Error::CampaignNotFound {
                name: name.to_string(),
                available: self.catalog.campaign_names(),
            })?;

        let redirect_url = self.redirect_url(&campaign.name);
        let filename = format!("{}-qr", campaign.name);
        let files = self.generate(&redirect_url, &filename, preset, None)?;

        Ok(CampaignOutput {
            campaign: campaign.name.clone(),
            redirect_url,
            destination: campaign.destination.clone(),
            tracking_url: campaign.tracking_url(),
            files,
        })
    }

    /// Generate every campaign, continuing past individual failures.
    pub fn generate_all(&self, preset: &str) -> BatchReport {
        let mut report = BatchReport::default();

        for campaign in self.catalog.campaigns() {
            match self.generate_campaign(&campaign.name, preset) {
                Ok(output) => report.generated.push(output),
                Err(err) => {
                    error!(
                        campaign = %campaign.name,
                        error = %err,
                        "Failed to generate campaign QR"
                    );
                    report.failed.push(CampaignFailure {
                        campaign: campaign.name.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        info!(
            generated = report.generated.len(),
            failed = report.failed.len(),
            "Batch generation finished"
        );
        report
    }

    fn asset_path(&self, filename: &str, format: AssetFormat) -> PathBuf {
        self.output_dir
            .join(format!("{filename}.{}", format.extension()))
    }
}
