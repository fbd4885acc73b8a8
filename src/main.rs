//! qrpages command-line entrypoint

use clap::Parser;
use qrpages::output::{self, Rendered};
use qrpages::{DEFAULT_PRESET, Generator, QrPagesConfig, logging};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "qrpages",
    version,
    about = "Generate campaign QR codes for static-site hosting",
    after_help = "Examples:
  qrpages --list-campaigns
  qrpages --campaign msft-2025 --size poster
  qrpages --all --size business
  qrpages --url https://example.com --filename custom-qr"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrpages.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Site root used to build redirect URLs
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Directory generated files are written to
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Generate the QR code for a single campaign
    #[arg(long, value_name = "NAME")]
    campaign: Option<String>,

    /// Generate QR codes for every campaign
    #[arg(long)]
    all: bool,

    /// Custom URL to generate a QR code for
    #[arg(long, value_name = "URL", requires = "filename")]
    url: Option<String>,

    /// Output file name without extension (used with --url)
    #[arg(long, value_name = "NAME", requires = "url")]
    filename: Option<String>,

    /// Size preset (business, flyer, poster, signage, digital)
    #[arg(long, value_name = "PRESET", default_value = DEFAULT_PRESET)]
    size: String,

    /// Error correction level for --url (L, M, Q, H)
    #[arg(long, value_name = "LEVEL", default_value = "Q")]
    error_correction: String,

    /// List all available campaigns and exit
    #[arg(long)]
    list_campaigns: bool,

    /// List all available size presets and exit
    #[arg(long)]
    list_sizes: bool,

    /// Output results as formatted JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = QrPagesConfig::load(cli.config.as_deref())?;

    if let Some(ref base_url) = cli.base_url {
        config.generator.base_url = base_url.clone();
    }

    if let Some(ref dir) = cli.output_dir {
        config.generator.output_dir = dir.clone();
    }

    logging::init(&config.logging)?;

    let generator = Generator::new(
        config.catalog()?,
        config.generator.base_url.clone(),
        config.generator.output_dir.clone(),
    )?;
    info!(
        base_url = generator.base_url(),
        output_dir = %generator.output_dir().display(),
        "Generator ready"
    );

    if cli.list_campaigns {
        emit(&output::render_campaigns(generator.campaigns())?, cli.json)?;
        return Ok(());
    }

    if cli.list_sizes {
        emit(&output::render_size_presets(generator.size_presets())?, cli.json)?;
        return Ok(());
    }

    if cli.all {
        info!(size = %cli.size, "Generating QR codes for all campaigns");
        let report = generator.generate_all(&cli.size);
        emit(&output::render_batch_report(&report)?, cli.json)?;
        return Ok(());
    }

    if let Some(ref name) = cli.campaign {
        let result = generator.generate_campaign(name, &cli.size)?;
        emit(&output::render_campaign_output(&result)?, cli.json)?;
        return Ok(());
    }

    if let (Some(url), Some(filename)) = (&cli.url, &cli.filename) {
        let files = generator.generate(url, filename, &cli.size, Some(&cli.error_correction))?;
        emit(&output::render_custom_output(url, &files)?, cli.json)?;
        return Ok(());
    }

    info!("No specific action specified, generating all campaigns. Use --help to see all options");
    let report = generator.generate_all(&cli.size);
    emit(&output::render_batch_report(&report)?, cli.json)?;
    Ok(())
}

fn emit(rendered: &Rendered, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&rendered.json)?);
    } else {
        for line in &rendered.human {
            println!("{line}");
        }
    }
    Ok(())
}
