//! Helpers for rendering generation results and catalog tables

use crate::catalog::{Campaign, SizePreset, UtmParams};
use crate::error::Result;
use crate::generator::{BatchReport, CampaignOutput};
use crate::qr::GeneratedFiles;
use serde::Serialize;
use serde_json::Value;

/// Combined structured and human-readable representation of a result
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Structured JSON representation suitable for downstream consumers
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

const RULE_WIDTH: usize = 50;

#[derive(Serialize)]
struct CampaignRow<'a> {
    name: &'a str,
    destination: &'a str,
    utm: &'a UtmParams,
    tracking_url: String,
}

#[derive(Serialize)]
struct CustomOutput<'a> {
    url: &'a str,
    files: &'a GeneratedFiles,
}

/// Render the campaign table.
pub fn render_campaigns(campaigns: &[Campaign]) -> Result<Rendered> {
    let mut human = vec![String::new(), "Available Campaigns:".to_string(), rule()];

    for campaign in campaigns {
        human.push(campaign.name.clone());
        human.push(format!("   Destination: {}", campaign.destination));
        human.push(format!("   UTM params: {}", campaign.utm));
        human.push(format!("   Tracking URL: {}", campaign.tracking_url()));
        human.push(String::new());
    }

    let rows: Vec<_> = campaigns
        .iter()
        .map(|campaign| CampaignRow {
            name: &campaign.name,
            destination: &campaign.destination,
            utm: &campaign.utm,
            tracking_url: campaign.tracking_url(),
        })
        .collect();

    Ok(Rendered {
        json: serde_json::to_value(rows)?,
        human,
    })
}

/// Render the size preset table.
pub fn render_size_presets(presets: &[SizePreset]) -> Result<Rendered> {
    let mut human = vec![String::new(), "Available Size Presets:".to_string(), rule()];
    human.extend(presets.iter().map(|preset| {
        format!(
            "{}: {} (box_size: {})",
            preset.name, preset.description, preset.box_size
        )
    }));
    human.push(String::new());

    Ok(Rendered {
        json: serde_json::to_value(presets)?,
        human,
    })
}

/// Render the result of a single campaign generation.
pub fn render_campaign_output(output: &CampaignOutput) -> Result<Rendered> {
    Ok(Rendered {
        json: serde_json::to_value(output)?,
        human: campaign_lines(output),
    })
}

fn campaign_lines(output: &CampaignOutput) -> Vec<String> {
    vec![
        format!("Generated QR code for campaign '{}':", output.campaign),
        format!("   Redirect URL: {}", output.redirect_url),
        format!("   Final destination: {}", output.destination),
        format!("   Tracking URL: {}", output.tracking_url),
        format!("   Files: {}", output.files),
    ]
}

/// Render the result of a one-off generation from an arbitrary URL.
pub fn render_custom_output(url: &str, files: &GeneratedFiles) -> Result<Rendered> {
    Ok(Rendered {
        json: serde_json::to_value(CustomOutput { url, files })?,
        human: vec![
            "Generated custom QR code:".to_string(),
            format!("   URL: {url}"),
            format!("   Files: {files}"),
        ],
    })
}

/// Render a batch report: every generated campaign followed by a summary.
pub fn render_batch_report(report: &BatchReport) -> Result<Rendered> {
    let mut human = Vec::new();
    for output in &report.generated {
        human.extend(campaign_lines(output));
    }
    for failure in &report.failed {
        human.push(format!(
            "Error generating QR for {}: {}",
            failure.campaign, failure.error
        ));
    }
    human.push(format!(
        "Generated {} of {} campaigns ({} failed)",
        report.generated.len(),
        report.attempted(),
        report.failed.len()
    ));

    Ok(Rendered {
        json: serde_json::to_value(report)?,
        human,
    })
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::generator::CampaignFailure;
    use crate::qr::AssetFormat;
    use std::path::PathBuf;

    fn sample_output() -> CampaignOutput {
        let mut files = GeneratedFiles::default();
        files.insert(AssetFormat::Png, PathBuf::from("assets/qr-codes/msft-2025-qr.png"));
        CampaignOutput {
            campaign: "msft-2025".to_string(),
            redirect_url: "https://x.github.io/qr-hosting/msft-2025".to_string(),
            destination: "https://accionlabs.com/microsoft-event".to_string(),
            tracking_url: Catalog::builtin().campaign("msft-2025").unwrap().tracking_url(),
            files,
        }
    }

    #[test]
    fn campaigns_table() {
        let catalog = Catalog::builtin();
        let rendered = render_campaigns(catalog.campaigns()).unwrap();
        assert!(rendered.human.contains(&"msft-2025".to_string()));
        assert!(rendered.human.iter().any(|l| l
            == "   UTM params: utm_source=msft_booth, utm_medium=qr, utm_campaign=2025"));

        let first = &rendered.json[0];
        assert_eq!(first["name"], "msft-2025");
        assert_eq!(first["utm"]["utm_medium"], "qr");
        assert_eq!(
            first["tracking_url"],
            "https://accionlabs.com/microsoft-event?utm_source=msft_booth&utm_medium=qr&utm_campaign=2025"
        );
    }

    #[test]
    fn presets_table() {
        let catalog = Catalog::builtin();
        let rendered = render_size_presets(catalog.presets()).unwrap();
        assert!(
            rendered
                .human
                .contains(&"poster: Posters and displays (10cm x 10cm) (box_size: 20)".to_string())
        );
        assert_eq!(rendered.json.as_array().map(Vec::len), Some(5));
        assert_eq!(rendered.json[4]["name"], "digital");
    }

    #[test]
    fn campaign_output() {
        let rendered = render_campaign_output(&sample_output()).unwrap();
        assert_eq!(rendered.human[0], "Generated QR code for campaign 'msft-2025':");
        assert_eq!(
            rendered.human[1],
            "   Redirect URL: https://x.github.io/qr-hosting/msft-2025"
        );
        assert_eq!(
            rendered.human[2],
            "   Final destination: https://accionlabs.com/microsoft-event"
        );
        assert_eq!(
            rendered.human[3],
            "   Tracking URL: https://accionlabs.com/microsoft-event?utm_source=msft_booth&utm_medium=qr&utm_campaign=2025"
        );
        assert_eq!(
            rendered.json["destination"],
            "https://accionlabs.com/microsoft-event"
        );
        assert_eq!(
            rendered.json["files"]["png"],
            "assets/qr-codes/msft-2025-qr.png"
        );
    }

    #[test]
    fn custom_output() {
        let mut files = GeneratedFiles::default();
        files.insert(AssetFormat::Png, PathBuf::from("out/custom-qr.png"));
        let rendered = render_custom_output("https://example.com", &files).unwrap();
        assert_eq!(rendered.json["url"], "https://example.com");
        assert_eq!(rendered.json["files"]["png"], "out/custom-qr.png");
        assert_eq!(rendered.human[1], "   URL: https://example.com");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path_is_an_error() {
        use crate::error::Error;
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let mut files = GeneratedFiles::default();
        files.insert(
            AssetFormat::Png,
            PathBuf::from(OsStr::from_bytes(b"out/\xff.png")),
        );
        assert!(matches!(
            render_custom_output("https://example.com", &files),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn batch_summary() {
        let report = BatchReport {
            generated: vec![sample_output()],
            failed: vec![CampaignFailure {
                campaign: "broken".to_string(),
                error: "Failed to encode QR code: data too long".to_string(),
            }],
        };
        let rendered = render_batch_report(&report).unwrap();
        assert_eq!(
            rendered.human.last().map(String::as_str),
            Some("Generated 1 of 2 campaigns (1 failed)")
        );
        assert!(rendered.human.iter().any(|l| l.starts_with("Error generating QR for broken")));
        assert_eq!(rendered.json["failed"][0]["campaign"], "broken");
    }
}
