//! Size presets and campaign tables
//!
//! A [`Catalog`] is immutable once built. The built-in tables live in
//! [`Catalog::builtin`]; alternate tables (from a configuration file or a
//! test) go through [`Catalog::new`], which enforces unique names.

use crate::error::{Error, Result};
use crate::links::build_tracking_url;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Module scale used when a preset name is not in the table
pub const DEFAULT_BOX_SIZE: u32 = 10;

/// Largest accepted module scale; a version 40 symbol at this scale is 18500 px wide
pub const MAX_BOX_SIZE: u32 = 100;

/// Preset used when none is requested
pub const DEFAULT_PRESET: &str = "digital";

/// Named module-scale configuration controlling the printed size of a code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePreset {
    /// Unique preset name (e.g. `poster`)
    pub name: String,
    /// Pixels per QR module
    pub box_size: u32,
    /// Human description of the intended medium
    pub description: String,
}

impl SizePreset {
    /// Create a new preset
    pub fn new(name: impl Into<String>, box_size: u32, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            box_size,
            description: description.into(),
        }
    }
}

/// Ordered UTM key/value pairs.
///
/// Serialized as a map, but document order is kept so the resulting
/// tracking URL is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtmParams(Vec<(String, String)>);

impl UtmParams {
    /// Build from key/value pairs, keeping their order
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Borrow the pairs in order
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Look up a parameter value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for UtmParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("None");
        }
        let joined = self
            .0
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

impl Serialize for UtmParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UtmParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedPairs;

        impl<'de> Visitor<'de> for OrderedPairs {
            type Value = UtmParams;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of UTM parameter names to values")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    pairs.push((key, value));
                }
                Ok(UtmParams(pairs))
            }
        }

        deserializer.deserialize_map(OrderedPairs)
    }
}

/// Named mapping from a short identifier to a destination and its tracking parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Unique campaign name, also used as the redirect path segment
    pub name: String,
    /// Final destination the redirect page forwards to
    pub destination: String,
    /// Analytics parameters appended to the destination
    #[serde(default)]
    pub utm: UtmParams,
}

impl Campaign {
    /// Create a new campaign
    pub fn new(name: impl Into<String>, destination: impl Into<String>, utm: UtmParams) -> Self {
        Self {
            name: name.into(),
            destination: destination.into(),
            utm,
        }
    }

    /// Destination URL tagged with this campaign's UTM parameters
    pub fn tracking_url(&self) -> String {
        build_tracking_url(&self.destination, self.utm.pairs())
    }
}

/// Immutable preset and campaign tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    presets: Vec<SizePreset>,
    campaigns: Vec<Campaign>,
}

impl Catalog {
    /// Build a catalog from explicit tables.
    ///
    /// Rejects duplicate names and presets whose `box_size` is outside
    /// `1..=MAX_BOX_SIZE`.
    pub fn new(presets: Vec<SizePreset>, campaigns: Vec<Campaign>) -> Result<Self> {
        if let Some(bad) = presets
            .iter()
            .find(|p| !(1..=MAX_BOX_SIZE).contains(&p.box_size))
        {
            return Err(Error::Config(format!(
                "Size preset '{}' has box_size {}, expected 1..={MAX_BOX_SIZE}",
                bad.name, bad.box_size
            )));
        }
        ensure_unique("size preset", presets.iter().map(|p| p.name.as_str()))?;
        ensure_unique("campaign", campaigns.iter().map(|c| c.name.as_str()))?;
        Ok(Self { presets, campaigns })
    }

    /// The tables shipped with the tool
    pub fn builtin() -> Self {
        Self {
            presets: builtin_presets(),
            campaigns: builtin_campaigns(),
        }
    }

    /// All presets in table order
    pub fn presets(&self) -> &[SizePreset] {
        &self.presets
    }

    /// All campaigns in table order
    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    /// Look up a preset by name
    pub fn preset(&self, name: &str) -> Option<&SizePreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Look up a campaign by name
    pub fn campaign(&self, name: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.name == name)
    }

    /// Module scale for `preset`, falling back to [`DEFAULT_BOX_SIZE`] for unknown names
    pub fn box_size(&self, preset: &str) -> u32 {
        match self.preset(preset) {
            Some(found) => found.box_size,
            None => {
                tracing::debug!(preset, "Unknown size preset, using default box size");
                DEFAULT_BOX_SIZE
            }
        }
    }

    /// Names of every campaign, in table order
    pub fn campaign_names(&self) -> Vec<String> {
        self.campaigns.iter().map(|c| c.name.clone()).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn ensure_unique<'a>(kind: &str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(Error::Config(format!("Duplicate {kind} name '{name}'")));
        }
    }
    Ok(())
}

fn builtin_presets() -> Vec<SizePreset> {
    vec![
        SizePreset::new("business", 8, "Business cards (2cm x 2cm)"),
        SizePreset::new("flyer", 12, "Flyers and handouts (4cm x 4cm)"),
        SizePreset::new("poster", 20, "Posters and displays (10cm x 10cm)"),
        SizePreset::new("signage", 30, "Large signage (15cm x 15cm)"),
        SizePreset::new(DEFAULT_PRESET, 10, "Digital displays and screens"),
    ]
}

fn builtin_campaigns() -> Vec<Campaign> {
    vec![
        Campaign::new(
            "msft-2025",
            "https://accionlabs.com/microsoft-event",
            UtmParams::from_pairs([
                ("utm_source", "msft_booth"),
                ("utm_medium", "qr"),
                ("utm_campaign", "2025"),
            ]),
        ),
        Campaign::new(
            "business-cards",
            "https://yourdomain.com/contact",
            UtmParams::from_pairs([
                ("utm_source", "business_card"),
                ("utm_medium", "qr"),
                ("utm_campaign", "networking"),
            ]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_valid() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(builtin.presets().to_vec(), builtin.campaigns().to_vec())
            .expect("builtin tables have unique names");
        assert_eq!(rebuilt, builtin);
        assert_eq!(builtin.presets().len(), 5);
        assert_eq!(builtin.campaign_names(), vec!["msft-2025", "business-cards"]);
    }

    #[test]
    fn known_preset_box_sizes() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.box_size("business"), 8);
        assert_eq!(catalog.box_size("flyer"), 12);
        assert_eq!(catalog.box_size("poster"), 20);
        assert_eq!(catalog.box_size("signage"), 30);
        assert_eq!(catalog.box_size("digital"), 10);
    }

    #[test]
    fn unknown_preset_falls_back() {
        let catalog = Catalog::builtin();
        for name in ["", "huge", "Poster", "billboard"] {
            assert_eq!(catalog.box_size(name), DEFAULT_BOX_SIZE);
        }
    }

    #[test]
    fn duplicate_campaign_rejected() {
        let campaign = Campaign::new("dup", "https://a.com", UtmParams::default());
        let err = Catalog::new(builtin_presets(), vec![campaign.clone(), campaign]).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("'dup'")));
    }

    #[test]
    fn duplicate_preset_rejected() {
        let preset = SizePreset::new("tiny", 2, "Tiny");
        let err = Catalog::new(vec![preset.clone(), preset], Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn out_of_range_box_size_rejected() {
        for box_size in [0, MAX_BOX_SIZE + 1, u32::MAX / 4] {
            let presets = vec![SizePreset::new("huge", box_size, "Too big")];
            match Catalog::new(presets, Vec::new()) {
                Err(Error::Config(msg)) => assert!(msg.contains("'huge'")),
                other => panic!("expected config error for {box_size}, got {other:?}"),
            }
        }
        let edge = vec![SizePreset::new("edge", MAX_BOX_SIZE, "Largest")];
        assert!(Catalog::new(edge, Vec::new()).is_ok());
    }

    #[test]
    fn campaign_tracking_url() {
        let catalog = Catalog::builtin();
        let campaign = catalog.campaign("business-cards").unwrap();
        assert_eq!(
            campaign.tracking_url(),
            "https://yourdomain.com/contact?utm_source=business_card&utm_medium=qr&utm_campaign=networking"
        );
    }

    #[test]
    fn utm_params_keep_document_order() {
        let yaml = "name: promo\ndestination: https://a.com\nutm:\n  z_last: '1'\n  a_first: '2'\n";
        let campaign: Campaign = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            campaign.utm.pairs(),
            &[
                ("z_last".to_string(), "1".to_string()),
                ("a_first".to_string(), "2".to_string())
            ]
        );
        assert_eq!(campaign.utm.get("a_first"), Some("2"));
    }

    #[test]
    fn utm_params_display() {
        let params = UtmParams::from_pairs([("utm_source", "s"), ("utm_medium", "qr")]);
        assert_eq!(params.to_string(), "utm_source=s, utm_medium=qr");
        assert_eq!(UtmParams::default().to_string(), "None");
    }
}
