//! Google Fonts catalog client.
//!
//! Fetches the web font list once and answers lookups against it in memory.
//!
//! # Example
//!
//! ```no_run
//! use fontwire_catalog::{Catalog, DEFAULT_API_URL};
//!
//! let catalog = Catalog::fetch(DEFAULT_API_URL, "api-key").unwrap();
//! for font in catalog.search("mono").into_iter().take(5) {
//!     println!("{} ({})", font.family, font.category);
//! }
//! ```

use std::time::Duration;

use anyhow::{Context, Result, bail};
use fontwire_core::GenericFamily;
use indexmap::IndexMap;
use log::debug;
use reqwest::{Url, blocking::Client};
use serde::Deserialize;

/// Google Fonts Developer API endpoint.
pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/webfonts/v1/webfonts";

const TIMEOUT: Duration = Duration::from_secs(30);

/// One family as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogFont {
    pub family: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub subsets: Vec<String>,
}

impl CatalogFont {
    /// Non-italic variants, with `regular` spelled `400`.
    pub fn upright_weights(&self) -> Vec<&str> {
        self.variants
            .iter()
            .filter(|v| !v.contains("italic"))
            .map(|v| if v == "regular" { "400" } else { v.as_str() })
            .collect()
    }

    /// Whether the family ships an upright variant for `weight`.
    ///
    /// `normal`/`regular` count as 400 and `bold` as 700.
    pub fn supports_weight(&self, weight: &str) -> bool {
        let weight = match weight {
            "normal" | "regular" => "400",
            "bold" => "700",
            w => w,
        };
        self.upright_weights().contains(&weight)
    }

    pub fn supports_subset(&self, subset: &str) -> bool {
        self.subsets.iter().any(|s| s == subset)
    }

    pub fn generic_family(&self) -> GenericFamily {
        GenericFamily::from_category(&self.category)
    }
}

#[derive(Deserialize)]
struct WebfontList {
    #[serde(default)]
    items: Vec<CatalogFont>,
}

/// The catalog, keyed by lowercase family name in catalog order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    fonts: IndexMap<String, CatalogFont>,
}

impl Catalog {
    /// Download the catalog from `api_url` using `api_key`.
    pub fn fetch(api_url: &str, api_key: &str) -> Result<Self> {
        let url = Url::parse_with_params(api_url, &[("key", api_key)])
            .with_context(|| format!("Invalid catalog URL: {api_url}"))?;

        let client = Client::builder().timeout(TIMEOUT).build()?;
        // reqwest errors carry the request URL, and with it the API key.
        let response = client
            .get(url)
            .send()
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to fetch {api_url}"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("HTTP {} for {}", status, api_url);
        }

        let bytes = response.bytes().map_err(reqwest::Error::without_url)?;
        let catalog = Self::from_json(&bytes)?;
        debug!("fetched {} families from {api_url}", catalog.len());
        Ok(catalog)
    }

    /// Decode a webfonts API response body.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let list: WebfontList =
            serde_json::from_slice(body).context("Failed to decode font catalog")?;
        Ok(list.items.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogFont> {
        self.fonts.values()
    }

    /// Families whose name contains `query`, ignoring case, in catalog order.
    pub fn search(&self, query: &str) -> Vec<&CatalogFont> {
        let needle = query.trim().to_lowercase();
        self.fonts
            .iter()
            .filter(|(key, _)| key.contains(&needle))
            .map(|(_, font)| font)
            .collect()
    }

    /// The family named exactly `name`, ignoring case.
    pub fn find(&self, name: &str) -> Option<&CatalogFont> {
        self.fonts.get(&name.trim().to_lowercase())
    }
}

impl FromIterator<CatalogFont> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogFont>>(iter: I) -> Self {
        Self {
            fonts: iter.into_iter().map(|font| (font.family.to_lowercase(), font)).collect(),
        }
    }
}
