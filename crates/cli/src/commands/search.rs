use anyhow::{Context, Result};
use fontwire_catalog::Catalog;

use crate::{cli::CatalogArgs, preview::print_summary};

pub fn search(query: &str, limit: usize, args: &CatalogArgs) -> Result<()> {
    let key = args
        .api_key
        .as_deref()
        .context("Searching needs a Google Fonts API key (--api-key or GOOGLE_FONTS_API_KEY)")?;
    let catalog = Catalog::fetch(&args.api_url, key)?;

    let hits = catalog.search(query);
    if hits.is_empty() {
        println!("No fonts matching {query:?}");
        return Ok(());
    }

    println!("{} fonts matching {query:?}", hits.len());
    for font in hits.iter().take(limit) {
        print_summary(font);
    }
    if hits.len() > limit {
        println!("  ... {} more", hits.len() - limit);
    }
    Ok(())
}
