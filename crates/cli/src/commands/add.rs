use std::path::Path;

use anyhow::{Context, Result, bail};
use fontwire_catalog::{Catalog, CatalogFont};
use fontwire_core::{FontRequest, IdentifierStyle, PatchStatus, Project};
use log::{debug, warn};

use crate::{
    cli::{AddArgs, CatalogArgs},
    preview::print_preview,
};

/// `Roboto Mono` -> `roboto-mono`.
pub fn default_alias(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub fn add(args: &AddArgs) -> Result<()> {
    let name = args.name.trim();
    let alias = args.alias.clone().unwrap_or_else(|| default_alias(name));

    let mut request = FontRequest::new(name, alias);
    if !args.weights.is_empty() {
        request = request.with_weights(&args.weights);
    }
    if !args.subsets.is_empty() {
        request = request.with_subsets(&args.subsets);
    }

    let font = if args.offline {
        None
    } else {
        lookup(name, &args.catalog)?
    };
    if let Some(font) = &font {
        print_preview(font);
        check_against_catalog(&request, font)?;
        request.display_name = font.family.clone();
        request = request.with_fallback(font.generic_family());
    }

    let style = if args.pascal_case {
        IdentifierStyle::PascalCase
    } else {
        IdentifierStyle::LoaderExport
    };

    let project = Project::open(&args.root);
    let report = project.install(&request, style).with_context(|| {
        format!("Failed to add {:?} to {}", request.display_name, project.root().display())
    })?;

    report_file(&project.layout_path(), report.layout);
    report_file(&project.stylesheet_path(), report.stylesheet);
    println!("✓ Installed {:?} as {}", request.display_name, request.property_key());
    Ok(())
}

fn report_file(path: &Path, status: PatchStatus) {
    if status.is_applied() {
        println!("  updated {}", path.display());
    } else {
        println!("  skipped {} (already set up)", path.display());
    }
}

/// Find `name` in the catalog, or `None` when the catalog cannot be consulted.
fn lookup(name: &str, args: &CatalogArgs) -> Result<Option<CatalogFont>> {
    let Some(key) = args.api_key.as_deref() else {
        debug!("no API key; skipping catalog lookup");
        return Ok(None);
    };

    let catalog = match Catalog::fetch(&args.api_url, key) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("font catalog unavailable, continuing without it: {e:#}");
            return Ok(None);
        }
    };

    if let Some(font) = catalog.find(name) {
        return Ok(Some(font.clone()));
    }

    let suggestions: Vec<&str> = catalog
        .search(name)
        .into_iter()
        .take(5)
        .map(|f| f.family.as_str())
        .collect();
    if suggestions.is_empty() {
        bail!("{name:?} is not in the Google Fonts catalog");
    }
    bail!(
        "{name:?} is not in the Google Fonts catalog; did you mean {}?",
        suggestions.join(", ")
    )
}

fn check_against_catalog(request: &FontRequest, font: &CatalogFont) -> Result<()> {
    let weights: Vec<&str> = request
        .weights
        .iter()
        .map(String::as_str)
        .filter(|w| !font.supports_weight(w))
        .collect();
    if !weights.is_empty() {
        bail!(
            "{} does not offer weight {} (available: {})",
            font.family,
            weights.join(", "),
            font.upright_weights().join(", ")
        );
    }

    let subsets: Vec<&str> = request
        .subsets
        .iter()
        .map(String::as_str)
        .filter(|s| !font.supports_subset(s))
        .collect();
    if !subsets.is_empty() {
        bail!(
            "{} does not offer subset {} (available: {})",
            font.family,
            subsets.join(", "),
            font.subsets.join(", ")
        );
    }
    Ok(())
}
