//! Console rendering of catalog entries.

use fontwire_catalog::CatalogFont;

const RULE_WIDTH: usize = 50;

/// Print a block describing `font` before it is installed.
pub fn print_preview(font: &CatalogFont) {
    let rule = "─".repeat(RULE_WIDTH);
    println!("\nFont Preview");
    println!("{rule}");
    println!("  Family:   {}", font.family);
    println!("  Category: {} ({})", font.category, font.generic_family());
    println!("  Weights:  {}", font.upright_weights().join(", "));
    println!("  Subsets:  {}", font.subsets.join(", "));
    println!("{rule}\n");
}

/// Print a one-line summary of `font` for search results.
pub fn print_summary(font: &CatalogFont) {
    println!(
        "  {:<32} {:<12} {}",
        font.family,
        font.category,
        font.upright_weights().join(" ")
    );
}
