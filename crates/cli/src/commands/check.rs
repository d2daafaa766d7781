use std::path::Path;

use anyhow::{Result, bail};
use fontwire_core::{Project, property_key};

pub fn check(alias: &str, root: &Path) -> Result<()> {
    let project = Project::open(root);
    let key = property_key(alias);

    if project.is_alias_taken(alias) {
        bail!("{key} is already registered in {}", project.stylesheet_path().display());
    }

    println!("{key} is available");
    Ok(())
}
