//! Alias lookup in the stylesheet's `@theme` block.

use std::path::Path;

use log::{debug, warn};

use crate::{anchor::theme_block, fs::FileSystem, request::property_key};

/// Whether `--font-<alias>` is already declared in the stylesheet's `@theme` block.
///
/// A missing stylesheet, a missing block or an unreadable file all count as
/// "not taken": nothing is registered yet, and the stylesheet patcher would
/// create the block on first use anyway.
pub fn is_alias_taken(fs: &impl FileSystem, stylesheet: &Path, alias: &str) -> bool {
    if alias.is_empty() || !fs.exists(stylesheet) {
        return false;
    }

    let css = match fs.read_to_string(stylesheet) {
        Ok(css) => css,
        Err(e) => {
            warn!("could not read {}: {e}", stylesheet.display());
            return false;
        }
    };

    let Some(block) = theme_block(&css) else {
        debug!("no @theme block in {}", stylesheet.display());
        return false;
    };

    css[block.inner].contains(&property_key(alias))
}
