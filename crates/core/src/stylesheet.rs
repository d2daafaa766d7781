//! Custom property insertion into the stylesheet's `@theme` block.

use std::path::Path;

use log::{debug, info};

use crate::{
    anchor::{BlockMatch, theme_block},
    error::{PatchResult, PatchStatus},
    fs::{FileSystem, TextFile},
};

/// Add `key: value;` to the first `@theme` block of `path`, creating the block
/// at the end of the file if there is none.
///
/// The stylesheet must already exist. If the block already mentions `key`
/// nothing is written. Outside the inserted line the file is left byte-for-byte
/// unchanged.
pub fn patch_stylesheet(fs: &impl FileSystem, path: &Path, key: &str, value: &str) -> PatchResult {
    let file = TextFile::new(fs, path);
    let css = file.read()?;
    let line = declaration(key, value);

    let patched = match theme_block(&css) {
        Some(block) => {
            if css[block.inner.clone()].contains(key) {
                debug!("{key} already present in {}", path.display());
                return Ok(PatchStatus::SkippedAlreadyPresent);
            }
            info!("adding {key} to @theme block in {}", path.display());
            splice_into_block(&css, &block, &line)
        }
        None => {
            info!("creating @theme block with {key} in {}", path.display());
            format!("{css}\n@theme {{\n{line}\n}}\n")
        }
    };

    file.write(&patched)?;
    Ok(PatchStatus::Applied)
}

/// `  key: value;`, without doubling a semicolon the value already carries.
fn declaration(key: &str, value: &str) -> String {
    let value = value.trim();
    if value.ends_with(';') {
        format!("  {key}: {value}")
    } else {
        format!("  {key}: {value};")
    }
}

/// Insert `line` after the last non-blank content of the block. The whitespace
/// before the closing brace is kept as is; a newline is added after `line` only
/// when that whitespace does not already start one.
fn splice_into_block(css: &str, block: &BlockMatch, line: &str) -> String {
    let inner = &css[block.inner.clone()];
    let content = inner.trim_end();
    let tail = &inner[content.len()..];

    let mut out = String::with_capacity(css.len() + line.len() + 2);
    out.push_str(&css[..block.inner.start]);
    out.push_str(content);
    out.push('\n');
    out.push_str(line);
    if !tail.contains('\n') {
        out.push('\n');
    }
    out.push_str(tail);
    out.push_str(&css[block.inner.end..]);
    out
}
