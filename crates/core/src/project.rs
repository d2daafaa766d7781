//! A Next.js project on some file system, and the install flow over it.

use std::path::{Path, PathBuf};

use log::info;

use crate::{
    config::{LAYOUT_PATH, STYLESHEET_PATH},
    error::{Error, PatchResult, PatchStatus, Result},
    fs::{DiskFs, FileSystem},
    layout::patch_layout,
    naming::IdentifierStyle,
    registry::is_alias_taken,
    request::FontRequest,
    stylesheet::patch_stylesheet,
};

/// What an install did to each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallReport {
    pub layout: PatchStatus,
    pub stylesheet: PatchStatus,
}

#[derive(Debug, Clone)]
pub struct Project<F: FileSystem = DiskFs> {
    root: PathBuf,
    fs: F,
}

impl Project<DiskFs> {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::with_fs(root, DiskFs)
    }
}

impl<F: FileSystem> Project<F> {
    pub fn with_fs(root: impl Into<PathBuf>, fs: F) -> Self {
        Self { root: root.into(), fs }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn layout_path(&self) -> PathBuf {
        self.root.join(LAYOUT_PATH)
    }

    pub fn stylesheet_path(&self) -> PathBuf {
        self.root.join(STYLESHEET_PATH)
    }

    pub fn is_alias_taken(&self, alias: &str) -> bool {
        is_alias_taken(&self.fs, &self.stylesheet_path(), alias)
    }

    pub fn patch_layout(&self, request: &FontRequest, style: IdentifierStyle) -> PatchResult {
        patch_layout(&self.fs, &self.root, request, style)
    }

    pub fn patch_stylesheet(&self, key: &str, value: &str) -> PatchResult {
        patch_stylesheet(&self.fs, &self.stylesheet_path(), key, value)
    }

    /// Validate `request`, refuse an alias that is already registered, then
    /// patch the layout followed by the stylesheet.
    ///
    /// A failure in the layout step returns before the stylesheet is read.
    pub fn install(&self, request: &FontRequest, style: IdentifierStyle) -> Result<InstallReport> {
        request.validate()?;

        if self.is_alias_taken(&request.alias) {
            return Err(Error::AliasTaken(request.alias.clone()));
        }

        let layout = self.patch_layout(request, style)?;
        let stylesheet = self.patch_stylesheet(&request.property_key(), &request.property_value())?;

        info!(
            "installed {:?} as {} (layout: {layout:?}, stylesheet: {stylesheet:?})",
            request.display_name,
            request.property_key()
        );
        Ok(InstallReport { layout, stylesheet })
    }
}
