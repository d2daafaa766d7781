//! # Fontwire Core
//!
//! Idempotent text patching that wires a Google font into a Next.js
//! app-router project: an import, a loader declaration and a `className`
//! reference in `app/layout.tsx`, and a `--font-<alias>` custom property in the
//! `@theme` block of `app/globals.css`.
//!
//! Edits are anchored on textual patterns rather than a parse of the files, so
//! arbitrary surrounding formatting is left alone. Re-running a patch that has
//! already been applied is a no-op.
//!
//! ## Example
//!
//! ```no_run
//! use fontwire_core::{FontRequest, IdentifierStyle, Project};
//!
//! let project = Project::open(".");
//! let request = FontRequest::new("Roboto", "primary").with_weights(["400", "700"]);
//! let report = project.install(&request, IdentifierStyle::default()).unwrap();
//! println!("{report:?}");
//! ```

pub mod anchor;
pub mod config;
mod error;
pub mod fs;
mod layout;
pub mod naming;
mod project;
mod registry;
mod request;
mod stylesheet;

pub use error::{Error, PatchResult, PatchStatus, Result};
pub use fs::{DiskFs, FileSystem, MemoryFs};
pub use layout::{FontIdentifiers, patch_layout};
pub use naming::{IdentifierStyle, to_component_identifier, to_variable_identifier};
pub use project::{InstallReport, Project};
pub use registry::is_alias_taken;
pub use request::{FontRequest, GenericFamily, property_key};
pub use stylesheet::patch_stylesheet;
