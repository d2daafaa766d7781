//! Fixed locations and tokens for Next.js projects.

/// Directory whose presence marks a Next.js app-router project.
pub const APP_DIR: &str = "app";

/// Root layout, relative to the project root.
pub const LAYOUT_PATH: &str = "app/layout.tsx";

/// Global stylesheet, relative to the project root.
pub const STYLESHEET_PATH: &str = "app/globals.css";

/// Module the font loaders are imported from.
pub const FONT_LOADER_MODULE: &str = "next/font/google";

/// Prefix of every generated custom property.
pub const PROPERTY_PREFIX: &str = "--font-";

/// Class token added next to the font variable when the body has no class attribute.
pub const BASELINE_CLASS: &str = "antialiased";

pub const DEFAULT_WEIGHT: &str = "400";

pub const DEFAULT_SUBSET: &str = "latin";

/// Weight tokens accepted by the font loader, plus `regular` as a catalog alias for 400.
pub const WEIGHT_TOKENS: &[&str] = &[
    "100", "200", "300", "400", "500", "600", "700", "800", "900", "normal", "bold", "regular",
];
