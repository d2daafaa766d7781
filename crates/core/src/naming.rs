//! Identifier derivation from human font names.

/// Which identifier the layout imports and calls for a font.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentifierStyle {
    /// The export name used by `next/font/google`: `Cabin Sketch` -> `Cabin_Sketch`.
    #[default]
    LoaderExport,
    /// A PascalCase compound: `Cabin Sketch` -> `CabinSketch`.
    PascalCase,
}

impl IdentifierStyle {
    pub fn component_identifier(self, name: &str) -> String {
        match self {
            Self::LoaderExport => to_loader_export(name),
            Self::PascalCase => to_component_identifier(name),
        }
    }
}

/// Split on runs of `-`, `_` or space, capitalize each segment, lowercase the
/// rest, and join without a separator.
pub fn to_component_identifier(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Join whitespace-separated words with `_`, keeping their case.
pub fn to_loader_export(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Lowercase with whitespace, hyphens and underscores removed.
pub fn to_variable_identifier(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
