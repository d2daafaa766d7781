//! Font requests handed to the patchers.

use std::fmt::{self, Display, Formatter};

use crate::{
    config::{DEFAULT_SUBSET, DEFAULT_WEIGHT, PROPERTY_PREFIX, WEIGHT_TOKENS},
    error::{Error, Result},
};

/// Generic family appended after the font name in the generated property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenericFamily {
    #[default]
    SansSerif,
    Serif,
    Monospace,
    Cursive,
}

impl GenericFamily {
    /// Map a catalog category (`serif`, `monospace`, `handwriting`, ...) to a generic family.
    pub fn from_category(category: &str) -> Self {
        match category.trim().to_ascii_lowercase().as_str() {
            "serif" => Self::Serif,
            "monospace" => Self::Monospace,
            "handwriting" => Self::Cursive,
            _ => Self::SansSerif,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SansSerif => "sans-serif",
            Self::Serif => "serif",
            Self::Monospace => "monospace",
            Self::Cursive => "cursive",
        }
    }
}

impl Display for GenericFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A font to wire into a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontRequest {
    pub display_name: String,
    pub alias: String,
    pub weights: Vec<String>,
    pub subsets: Vec<String>,
    pub fallback: GenericFamily,
}

impl FontRequest {
    /// Create a request with the default weight and subset.
    pub fn new(display_name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            alias: alias.into(),
            weights: vec![DEFAULT_WEIGHT.to_owned()],
            subsets: vec![DEFAULT_SUBSET.to_owned()],
            fallback: GenericFamily::default(),
        }
    }

    pub fn with_weights<I, S>(mut self, weights: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weights = weights.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_subsets<I, S>(mut self, subsets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subsets = subsets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fallback(mut self, fallback: GenericFamily) -> Self {
        self.fallback = fallback;
        self
    }

    /// Check the request is complete and every token is one the loader accepts.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidRequest(msg));

        if self.display_name.trim().is_empty() {
            return invalid("font name cannot be empty".into());
        }
        if self.alias.trim().is_empty() {
            return invalid("alias cannot be empty".into());
        }
        if !self.alias.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return invalid(format!(
                "alias {:?} may only contain letters, digits, '-' and '_'",
                self.alias
            ));
        }
        if self.weights.is_empty() {
            return invalid("select at least one weight".into());
        }
        if let Some(weight) = self.weights.iter().find(|w| !WEIGHT_TOKENS.contains(&w.as_str())) {
            return invalid(format!("unknown weight {weight:?}"));
        }
        if self.subsets.is_empty() {
            return invalid("select at least one subset".into());
        }
        if let Some(subset) = self.subsets.iter().find(|s| s.trim().is_empty()) {
            return invalid(format!("invalid subset {subset:?}"));
        }
        Ok(())
    }

    /// The custom property registered for this font, e.g. `--font-primary`.
    pub fn property_key(&self) -> String {
        property_key(&self.alias)
    }

    /// The property value, e.g. `'Roboto', sans-serif;`.
    pub fn property_value(&self) -> String {
        format!("'{}', {};", self.display_name.trim(), self.fallback)
    }

    /// Weights as the loader expects them, with `regular` spelled `400`.
    pub fn loader_weights(&self) -> Vec<&str> {
        self.weights
            .iter()
            .map(|w| if w == "regular" { "400" } else { w.as_str() })
            .collect()
    }
}

/// `--font-<alias>`.
pub fn property_key(alias: &str) -> String {
    format!("{PROPERTY_PREFIX}{alias}")
}
