use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::debug;

use crate::errors::AnalyzerError;

/// Category → skill set taxonomy, loaded once and read-only afterwards.
/// Categories iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillLibrary {
    categories: BTreeMap<String, BTreeSet<String>>,
}

impl SkillLibrary {
    /// Loads the taxonomy from a JSON object of `category -> [skill, ...]`.
    /// A missing file is fatal for the analysis.
    pub fn load(path: &Path) -> Result<Self, AnalyzerError> {
        if !path.exists() {
            return Err(AnalyzerError::MissingTaxonomy(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let library = Self::from_json_str(&raw)?;
        debug!(
            path = %path.display(),
            categories = library.categories.len(),
            "skill library loaded"
        );
        Ok(library)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, AnalyzerError> {
        let parsed: BTreeMap<String, Vec<String>> = serde_json::from_str(raw)
            .map_err(|e| AnalyzerError::InvalidTaxonomy(e.to_string()))?;
        Ok(Self::from_categories(parsed))
    }

    pub fn from_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = (String, S)>,
        S: IntoIterator<Item = String>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|(name, skills)| (name, skills.into_iter().collect()))
                .collect(),
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

}
