use serde::{Deserialize, Serialize};

/// One line-level record from the education or experience section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub text: String,
}

impl SectionRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Structured fields extracted from a résumé document.
///
/// Produced once per analysis and never mutated afterwards. Every field is
/// optional in spirit: an empty collection or `None` contributes zero to the
/// score instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    /// De-duplicated, in order of first appearance.
    pub skills: Vec<String>,
    pub education: Vec<SectionRecord>,
    pub degree: Vec<String>,
    pub experience: Vec<SectionRecord>,
    /// Years, summed over the date ranges found in the experience section.
    pub total_experience: f64,
    pub summary: Option<String>,
}

impl ResumeData {
    /// Summary text, or an empty string when the résumé has none.
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }

    /// Skills joined by a single space: the résumé side of the similarity score.
    pub fn joined_skills(&self) -> String {
        self.skills.join(" ")
    }

    /// True when none of the scored fields were extracted.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.education.is_empty()
            && self.experience.is_empty()
            && self.summary.as_deref().map_or(true, |s| s.trim().is_empty())
    }
}
