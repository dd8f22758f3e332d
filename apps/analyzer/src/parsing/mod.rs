//! Document Parser: reads a résumé file and extracts the structured fields
//! scoring depends on.
//!
//! Extraction is heuristic: sections are found by heading lines, skills come
//! from the skills section plus every vocabulary term anywhere in the text,
//! and contact fields are regex matches. Any failure (unreadable file,
//! unsupported format, nothing extracted) is a `ParseFailure`.

pub mod document;
pub mod fields;
pub mod sections;

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::errors::AnalyzerError;
use crate::models::{ResumeData, SectionRecord};
use crate::skills::SkillVocabulary;

use fields::{current_year, looks_like_name, strip_bullet, FieldPatterns};
use sections::{split_sections, Section, SectionKind};

pub struct ResumeParser {
    vocabulary: SkillVocabulary,
    patterns: FieldPatterns,
}

impl ResumeParser {
    pub fn new(vocabulary: SkillVocabulary) -> Result<Self, regex::Error> {
        Ok(Self {
            vocabulary,
            patterns: FieldPatterns::new()?,
        })
    }

    pub fn parse(&self, path: &Path) -> Result<ResumeData, AnalyzerError> {
        let text = document::load_text(path)?;
        self.parse_text(&text)
    }

    pub fn parse_text(&self, text: &str) -> Result<ResumeData, AnalyzerError> {
        if text.trim().is_empty() {
            return Err(AnalyzerError::ParseFailure(
                "document contains no text".to_string(),
            ));
        }

        let sections = split_sections(text);
        let of_kind = |kind: SectionKind| sections.iter().filter(move |s| s.kind == kind);

        let summary = of_kind(SectionKind::Summary)
            .flat_map(Section::content_lines)
            .collect::<Vec<_>>()
            .join(" ");

        let education = records(of_kind(SectionKind::Education));
        let experience = records(of_kind(SectionKind::Experience));

        let degree = education
            .iter()
            .filter(|r| self.patterns.mentions_degree(&r.text))
            .map(|r| r.text.clone())
            .collect();

        let experience_text = experience
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let total_experience = self
            .patterns
            .years_of_experience(&experience_text, current_year());

        let name = of_kind(SectionKind::Header)
            .flat_map(Section::content_lines)
            .find(|line| looks_like_name(line))
            .map(str::to_string);

        let data = ResumeData {
            name,
            email: self.patterns.email(text),
            mobile_number: self.patterns.mobile_number(text),
            skills: self.skills(text, of_kind(SectionKind::Skills)),
            education,
            degree,
            experience,
            total_experience,
            summary: Some(summary).filter(|s| !s.is_empty()),
        };

        if data.is_empty() {
            return Err(AnalyzerError::ParseFailure(
                "no resume fields could be extracted".to_string(),
            ));
        }

        debug!(
            skills = data.skills.len(),
            education = data.education.len(),
            experience = data.experience.len(),
            has_summary = data.summary.is_some(),
            "resume parsed"
        );
        Ok(data)
    }

    /// Skills-section items first, then vocabulary terms found anywhere.
    /// Known terms take their canonical spelling; duplicates are dropped.
    fn skills<'s, 'a: 's>(
        &self,
        text: &str,
        skill_sections: impl Iterator<Item = &'s Section<'a>>,
    ) -> Vec<String> {
        let listed = skill_sections
            .flat_map(Section::content_lines)
            .flat_map(|line| self.patterns.skill_items(line))
            .map(|item| {
                self.vocabulary
                    .canonical(item)
                    .map(str::to_string)
                    .unwrap_or_else(|| item.to_string())
            });
        let mentioned = self
            .vocabulary
            .find_all(text)
            .into_iter()
            .map(|hit| hit.canonical);

        let mut seen = HashSet::new();
        listed
            .chain(mentioned)
            .filter(|skill| seen.insert(skill.clone()))
            .collect()
    }
}

fn records<'s, 'a: 's>(sections: impl Iterator<Item = &'s Section<'a>>) -> Vec<SectionRecord> {
    sections
        .flat_map(Section::content_lines)
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .map(SectionRecord::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RESUME: &str = "Jane Doe
jane.doe@example.com | +1 (555) 123-4567

Professional Summary
Backend engineer with eight years of experience
building distributed systems.

Skills
• Python, SQL, docker
• Stakeholder management

Experience
- Senior Engineer, Acme Corp, 2018 - 2022
- Engineer, Globex, 2016 - 2018

Education
B.Sc. Computer Science, State University, 2012 - 2016
";

    fn parser() -> ResumeParser {
        ResumeParser::new(SkillVocabulary::builtin()).unwrap()
    }

    #[test]
    fn test_parses_all_fields() {
        let data = parser().parse_text(RESUME).unwrap();

        assert_eq!(data.name.as_deref(), Some("Jane Doe"));
        assert_eq!(data.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(data.mobile_number.as_deref(), Some("+1 (555) 123-4567"));
        assert_eq!(
            data.summary.as_deref(),
            Some("Backend engineer with eight years of experience building distributed systems.")
        );
        assert_eq!(data.experience.len(), 2);
        assert_eq!(data.experience[0].text, "Senior Engineer, Acme Corp, 2018 - 2022");
        assert_eq!(data.total_experience, 6.0);
        assert_eq!(data.education.len(), 1);
        assert_eq!(data.degree.len(), 1);
    }

    #[test]
    fn test_skills_are_canonical_and_deduplicated() {
        let data = parser().parse_text(RESUME).unwrap();
        assert_eq!(
            data.skills,
            vec![
                "Python",
                "SQL",
                "Docker",
                "Stakeholder management",
                "Distributed Systems"
            ]
        );
    }

    #[test]
    fn test_blank_document_fails() {
        let err = parser().parse_text("  \n\n ").unwrap_err();
        assert_eq!(err.to_string(), "Resume parsing failed: document contains no text");
    }

    #[test]
    fn test_unstructured_text_without_fields_fails() {
        let err = parser().parse_text("Hello there\nNice weather today").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Resume parsing failed: no resume fields could be extracted"
        );
    }

    #[test]
    fn test_skills_only_resume_is_accepted() {
        let data = parser().parse_text("Rust developer").unwrap();
        assert_eq!(data.skills, vec!["Rust"]);
        assert!(data.education.is_empty());
        assert!(data.summary.is_none());
    }

    #[test]
    fn test_parse_reads_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(RESUME.as_bytes()).unwrap();
        let data = parser().parse(file.path()).unwrap();
        assert_eq!(data.name.as_deref(), Some("Jane Doe"));
    }
}
