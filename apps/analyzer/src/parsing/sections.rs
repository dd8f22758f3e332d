//! Splits résumé text into sections by recognizing heading lines.

/// Sections the parser cares about. `Other` closes the previous section
/// without being extracted; `Header` is everything before the first heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Header,
    Summary,
    Skills,
    Education,
    Experience,
    Other,
}

const HEADINGS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Summary,
        &[
            "summary",
            "professional summary",
            "career summary",
            "profile",
            "professional profile",
            "objective",
            "career objective",
            "about",
            "about me",
        ],
    ),
    (
        SectionKind::Skills,
        &[
            "skills",
            "technical skills",
            "key skills",
            "core skills",
            "core competencies",
            "skills and tools",
            "skills & tools",
            "technologies",
        ],
    ),
    (
        SectionKind::Education,
        &[
            "education",
            "academic background",
            "academic qualifications",
            "education and training",
            "qualifications",
        ],
    ),
    (
        SectionKind::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment history",
            "work history",
            "employment",
            "career history",
        ],
    ),
    (
        SectionKind::Other,
        &[
            "projects",
            "personal projects",
            "certifications",
            "certificates",
            "awards",
            "achievements",
            "publications",
            "interests",
            "hobbies",
            "references",
            "volunteer",
            "volunteering",
            "activities",
            "contact",
        ],
    ),
];

/// A section heading and the lines under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub lines: Vec<&'a str>,
    /// Text after the heading on the same line ("Skills: Rust, Go").
    pub inline: Option<&'a str>,
}

impl<'a> Section<'a> {
    fn new(kind: SectionKind, inline: Option<&'a str>) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            inline,
        }
    }

    /// Inline text followed by the non-blank body lines, trimmed.
    pub fn content_lines(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.inline
            .into_iter()
            .chain(self.lines.iter().copied())
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

/// Recognizes a heading line, returning its kind and any inline content.
pub fn classify_heading(line: &str) -> Option<(SectionKind, Option<&str>)> {
    let trimmed = line.trim();
    let (label, rest) = match trimmed.split_once(':') {
        Some((label, rest)) => (label, Some(rest.trim()).filter(|r| !r.is_empty())),
        None => (trimmed, None),
    };

    let normalized = label
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '&')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if normalized.is_empty() || normalized.split(' ').count() > 4 {
        return None;
    }

    HEADINGS
        .iter()
        .find(|(_, names)| names.contains(&normalized.as_str()))
        .map(|(kind, _)| (*kind, rest))
}

/// Splits text into sections in document order. Repeated headings produce
/// repeated sections.
pub fn split_sections(text: &str) -> Vec<Section<'_>> {
    let mut sections = vec![Section::new(SectionKind::Header, None)];

    for line in text.lines() {
        match classify_heading(line) {
            Some((kind, inline)) => sections.push(Section::new(kind, inline)),
            None => {
                if let Some(current) = sections.last_mut() {
                    current.lines.push(line);
                }
            }
        }
    }

    sections
}
