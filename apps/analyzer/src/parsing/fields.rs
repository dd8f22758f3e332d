use chrono::Datelike;
use regex::Regex;

const BULLET_CHARS: &[char] = &['•', '·', '▪', '◦', '‣', '●', '-', '*', '–'];

/// Compiled patterns for the contact and date fields.
pub struct FieldPatterns {
    email: Regex,
    phone: Regex,
    degree: Regex,
    year_range: Regex,
    skill_separators: Regex,
}

impl FieldPatterns {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            email: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")?,
            phone: Regex::new(r"\+?\(?\d[\d\s().-]{7,}\d")?,
            degree: Regex::new(
                r"(?i)\b(?:bachelor(?:'s)?|master(?:'s)?|ph\.?\s?d|doctorate|mba|b\.?\s?sc|m\.?\s?sc|b\.?\s?tech|m\.?\s?tech|b\.?\s?eng|m\.?\s?eng|associate(?:'s)? degree|diploma)\b",
            )?,
            year_range: Regex::new(
                r"(?i)\b((?:19|20)\d{2})\s*(?:-|–|—|to)\s*((?:19|20)\d{2}|present|current|now)\b",
            )?,
            skill_separators: Regex::new(r"[,;|•·▪\n]")?,
        })
    }

    pub fn email(&self, text: &str) -> Option<String> {
        self.email.find(text).map(|m| m.as_str().to_string())
    }

    /// First run of 10–15 digits that reads as a phone number. Year ranges
    /// ("2018 - 2021") fall short of the digit count.
    pub fn mobile_number(&self, text: &str) -> Option<String> {
        self.phone
            .find_iter(text)
            .map(|m| m.as_str().trim())
            .find(|candidate| {
                let digits = candidate.chars().filter(char::is_ascii_digit).count();
                (10..=15).contains(&digits)
            })
            .map(str::to_string)
    }

    pub fn mentions_degree(&self, line: &str) -> bool {
        self.degree.is_match(line)
    }

    /// Years spanned by every date range in `text`; open ranges run to
    /// `current_year`. Inverted ranges count as zero.
    pub fn years_of_experience(&self, text: &str, current_year: i32) -> f64 {
        self.year_range
            .captures_iter(text)
            .filter_map(|caps| {
                let start: i32 = caps.get(1)?.as_str().parse().ok()?;
                let end_raw = caps.get(2)?.as_str();
                let end = end_raw.parse::<i32>().unwrap_or(current_year);
                Some((end - start).max(0) as f64)
            })
            .sum()
    }

    /// Splits skills-section text into individual items. `Label: a, b` lines
    /// keep only the part after the label.
    pub fn skill_items<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let body = match line.split_once(':') {
            Some((_, rest)) => rest,
            None => line,
        };
        self.skill_separators
            .split(body)
            .map(strip_bullet)
            .filter(|item| !item.is_empty() && item.len() <= 40 && item.split_whitespace().count() <= 4)
            .collect()
    }
}

pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Drops leading bullet markers and surrounding whitespace.
pub fn strip_bullet(line: &str) -> &str {
    line.trim()
        .trim_start_matches(|c: char| BULLET_CHARS.contains(&c) || c.is_whitespace())
        .trim_end_matches('.')
        .trim()
}

/// A header line that looks like a person's name.
pub fn looks_like_name(line: &str) -> bool {
    let words = line.split_whitespace().count();
    (1..=5).contains(&words)
        && !line.contains('@')
        && !line.contains("http")
        && !line.chars().any(|c| c.is_ascii_digit())
        && line.chars().any(char::is_alphabetic)
}
