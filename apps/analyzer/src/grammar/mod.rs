//! Grammar Checker: a small rule-based grammar and style checker for résumé
//! summaries. Rule IDs follow LanguageTool naming so the recommendations read
//! the same as the messages users already know.
//!
//! Regexes are compiled once in [`GrammarChecker::new`]; the checker is then
//! shared read-only across analyses.

pub mod rules;

use std::fmt;

use regex::Regex;
use serde::Serialize;

use rules::Document;

/// A single finding from the checker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrammarIssue {
    pub rule_id: &'static str,
    pub message: String,
    /// Byte offset into the checked text.
    pub offset: usize,
    pub length: usize,
}

impl fmt::Display for GrammarIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule_id, self.message)
    }
}

pub struct GrammarChecker {
    word_re: Regex,
    spaces_re: Regex,
    space_before_punct_re: Regex,
    space_after_paren_re: Regex,
    punct_run_re: Regex,
}

impl GrammarChecker {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            word_re: Regex::new(r"\w+(?:'\w+)*")?,
            spaces_re: Regex::new(r" {2,}")?,
            space_before_punct_re: Regex::new(r"[ \t]+([,.;:!?)])")?,
            space_after_paren_re: Regex::new(r"\([ \t]+")?,
            punct_run_re: Regex::new(r"[.,;:]{2,}")?,
        })
    }

    /// All findings, ordered by position.
    pub fn issues(&self, text: &str) -> Vec<GrammarIssue> {
        if text.trim().is_empty() {
            return vec![];
        }

        let doc = Document::new(text, &self.word_re);
        let mut found = Vec::new();
        rules::uppercase_sentence_start(&doc, &mut found);
        rules::word_repeat(&doc, &mut found);
        rules::a_vs_an(&doc, &mut found);
        rules::lowercase_i(&doc, &mut found);
        rules::contraction_spelling(&doc, &mut found);
        rules::repeated_whitespace(&doc, &self.spaces_re, &mut found);
        rules::punctuation_whitespace(
            &doc,
            &self.space_before_punct_re,
            &self.space_after_paren_re,
            &mut found,
        );
        rules::double_punctuation(&doc, &self.punct_run_re, &mut found);
        rules::paragraph_end(&doc, &mut found);

        // Stable: same-offset findings keep rule order.
        found.sort_by_key(|issue| issue.offset);
        found
    }

    /// Findings rendered as `"<ruleId>: <message>"`.
    pub fn check(&self, text: &str) -> Vec<String> {
        self.issues(text).iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> GrammarChecker {
        GrammarChecker::new().unwrap()
    }

    #[test]
    fn test_empty_text_has_no_issues() {
        assert!(checker().check("").is_empty());
        assert!(checker().check("  \n ").is_empty());
    }

    #[test]
    fn test_clean_summary_has_no_issues() {
        let summary = "Backend engineer with eight years of experience building \
                       distributed systems in Rust and Go. I enjoy mentoring, e.g. \
                       running weekly design reviews.";
        assert_eq!(checker().check(summary), Vec::<String>::new());
    }

    #[test]
    fn test_acronym_heavy_summaries_are_clean() {
        let c = checker();
        for summary in [
            "Holds an M.Sc. in physics.",
            "Built an LLM pipeline.",
            "Shipped an SDK for partners.",
            "Engineer with an 8-year track record.",
        ] {
            assert_eq!(c.check(summary), Vec::<String>::new(), "{summary}");
        }
    }

    #[test]
    fn test_messages_are_rule_prefixed() {
        let issues = checker().check("Led the the migration.");
        assert_eq!(
            issues,
            vec!["ENGLISH_WORD_REPEAT_RULE: Possible typo: you repeated a word."]
        );
    }

    #[test]
    fn test_issues_ordered_by_offset() {
        let issues = checker().issues("i built a app  quickly ,and shipped it..");
        let offsets: Vec<usize> = issues.iter().map(|i| i.offset).collect();
        let mut sorted = offsets.clone();
        sorted.sort();
        assert_eq!(offsets, sorted);

        let rules: Vec<&str> = issues.iter().map(|i| i.rule_id).collect();
        assert!(rules.contains(&"UPPERCASE_SENTENCE_START"));
        assert!(rules.contains(&"I_LOWERCASE"));
        assert!(rules.contains(&"EN_A_VS_AN"));
        assert!(rules.contains(&"WHITESPACE_RULE"));
        assert!(rules.contains(&"COMMA_PARENTHESIS_WHITESPACE"));
        assert!(rules.contains(&"DOUBLE_PUNCTUATION"));
    }

    #[test]
    fn test_ellipsis_and_dotnet_are_not_flagged() {
        assert!(checker().check("Experienced with .NET and more...").is_empty());
    }

    #[test]
    fn test_space_after_opening_parenthesis() {
        let issues = checker().check("Led platform work ( mostly Rust).");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].starts_with("COMMA_PARENTHESIS_WHITESPACE:"));
    }
}
