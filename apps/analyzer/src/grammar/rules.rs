//! Individual grammar/style rules. Each rule scans a prepared [`Document`]
//! and appends its findings; ordering is done by the checker.

use regex::Regex;

use crate::grammar::GrammarIssue;

const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "vs", "approx", "incl", "mr", "mrs", "ms", "dr", "jr", "sr", "st",
    "inc", "ltd", "co",
    // Degrees
    "b.sc", "m.sc", "ph.d", "b.s", "m.s", "b.a", "m.a", "m.b.a", "b.tech", "m.tech", "b.eng",
    "m.eng", "b.e", "m.d",
];

/// Letters whose spoken name starts with a vowel sound ("an SDK", "an M.Sc.").
const VOWEL_SOUND_LETTERS: &[char] = &['A', 'E', 'F', 'H', 'I', 'L', 'M', 'N', 'O', 'R', 'S', 'X'];

/// All-caps tokens read as words rather than spelled out ("a NASA mission").
const WORD_ACRONYMS: &[&str] = &[
    "NASA", "NATO", "NASDAQ", "SCADA", "SCUBA", "SAAS", "SAP", "SIM", "LASER", "RADAR", "FIFO",
    "LIFO", "RAID", "SWAT", "HIPAA",
];

/// Words starting with a vowel letter but a consonant sound ("a university").
const CONSONANT_SOUND_VOWEL_WORDS: &[&str] = &[
    "one", "once", "university", "universities", "user", "users", "unique", "unit", "units",
    "united", "union", "uniform", "useful", "usual", "utility", "european", "euro", "usb",
];

/// Words starting with a consonant letter but a vowel sound ("an hour").
const VOWEL_SOUND_CONSONANT_WORDS: &[&str] = &[
    "hour", "hours", "hourly", "honest", "honestly", "honor", "honour", "honorable", "heir",
    "mba", "msc", "mvp", "sql", "faq", "html", "http", "hr", "lcd", "ngo", "seo", "xml",
];

const CONTRACTIONS: &[(&str, &str)] = &[
    ("dont", "don't"),
    ("cant", "can't"),
    ("wont", "won't"),
    ("isnt", "isn't"),
    ("arent", "aren't"),
    ("wasnt", "wasn't"),
    ("doesnt", "doesn't"),
    ("didnt", "didn't"),
    ("couldnt", "couldn't"),
    ("shouldnt", "shouldn't"),
    ("wouldnt", "wouldn't"),
    ("im", "I'm"),
    ("ive", "I've"),
];

/// A word token with its byte range.
#[derive(Debug, Clone, Copy)]
pub struct Word<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Input text plus its word tokens.
pub struct Document<'a> {
    pub text: &'a str,
    pub words: Vec<Word<'a>>,
}

impl<'a> Document<'a> {
    pub fn new(text: &'a str, word_re: &Regex) -> Self {
        let words = word_re
            .find_iter(text)
            .map(|m| Word {
                text: m.as_str(),
                start: m.start(),
                end: m.end(),
            })
            .collect();
        Self { text, words }
    }

    /// Consecutive word pairs separated by whitespace only.
    fn adjacent_pairs(&self) -> impl Iterator<Item = (Word<'a>, Word<'a>)> + '_ {
        self.words.windows(2).filter_map(|pair| {
            let gap = &self.text[pair[0].end..pair[1].start];
            (!gap.is_empty() && gap.chars().all(char::is_whitespace)).then(|| (pair[0], pair[1]))
        })
    }

    fn word_at(&self, offset: usize) -> Option<&Word<'a>> {
        self.words.iter().find(|w| w.start == offset)
    }
}

fn issue(rule_id: &'static str, message: impl Into<String>, start: usize, end: usize) -> GrammarIssue {
    GrammarIssue {
        rule_id,
        message: message.into(),
        offset: start,
        length: end - start,
    }
}

pub fn uppercase_sentence_start(doc: &Document, out: &mut Vec<GrammarIssue>) {
    let text = doc.text;
    let mut expect_start = true;
    let mut after_terminal = false;

    for (i, c) in text.char_indices() {
        if after_terminal {
            after_terminal = false;
            if c.is_whitespace() {
                expect_start = true;
                continue;
            }
        }
        if matches!(c, '.' | '!' | '?') {
            if !ends_with_abbreviation(&text[..i]) {
                after_terminal = true;
            }
            continue;
        }
        if !expect_start {
            continue;
        }
        if c.is_alphabetic() {
            expect_start = false;
            if c.is_lowercase() {
                let end = doc.word_at(i).map_or(i + c.len_utf8(), |w| w.end);
                out.push(issue(
                    "UPPERCASE_SENTENCE_START",
                    "This sentence does not start with an uppercase letter.",
                    i,
                    end,
                ));
            }
        } else if c.is_numeric() {
            expect_start = false;
        }
    }
}

fn ends_with_abbreviation(prefix: &str) -> bool {
    let last = prefix
        .rsplit(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or("")
        .to_lowercase();
    ABBREVIATIONS.contains(&last.as_str())
}

pub fn word_repeat(doc: &Document, out: &mut Vec<GrammarIssue>) {
    for (first, second) in doc.adjacent_pairs() {
        if first.text.chars().any(char::is_alphabetic) && first.text.eq_ignore_ascii_case(second.text)
        {
            out.push(issue(
                "ENGLISH_WORD_REPEAT_RULE",
                "Possible typo: you repeated a word.",
                first.start,
                second.end,
            ));
        }
    }
}

pub fn a_vs_an(doc: &Document, out: &mut Vec<GrammarIssue>) {
    for (article, next) in doc.adjacent_pairs() {
        let article_lower = article.text.to_ascii_lowercase();
        if article_lower != "a" && article_lower != "an" {
            continue;
        }
        let vowel_sound = starts_with_vowel_sound(next.text);
        if article_lower == "a" && vowel_sound {
            out.push(issue(
                "EN_A_VS_AN",
                "Use \u{201c}an\u{201d} instead of \u{2018}a\u{2019} if the following word starts with a vowel sound, e.g. \u{2018}an article\u{2019}, \u{2018}an hour\u{2019}.",
                article.start,
                article.end,
            ));
        } else if article_lower == "an" && !vowel_sound {
            out.push(issue(
                "EN_A_VS_AN",
                "Use \u{201c}a\u{201d} instead of \u{2018}an\u{2019} if the following word doesn't start with a vowel sound, e.g. \u{2018}a sentence\u{2019}, \u{2018}a university\u{2019}.",
                article.start,
                article.end,
            ));
        }
    }
}

fn starts_with_vowel_sound(word: &str) -> bool {
    let Some(first) = word.chars().next() else {
        return false;
    };
    if first.is_ascii_digit() {
        let digits: String = word.chars().take_while(char::is_ascii_digit).collect();
        return number_starts_with_vowel_sound(&digits);
    }
    if is_spelled_acronym(word) {
        return VOWEL_SOUND_LETTERS.contains(&first);
    }

    let lower = word.to_lowercase();
    if CONSONANT_SOUND_VOWEL_WORDS.contains(&lower.as_str()) {
        return false;
    }
    if VOWEL_SOUND_CONSONANT_WORDS.contains(&lower.as_str()) {
        return true;
    }
    matches!(first.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Uppercase tokens ("LLM", "S3", a lone "M" from "M.Sc.") are read letter
/// by letter unless listed as word-like acronyms.
fn is_spelled_acronym(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_uppercase())
        && word
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        && !WORD_ACRONYMS.contains(&word)
}

/// "eight", "eleven", "eighteen" and the thousands built on them.
fn number_starts_with_vowel_sound(digits: &str) -> bool {
    digits.starts_with('8')
        || ((digits.starts_with("11") || digits.starts_with("18")) && digits.len() % 3 == 2)
}

pub fn lowercase_i(doc: &Document, out: &mut Vec<GrammarIssue>) {
    for word in &doc.words {
        let followed_by_dot = doc.text[word.end..].starts_with('.');
        if word.text == "i" && !followed_by_dot {
            out.push(issue(
                "I_LOWERCASE",
                "Did you mean \u{201c}I\u{201d}?",
                word.start,
                word.end,
            ));
        }
    }
}

pub fn contraction_spelling(doc: &Document, out: &mut Vec<GrammarIssue>) {
    for word in &doc.words {
        // All-caps tokens ("IM") are acronyms more often than not.
        if word.text.chars().all(|c| c.is_uppercase()) {
            continue;
        }
        let lower = word.text.to_lowercase();
        if let Some((_, fixed)) = CONTRACTIONS.iter().find(|(bare, _)| *bare == lower) {
            out.push(issue(
                "EN_CONTRACTION_SPELLING",
                format!("Possible spelling mistake found. Did you mean \u{201c}{fixed}\u{201d}?"),
                word.start,
                word.end,
            ));
        }
    }
}

pub fn repeated_whitespace(doc: &Document, spaces_re: &Regex, out: &mut Vec<GrammarIssue>) {
    let text = doc.text;
    for m in spaces_re.find_iter(text) {
        let prev = text[..m.start()].chars().next_back();
        let next = text[m.end()..].chars().next();
        let inside_line = matches!(prev, Some(c) if !c.is_whitespace())
            && matches!(next, Some(c) if !c.is_whitespace());
        if inside_line {
            out.push(issue(
                "WHITESPACE_RULE",
                "Possible typo: you repeated a whitespace.",
                m.start(),
                m.end(),
            ));
        }
    }
}

pub fn punctuation_whitespace(
    doc: &Document,
    space_before_re: &Regex,
    space_after_paren_re: &Regex,
    out: &mut Vec<GrammarIssue>,
) {
    let text = doc.text;
    for caps in space_before_re.captures_iter(text) {
        let (Some(whole), Some(mark)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        // ".NET", ".5" and friends are tokens, not punctuation.
        if mark.as_str() == "."
            && text[mark.end()..]
                .chars()
                .next()
                .map_or(false, char::is_alphanumeric)
        {
            continue;
        }
        // Leading whitespace on a line is indentation.
        if text[..whole.start()]
            .chars()
            .next_back()
            .map_or(true, |c| c == '\n')
        {
            continue;
        }
        let message = match mark.as_str() {
            "," => "Put a space after the comma, but not before the comma.",
            ")" => "Don't put a space before the closing parenthesis.",
            _ => "Don't put a space before the punctuation mark.",
        };
        out.push(issue(
            "COMMA_PARENTHESIS_WHITESPACE",
            message,
            whole.start(),
            whole.end(),
        ));
    }
    for m in space_after_paren_re.find_iter(text) {
        out.push(issue(
            "COMMA_PARENTHESIS_WHITESPACE",
            "Don't put a space after the opening parenthesis.",
            m.start(),
            m.end(),
        ));
    }
}

pub fn double_punctuation(doc: &Document, punct_run_re: &Regex, out: &mut Vec<GrammarIssue>) {
    for m in punct_run_re.find_iter(doc.text) {
        let run = m.as_str();
        // "..." is an ellipsis; longer dot runs are left alone too.
        if run.chars().all(|c| c == '.') && run.len() != 2 {
            continue;
        }
        let message = if run == ".." {
            "Two consecutive dots"
        } else {
            "Two consecutive punctuation marks"
        };
        out.push(issue("DOUBLE_PUNCTUATION", message, m.start(), m.end()));
    }
}

pub fn paragraph_end(doc: &Document, out: &mut Vec<GrammarIssue>) {
    let trimmed = doc.text.trim_end();
    let Some(last) = trimmed.chars().next_back() else {
        return;
    };
    if matches!(
        last,
        '.' | '!' | '?' | '\u{2026}' | ')' | '"' | '\'' | '\u{201d}' | ':'
    ) {
        return;
    }
    let last_paragraph_start = trimmed.rfind("\n\n").map_or(0, |i| i + 2);
    let words_in_paragraph = doc
        .words
        .iter()
        .filter(|w| w.start >= last_paragraph_start)
        .count();
    // Short fragments are headings or lists, not sentences.
    if words_in_paragraph < 4 {
        return;
    }
    let end = trimmed.len();
    let start = end - last.len_utf8();
    out.push(issue(
        "PUNCTUATION_PARAGRAPH_END",
        "Please add a punctuation mark at the end of paragraph.",
        start,
        end,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, rule: fn(&Document, &mut Vec<GrammarIssue>)) -> Vec<GrammarIssue> {
        let word_re = Regex::new(r"\w+(?:'\w+)*").unwrap();
        let doc = Document::new(text, &word_re);
        let mut out = Vec::new();
        rule(&doc, &mut out);
        out
    }

    #[test]
    fn test_sentence_start_flags_lowercase() {
        let issues = run("Built APIs. shipped fast!", uppercase_sentence_start);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].offset, 12);
        assert_eq!(issues[0].length, "shipped".len());
    }

    #[test]
    fn test_sentence_start_skips_abbreviations_and_numbers() {
        assert!(run("Tools, e.g. docker and k8s.", uppercase_sentence_start).is_empty());
        assert!(run("Rated 4.5 stars. 3 years in ops.", uppercase_sentence_start).is_empty());
    }

    #[test]
    fn test_word_repeat() {
        let issues = run("I led the the team", word_repeat);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule_id, "ENGLISH_WORD_REPEAT_RULE");
        assert!(run("I led the team", word_repeat).is_empty());
        // Numbers may legitimately repeat.
        assert!(run("Scored 10 10 times", word_repeat).is_empty());
    }

    #[test]
    fn test_a_vs_an() {
        assert_eq!(run("Worked as a engineer", a_vs_an).len(), 1);
        assert_eq!(run("Earned an degree", a_vs_an).len(), 1);
        assert!(run("Studied at a university for an hour", a_vs_an).is_empty());
        assert!(run("Built an API and a tool", a_vs_an).is_empty());
    }

    #[test]
    fn test_a_vs_an_reads_acronyms_by_letter_name() {
        assert!(run("Built an LLM pipeline", a_vs_an).is_empty());
        assert!(run("Shipped an SDK for partners", a_vs_an).is_empty());
        assert!(run("Holds an M.Sc. in physics", a_vs_an).is_empty());
        assert!(run("Owned a UI kit and a CLI", a_vs_an).is_empty());
        assert!(run("Worked on a NASA mission", a_vs_an).is_empty());
        assert_eq!(run("Built a LLM pipeline", a_vs_an).len(), 1);
        assert_eq!(run("Wrote an CLI", a_vs_an).len(), 1);
    }

    #[test]
    fn test_a_vs_an_reads_numbers_aloud() {
        assert!(run("Engineer with an 8-year track record", a_vs_an).is_empty());
        assert!(run("Ran an 11-week program and a 5-day sprint", a_vs_an).is_empty());
        assert_eq!(run("Engineer with a 8-year track record", a_vs_an).len(), 1);
        assert_eq!(run("Led an 5-person team", a_vs_an).len(), 1);
    }

    #[test]
    fn test_degree_abbreviations_do_not_end_sentences() {
        assert!(run("Holds an M.Sc. in physics.", uppercase_sentence_start).is_empty());
        assert!(run("Earned a Ph.D. in chemistry and a B.S. in math.", uppercase_sentence_start)
            .is_empty());
    }

    #[test]
    fn test_lowercase_i() {
        assert_eq!(run("Since then i have led teams", lowercase_i).len(), 1);
        assert!(run("Frameworks (i.e. React)", lowercase_i).is_empty());
    }

    #[test]
    fn test_contractions() {
        let issues = run("I dont give up", contraction_spelling);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("don't"));
        assert!(run("Built IM tooling", contraction_spelling).is_empty());
    }

    #[test]
    fn test_paragraph_end_requires_sentence_length() {
        assert_eq!(
            run("Engineer with five years of experience", paragraph_end).len(),
            1
        );
        assert!(run("Engineer with five years of experience.", paragraph_end).is_empty());
        assert!(run("Backend engineer", paragraph_end).is_empty());
        assert!(run("", paragraph_end).is_empty());
    }
}
