use std::collections::{BTreeMap, HashMap};

use regex::Regex;

/// Tokens are runs of two or more word characters.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// TF-IDF cosine similarity between exactly two documents.
///
/// The vector space is built from the two inputs alone: lowercase tokens, raw
/// term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`, L2-normalized rows.
pub struct SimilarityScorer {
    token_re: Regex,
}

impl SimilarityScorer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            token_re: Regex::new(TOKEN_PATTERN)?,
        })
    }

    /// Cosine similarity scaled to 0–100. A document without tokens yields a
    /// zero vector, and any zero vector scores 0.0 rather than NaN.
    pub fn percentage(&self, resume_text: &str, job_text: &str) -> f64 {
        let docs = [self.term_counts(resume_text), self.term_counts(job_text)];

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for counts in &docs {
            for term in counts.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if document_frequency.is_empty() {
            return 0.0;
        }

        let n_docs = docs.len() as f64;
        let idf: HashMap<&str, f64> = document_frequency
            .iter()
            .map(|(term, df)| (*term, ((1.0 + n_docs) / (1.0 + *df as f64)).ln() + 1.0))
            .collect();

        let weights = |counts: &HashMap<String, usize>| -> HashMap<String, f64> {
            counts
                .iter()
                .map(|(term, tf)| (term.clone(), *tf as f64 * idf[term.as_str()]))
                .collect()
        };
        let a = weights(&docs[0]);
        let b = weights(&docs[1]);

        let norm_a = l2_norm(&a);
        let norm_b = l2_norm(&b);
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        let dot: f64 = a
            .iter()
            .filter_map(|(term, w)| b.get(term).map(|v| w * v))
            .sum();
        let cosine = (dot / (norm_a * norm_b)).clamp(0.0, 1.0);
        if cosine.is_finite() {
            cosine * 100.0
        } else {
            0.0
        }
    }

    fn term_counts(&self, text: &str) -> HashMap<String, usize> {
        let lowered = text.to_lowercase();
        let mut counts = HashMap::new();
        for token in self.token_re.find_iter(&lowered) {
            *counts.entry(token.as_str().to_string()).or_insert(0) += 1;
        }
        counts
    }
}

fn l2_norm(vector: &HashMap<String, f64>) -> f64 {
    vector.values().map(|v| v * v).sum::<f64>().sqrt()
}
