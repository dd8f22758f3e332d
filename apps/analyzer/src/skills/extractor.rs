//! Skill Extractor: pluggable entity recognition over job descriptions.
//!
//! Default: `GazetteerSkillExtractor` (built-in vocabulary, deterministic, offline).
//! Optional: `LlmSkillExtractor` (Anthropic Messages API), enabled via
//! `ENABLE_LLM_SKILL_EXTRACTION` when an API key is configured.
//!
//! The pipeline holds an `Arc<dyn SkillExtractor>` chosen at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AnalyzerError;
use crate::llm_client::LlmClient;
use crate::skills::vocabulary::SkillVocabulary;

pub const SKILL_LABEL: &str = "SKILL";

/// A labeled span recognized in free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: String,
}

#[async_trait]
pub trait SkillExtractor: Send + Sync {
    /// Every entity the backend recognizes, in order of appearance.
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, AnalyzerError>;

    /// Backend name, for logs.
    fn backend(&self) -> &'static str;

    /// Spans labeled `SKILL`, as written in the input. No case or synonym
    /// normalization.
    async fn extract_skills(&self, text: &str) -> Result<Vec<String>, AnalyzerError> {
        let spans = self.recognize(text).await?;
        Ok(spans
            .into_iter()
            .filter(|span| span.label == SKILL_LABEL)
            .map(|span| span.text)
            .collect())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// GazetteerSkillExtractor
// ────────────────────────────────────────────────────────────────────────────

/// Recognizes vocabulary terms as `SKILL` entities, reporting the surface
/// text rather than the canonical spelling.
pub struct GazetteerSkillExtractor {
    vocabulary: SkillVocabulary,
}

impl GazetteerSkillExtractor {
    pub fn new(vocabulary: SkillVocabulary) -> Self {
        Self { vocabulary }
    }
}

impl Default for GazetteerSkillExtractor {
    fn default() -> Self {
        Self::new(SkillVocabulary::builtin())
    }
}

#[async_trait]
impl SkillExtractor for GazetteerSkillExtractor {
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, AnalyzerError> {
        Ok(self
            .vocabulary
            .find_all(text)
            .into_iter()
            .map(|hit| EntitySpan {
                text: hit.surface(text).to_string(),
                label: SKILL_LABEL.to_string(),
            })
            .collect())
    }

    fn backend(&self) -> &'static str {
        "gazetteer"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmSkillExtractor
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmSkillExtractor(pub LlmClient);

#[async_trait]
impl SkillExtractor for LlmSkillExtractor {
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, AnalyzerError> {
        if text.trim().is_empty() {
            return Ok(vec![]);
        }
        self.0
            .call_entities(text)
            .await
            .map_err(|e| AnalyzerError::Extraction(e.to_string()))
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::RetryPolicy;

    struct FixedExtractor(Vec<EntitySpan>);

    #[async_trait]
    impl SkillExtractor for FixedExtractor {
        async fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>, AnalyzerError> {
            Ok(self.0.clone())
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    fn span(text: &str, label: &str) -> EntitySpan {
        EntitySpan {
            text: text.to_string(),
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_extract_skills_filters_skill_label() {
        let extractor = FixedExtractor(vec![
            span("Acme Corp", "ORG"),
            span("Rust", SKILL_LABEL),
            span("BSc", "DEGREE"),
            span("SQL", SKILL_LABEL),
        ]);
        let skills = extractor.extract_skills("ignored").await.unwrap();
        assert_eq!(skills, vec!["Rust", "SQL"]);
    }

    #[tokio::test]
    async fn test_gazetteer_reports_surface_text() {
        let extractor = GazetteerSkillExtractor::default();
        let skills = extractor
            .extract_skills("Looking for python and SQL experience")
            .await
            .unwrap();
        assert_eq!(skills, vec!["python", "SQL"]);
    }

    #[tokio::test]
    async fn test_gazetteer_empty_description() {
        let extractor = GazetteerSkillExtractor::default();
        assert!(extractor.extract_skills("").await.unwrap().is_empty());
        assert_eq!(extractor.backend(), "gazetteer");
    }

    #[tokio::test]
    async fn test_llm_extractor_skips_call_on_blank_text() {
        let client = LlmClient::new("sk-test".to_string())
            .unwrap()
            .with_api_url("http://127.0.0.1:9/v1/messages");
        let extractor = LlmSkillExtractor(client);
        assert!(extractor.recognize("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_llm_extractor_failure_is_extraction_error() {
        let client = LlmClient::new("sk-test".to_string())
            .unwrap()
            .with_api_url("http://127.0.0.1:9/v1/messages")
            .with_retry_policy(RetryPolicy {
                attempts: 1,
                base_delay: std::time::Duration::ZERO,
            });
        let extractor = LlmSkillExtractor(client);
        let err = extractor.extract_skills("Rust developer").await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Extraction(_)));
    }

    #[test]
    fn test_entity_span_deserializes_from_model_output() {
        let spans: Vec<EntitySpan> =
            serde_json::from_str(r#"[{"text": "Kafka", "label": "SKILL"}]"#).unwrap();
        assert_eq!(spans, vec![span("Kafka", SKILL_LABEL)]);
    }
}
