//! Pipeline Orchestrator: parse → library → similarity → categorized
//! matches → grammar → ATS score → result.
//!
//! Heavy handles (regexes, vocabulary, extractor backend) are built once by
//! [`Toolkit::init`] and passed in; nothing here is global.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::AnalyzerError;
use crate::grammar::GrammarChecker;
use crate::llm_client::{self, LlmClient};
use crate::models::{AnalysisOutcome, AnalysisResult, ResumeData};
use crate::parsing::ResumeParser;
use crate::scoring::aggregator::{calculate_ats_score, ScoringWeights};
use crate::scoring::similarity::SimilarityScorer;
use crate::skills::matcher::{job_tokens, match_skills};
use crate::skills::{
    GazetteerSkillExtractor, LlmSkillExtractor, SkillExtractor, SkillLibrary, SkillVocabulary,
};

/// Process-wide analysis handles, initialized once and shared read-only.
#[derive(Clone)]
pub struct Toolkit {
    pub parser: Arc<ResumeParser>,
    pub extractor: Arc<dyn SkillExtractor>,
    pub similarity: Arc<SimilarityScorer>,
    pub grammar: Arc<GrammarChecker>,
    pub skill_library_path: std::path::PathBuf,
}

impl Toolkit {
    pub fn init(config: &Config) -> Result<Self> {
        let vocabulary = SkillVocabulary::builtin();

        let extractor: Arc<dyn SkillExtractor> = match &config.anthropic_api_key {
            Some(key) if config.use_llm_extractor() => {
                let client = LlmClient::new(key.clone()).context("building LLM client")?;
                info!(model = llm_client::MODEL, "LLM skill extraction enabled");
                Arc::new(LlmSkillExtractor(client))
            }
            _ => Arc::new(GazetteerSkillExtractor::new(vocabulary.clone())),
        };
        info!(
            backend = extractor.backend(),
            vocabulary = vocabulary.len(),
            "skill extractor initialized"
        );

        Ok(Self {
            parser: Arc::new(ResumeParser::new(vocabulary).context("compiling parser patterns")?),
            extractor,
            similarity: Arc::new(SimilarityScorer::new().context("compiling token pattern")?),
            grammar: Arc::new(GrammarChecker::new().context("compiling grammar rules")?),
            skill_library_path: config.skill_library_path.clone(),
        })
    }
}

/// Runs the full analysis. Every failure becomes the `{"error": ...}` payload.
pub async fn analyze_resume(
    toolkit: &Toolkit,
    resume_path: &Path,
    job_description: &str,
    weights: &ScoringWeights,
) -> AnalysisOutcome {
    let result = run(toolkit, resume_path, job_description, weights).await;
    if let Err(e) = &result {
        warn!(error = %e, "analysis failed");
    }
    result.into()
}

async fn run(
    toolkit: &Toolkit,
    resume_path: &Path,
    job_description: &str,
    weights: &ScoringWeights,
) -> Result<AnalysisResult, AnalyzerError> {
    let resume = parse_resume(toolkit, resume_path).await?;
    let library = SkillLibrary::load(&toolkit.skill_library_path)?;

    let match_percentage = toolkit
        .similarity
        .percentage(&resume.joined_skills(), job_description);
    let skills_match = match_skills(&resume.skills, &job_tokens(job_description), &library);

    let assessment = calculate_ats_score(
        &resume,
        job_description,
        weights,
        toolkit.extractor.as_ref(),
        &toolkit.grammar,
    )
    .await?;
    let breakdown = &assessment.breakdown;
    debug!(
        job_skills = assessment.job_skills.len(),
        skills = breakdown.skills,
        education = breakdown.education,
        experience = breakdown.experience,
        grammar = breakdown.grammar,
        "ats score computed"
    );

    Ok(AnalysisResult {
        ats_score: breakdown.total,
        match_percentage,
        skills_match,
        recommendations: assessment.recommendations,
    })
}

/// Document parsing is CPU-bound (PDF decoding), so it runs on the blocking
/// pool instead of an executor thread.
async fn parse_resume(toolkit: &Toolkit, resume_path: &Path) -> Result<ResumeData, AnalyzerError> {
    let parser = Arc::clone(&toolkit.parser);
    let path = resume_path.to_path_buf();
    tokio::task::spawn_blocking(move || parser.parse(&path))
        .await
        .map_err(|e| AnalyzerError::ParseFailure(format!("parser task failed: {e}")))?
}
