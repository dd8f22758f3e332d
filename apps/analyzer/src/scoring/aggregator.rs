use serde::{Deserialize, Serialize};

use crate::errors::AnalyzerError;
use crate::grammar::GrammarChecker;
use crate::models::ResumeData;
use crate::skills::extractor::SkillExtractor;
use crate::skills::matcher::matched_skills;

/// At this many grammar issues the grammar component drops to zero.
pub const GRAMMAR_ERROR_THRESHOLD: usize = 3;

/// Points available per component. Missing fields in a JSON override fall
/// back to the defaults; the weights need not sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub skills: f64,
    pub education: f64,
    pub experience: f64,
    pub grammar: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 50.0,
            education: 20.0,
            experience: 20.0,
            grammar: 10.0,
        }
    }
}

impl ScoringWeights {
    /// Parses a JSON override such as `{"skills": 60, "grammar": 0}`.
    pub fn from_json(raw: &str) -> Result<Self, AnalyzerError> {
        let weights: ScoringWeights = serde_json::from_str(raw)
            .map_err(|e| AnalyzerError::InvalidWeights(e.to_string()))?;
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<(), AnalyzerError> {
        for (name, value) in self.components() {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalyzerError::InvalidWeights(format!(
                    "'{name}' must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("skills", self.skills),
            ("education", self.education),
            ("experience", self.experience),
            ("grammar", self.grammar),
        ]
    }
}

/// Per-component points behind an ATS score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub education: f64,
    pub experience: f64,
    pub grammar: f64,
    /// Sum of the four components, rounded to two decimals.
    pub total: f64,
}

/// Weighted-rule ATS score.
///
/// - skills: `|resume ∩ job| / len(job_skills) * weight`, 0 when the job
///   lists no skills. `len` counts repeats in the extracted list.
/// - education / experience: full weight when at least one record exists.
/// - grammar: full weight below [`GRAMMAR_ERROR_THRESHOLD`] issues, else 0.
pub fn compute_ats_score(
    resume: &ResumeData,
    job_skills: &[String],
    grammar_error_count: usize,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let skills = if job_skills.is_empty() {
        0.0
    } else {
        let matched = matched_skills(&resume.skills, job_skills).len();
        matched as f64 / job_skills.len() as f64 * weights.skills
    };

    let education = if resume.education.is_empty() {
        0.0
    } else {
        weights.education
    };

    let experience = if resume.experience.is_empty() {
        0.0
    } else {
        weights.experience
    };

    let grammar = if grammar_error_count < GRAMMAR_ERROR_THRESHOLD {
        weights.grammar
    } else {
        0.0
    };

    ScoreBreakdown {
        skills,
        education,
        experience,
        grammar,
        total: round2(skills + education + experience + grammar),
    }
}

/// An ATS score together with the grammar findings that fed it.
#[derive(Debug, Clone, PartialEq)]
pub struct AtsAssessment {
    pub breakdown: ScoreBreakdown,
    /// Summary grammar issues as `"<ruleId>: <message>"`.
    pub recommendations: Vec<String>,
    pub job_skills: Vec<String>,
}

/// Runs job-skill extraction and the summary grammar check once, then
/// scores. The grammar findings are returned for the recommendations list.
pub async fn calculate_ats_score(
    resume: &ResumeData,
    job_description: &str,
    weights: &ScoringWeights,
    extractor: &dyn SkillExtractor,
    grammar: &GrammarChecker,
) -> Result<AtsAssessment, AnalyzerError> {
    let recommendations = grammar.check(resume.summary_text());
    let job_skills = extractor.extract_skills(job_description).await?;
    let breakdown = compute_ats_score(resume, &job_skills, recommendations.len(), weights);
    Ok(AtsAssessment {
        breakdown,
        recommendations,
        job_skills,
    })
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
