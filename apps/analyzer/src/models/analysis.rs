use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Final analysis payload. Field names are part of the output contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub ats_score: f64,
    pub match_percentage: f64,
    pub skills_match: BTreeMap<String, Vec<String>>,
    pub recommendations: Vec<String>,
}

/// Error payload: exactly one `error` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

/// What the pipeline prints: either the result or the error payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Success(AnalysisResult),
    Failure(ErrorPayload),
}

impl AnalysisOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        AnalysisOutcome::Failure(ErrorPayload {
            error: message.into(),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisOutcome::Failure(_))
    }
}

impl<E: std::fmt::Display> From<Result<AnalysisResult, E>> for AnalysisOutcome {
    fn from(result: Result<AnalysisResult, E>) -> Self {
        match result {
            Ok(analysis) => AnalysisOutcome::Success(analysis),
            Err(e) => AnalysisOutcome::error(e.to_string()),
        }
    }
}
