//! Scoring: TF-IDF similarity and the weighted-rule ATS aggregator.

pub mod aggregator;
pub mod similarity;

pub use aggregator::{
    calculate_ats_score, compute_ats_score, AtsAssessment, ScoreBreakdown, ScoringWeights,
};
pub use similarity::SimilarityScorer;
