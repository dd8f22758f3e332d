pub mod analysis;
pub mod resume;

pub use analysis::{AnalysisOutcome, AnalysisResult, ErrorPayload};
pub use resume::{ResumeData, SectionRecord};
