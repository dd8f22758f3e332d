//! Skill handling: built-in vocabulary, the category taxonomy, job-description
//! entity extraction, and résumé/job matching.

pub mod extractor;
pub mod library;
pub mod matcher;
pub mod vocabulary;

pub use extractor::{GazetteerSkillExtractor, LlmSkillExtractor, SkillExtractor};
pub use library::SkillLibrary;
pub use vocabulary::SkillVocabulary;
