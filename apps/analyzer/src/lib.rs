//! Résumé ATS analyzer: parses a résumé, compares it with a job description,
//! and produces an ATS score with grammar feedback.

pub mod config;
pub mod errors;
pub mod grammar;
pub mod llm_client;
pub mod models;
pub mod parsing;
pub mod pipeline;
pub mod routes;
pub mod scoring;
pub mod skills;
pub mod state;
pub mod telemetry;

pub use pipeline::{analyze_resume, Toolkit};
