use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

/// Default location of the skill taxonomy, relative to the working directory.
pub const DEFAULT_SKILL_LIBRARY_PATH: &str = "skill_library.json";

/// Analyzer configuration loaded from environment variables.
/// Nothing is required: every field has a default so the CLI runs bare.
#[derive(Debug, Clone)]
pub struct Config {
    pub skill_library_path: PathBuf,
    /// Routes job-description skill extraction through the LLM backend.
    /// Ignored unless `anthropic_api_key` is also set.
    pub enable_llm_skill_extraction: bool,
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skill_library_path: PathBuf::from(DEFAULT_SKILL_LIBRARY_PATH),
            enable_llm_skill_extraction: false,
            anthropic_api_key: None,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    /// Full server configuration. Malformed values are errors.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(env_var)
    }

    /// Analysis-only configuration for the CLI. Reads the skill library path
    /// and the LLM settings; server keys are never looked at, and a malformed
    /// flag falls back to `false`.
    pub fn analysis_from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::analysis_from_lookup(env_var)
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        Ok(Config {
            skill_library_path: get("SKILL_LIBRARY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.skill_library_path),
            enable_llm_skill_extraction: parse_flag(&get, "ENABLE_LLM_SKILL_EXTRACTION")?,
            anthropic_api_key: api_key(&get),
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    fn analysis_from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let enable_llm_skill_extraction = parse_flag(&get, "ENABLE_LLM_SKILL_EXTRACTION")
            .unwrap_or_else(|e| {
                warn!("{e:#}; LLM skill extraction disabled");
                false
            });
        Config {
            skill_library_path: get("SKILL_LIBRARY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SKILL_LIBRARY_PATH)),
            enable_llm_skill_extraction,
            anthropic_api_key: api_key(&get),
            ..Config::default()
        }
    }

    /// True when the LLM extractor should replace the gazetteer.
    pub fn use_llm_extractor(&self) -> bool {
        self.enable_llm_skill_extraction && self.anthropic_api_key.is_some()
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn api_key(get: &impl Fn(&str) -> Option<String>) -> Option<String> {
    get("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty())
}

fn parse_flag(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<bool> {
    match get(key) {
        Some(raw) => parse_bool(&raw)
            .with_context(|| format!("Environment variable '{key}' must be true or false")),
        None => Ok(false),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
