/// Labels the entity prompt allows.
pub const ENTITY_LABELS: &[&str] = &["SKILL", "ORG", "DEGREE", "ROLE"];

/// System prompt for entity recognition over job descriptions.
pub const ENTITY_EXTRACTION_SYSTEM: &str = "You are a named-entity recognizer for job postings. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences.";

/// Entity recognition prompt. Replace `{text}` before sending.
pub const ENTITY_EXTRACTION_PROMPT: &str = r#"Label the named entities in the following job description.

Return a JSON array where every element has this EXACT schema:
{"text": "<span copied verbatim from the input>", "label": "<LABEL>"}

Allowed labels:
- SKILL: a technology, tool, programming language, framework, method or professional skill
- ORG: a company or organization
- DEGREE: an academic degree or certification
- ROLE: a job title

Rules:
- Copy each span exactly as written, preserving its casing.
- List entities in order of appearance. Repeat a span each time it appears.
- Return [] when there are no entities.

Job description:
{text}"#;

pub fn entity_extraction_prompt(text: &str) -> String {
    ENTITY_EXTRACTION_PROMPT.replace("{text}", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text() {
        let prompt = entity_extraction_prompt("Must know Rust and SQL.");
        assert!(prompt.ends_with("Must know Rust and SQL."));
        assert!(!prompt.contains("{text}"));
    }
}
