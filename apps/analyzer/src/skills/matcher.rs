use std::collections::{BTreeMap, HashSet};

use crate::skills::library::SkillLibrary;

/// Job-side tokens for categorized matching: the raw description split on
/// whitespace. No punctuation stripping, so "Python," is not "Python".
pub fn job_tokens(job_description: &str) -> Vec<&str> {
    job_description.split_whitespace().collect()
}

/// Résumé skills that also appear verbatim among the job skills.
/// Exact, case-sensitive comparison.
pub fn matched_skills<'a, R, J>(resume_skills: &'a [R], job_skills: &[J]) -> HashSet<&'a str>
where
    R: AsRef<str>,
    J: AsRef<str>,
{
    let job: HashSet<&str> = job_skills.iter().map(AsRef::as_ref).collect();
    resume_skills
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| job.contains(s))
        .collect()
}

/// Buckets the résumé/job intersection into library categories.
///
/// Every category appears in the output; one without overlap maps to an empty
/// list. Lists are sorted.
pub fn match_skills<R, J>(
    resume_skills: &[R],
    job_skills: &[J],
    library: &SkillLibrary,
) -> BTreeMap<String, Vec<String>>
where
    R: AsRef<str>,
    J: AsRef<str>,
{
    let matched = matched_skills(resume_skills, job_skills);

    library
        .categories()
        .map(|(category, skills)| {
            let hits: Vec<String> = skills
                .iter()
                .filter(|s| matched.contains(s.as_str()))
                .cloned()
                .collect();
            (category.to_string(), hits)
        })
        .collect()
}
