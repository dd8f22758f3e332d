//! Built-in skill vocabulary and the span finder both the résumé parser and
//! the default entity recognizer run over it.

/// Canonical spellings of the skills recognized out of the box.
///
/// Single-letter languages and "Go" are left out: as bare words they match
/// far more prose than skills.
pub const BUILTIN_SKILLS: &[&str] = &[
    // Languages
    "Python", "Java", "JavaScript", "TypeScript", "C++", "C#", "Golang", "Rust", "Ruby",
    "PHP", "Swift", "Kotlin", "Scala", "Perl", "Haskell", "Elixir", "Erlang", "Clojure",
    "Dart", "Lua", "MATLAB", "SQL", "Bash", "PowerShell", "HTML", "CSS", "Sass",
    "GraphQL", "Objective-C", "Fortran", "COBOL",
    // Frameworks and libraries
    "React", "Angular", "Vue.js", "Svelte", "Next.js", "Node.js", "Express", "Django",
    "Flask", "FastAPI", "Spring Boot", "Spring", "Ruby on Rails", "Laravel", ".NET",
    "ASP.NET", "TensorFlow", "PyTorch", "Keras", "scikit-learn", "Pandas", "NumPy",
    "Spark", "Hadoop", "Kafka", "RabbitMQ", "Airflow", "Redux", "jQuery", "Bootstrap",
    "Tailwind CSS", "Tokio", "Actix",
    // Data stores
    "MySQL", "PostgreSQL", "MongoDB", "Redis", "Elasticsearch", "Cassandra", "DynamoDB",
    "SQLite", "Oracle", "Firebase", "Snowflake", "BigQuery", "Neo4j",
    // Cloud and tooling
    "AWS", "Azure", "GCP", "Google Cloud", "Docker", "Kubernetes", "Terraform", "Ansible",
    "Jenkins", "GitHub Actions", "GitLab CI", "CI/CD", "Git", "Linux", "Nginx",
    "Prometheus", "Grafana", "Jira", "Figma", "Tableau", "Power BI", "Excel",
    // Practices and domains
    "Machine Learning", "Deep Learning", "Natural Language Processing", "NLP",
    "Computer Vision", "Data Analysis", "Data Science", "Data Visualization", "Statistics",
    "REST", "REST APIs", "Microservices", "Distributed Systems", "DevOps", "Agile", "Scrum",
    "Unit Testing", "TDD", "System Design", "Cybersecurity", "ETL", "Big Data",
    // Professional skills
    "Leadership", "Communication", "Teamwork", "Problem Solving", "Project Management",
    "Time Management", "Mentoring", "Public Speaking", "Negotiation", "Critical Thinking",
];

/// A vocabulary hit: byte range in the scanned text plus the canonical term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMatch {
    pub start: usize,
    pub end: usize,
    pub canonical: String,
}

impl TermMatch {
    /// The matched slice exactly as it appears in `text`.
    pub fn surface<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Case-insensitive, whole-word term finder. Overlapping hits resolve to the
/// longest term starting earliest, so "Spring Boot" wins over "Spring".
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    // (canonical, ascii-lowercased)
    terms: Vec<(String, String)>,
}

impl SkillVocabulary {
    pub fn builtin() -> Self {
        Self::new(BUILTIN_SKILLS.iter().copied())
    }

    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut terms: Vec<(String, String)> = terms
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.trim().is_empty())
            .map(|t| {
                let lower = t.to_ascii_lowercase();
                (t, lower)
            })
            .collect();
        terms.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.1.cmp(&b.1)));
        terms.dedup_by(|a, b| a.1 == b.1);
        Self { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Canonical spelling of `term`, if it is in the vocabulary.
    pub fn canonical(&self, term: &str) -> Option<&str> {
        let lower = term.trim().to_ascii_lowercase();
        self.terms
            .iter()
            .find(|(_, l)| *l == lower)
            .map(|(c, _)| c.as_str())
    }

    /// All non-overlapping hits in `text`, in order of appearance.
    pub fn find_all(&self, text: &str) -> Vec<TermMatch> {
        // ASCII lowercasing keeps byte offsets aligned with `text`.
        let haystack = text.to_ascii_lowercase();
        let mut hits: Vec<TermMatch> = Vec::new();

        for (canonical, lower) in &self.terms {
            for (start, _) in haystack.match_indices(lower.as_str()) {
                let end = start + lower.len();
                if is_word_boundary(&haystack, start, end) {
                    hits.push(TermMatch {
                        start,
                        end,
                        canonical: canonical.clone(),
                    });
                }
            }
        }

        hits.sort_by(|a, b| a.start.cmp(&b.start).then((b.end - b.start).cmp(&(a.end - a.start))));

        let mut resolved: Vec<TermMatch> = Vec::with_capacity(hits.len());
        let mut last_end = 0;
        for hit in hits {
            if resolved.is_empty() || hit.start >= last_end {
                last_end = hit.end;
                resolved.push(hit);
            }
        }
        resolved
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !is_word_char(c));
    // '+' and '#' extend a term ("C" vs "C++"), so they block the right edge too.
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !is_word_char(c) && c != '+' && c != '#');
    before_ok && after_ok
}
