use once_cell::sync::Lazy;
use regex::Regex;

/// A canonical skill label plus the spellings that map onto it.
#[derive(Debug, Clone)]
pub struct SkillTerm {
    pub label: String,
    /// Lowercased label followed by lowercased aliases.
    pub(crate) needles: Vec<String>,
    /// Matches any scanned spelling with a non-alphanumeric character or text edge on both sides.
    matcher: Option<Regex>,
}

impl SkillTerm {
    pub fn new(label: &str, aliases: &[&str]) -> Self {
        Self::build(label, aliases, true)
    }

    /// A term whose label is too common a word to search for; text matches only its aliases.
    /// The label still canonicalises user-entered skills.
    pub fn alias_only(label: &str, aliases: &[&str]) -> Self {
        Self::build(label, aliases, false)
    }

    fn build(label: &str, aliases: &[&str], scan_label: bool) -> Self {
        let mut needles = vec![label.to_lowercase()];
        for alias in aliases {
            let alias = alias.to_lowercase();
            if !needles.contains(&alias) {
                needles.push(alias);
            }
        }

        let skip = usize::from(!scan_label);
        let scanned: Vec<String> = needles
            .iter()
            .skip(skip)
            .filter(|n| !n.is_empty())
            .map(|n| regex::escape(n))
            .collect();
        let matcher = if scanned.is_empty() {
            None
        } else {
            Regex::new(&format!(
                r"(?i)(?:^|[^\p{{L}}\p{{N}}])(?:{})(?:$|[^\p{{L}}\p{{N}}])",
                scanned.join("|")
            ))
            .ok()
        };

        Self {
            label: label.to_string(),
            needles,
            matcher,
        }
    }

    pub fn needles(&self) -> &[String] {
        &self.needles
    }

    /// True when any scanned spelling occurs in `text` as a whole word.
    pub fn is_mentioned_in(&self, text: &str) -> bool {
        self.matcher.as_ref().is_some_and(|m| m.is_match(text))
    }
}

/// The fixed set of skill terms the extractor knows about.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: Vec<SkillTerm>,
}

// (label, aliases)
const TECHNOLOGY_TERMS: &[(&str, &[&str])] = &[
    ("Python", &[]),
    ("Java", &[]),
    ("JavaScript", &["ecmascript"]),
    ("C++", &["cpp"]),
    ("C#", &["csharp"]),
    ("R", &[]),
    ("SQL", &[]),
    ("HTML", &["html5"]),
    ("CSS", &["css3"]),
    ("TensorFlow", &[]),
    ("PyTorch", &[]),
    ("Scikit-learn", &["sklearn", "scikit learn"]),
    ("Pandas", &[]),
    ("NumPy", &[]),
    ("Matplotlib", &[]),
    ("Machine Learning", &["ml"]),
    ("Deep Learning", &[]),
    ("Data Analysis", &["data analytics"]),
    ("Data Science", &[]),
    ("AWS", &["amazon web services"]),
    ("Azure", &["microsoft azure"]),
    ("GCP", &["google cloud", "google cloud platform"]),
    ("Docker", &[]),
    ("Kubernetes", &["k8s"]),
    ("Git", &[]),
    ("Linux", &[]),
    ("React", &["reactjs", "react.js"]),
    ("Node.js", &["nodejs", "node js"]),
    ("Django", &[]),
    ("Flask", &[]),
    ("Spring Boot", &["springboot"]),
    ("Express.js", &["expressjs"]),
    ("MongoDB", &["mongo"]),
    ("PostgreSQL", &["postgres"]),
    ("MySQL", &[]),
    ("Redis", &[]),
    ("Elasticsearch", &["elastic search"]),
    ("Excel", &["ms excel"]),
    ("Tableau", &[]),
    ("Power BI", &["powerbi"]),
    ("Jupyter", &[]),
    ("Apache Spark", &["spark", "pyspark"]),
    ("NLP", &["natural language processing"]),
    ("Computer Vision", &[]),
    ("Statistics", &["statistical analysis"]),
    ("A/B Testing", &["ab testing"]),
    ("Agile", &[]),
    ("Scrum", &[]),
];

// Terms whose label is an everyday word ("go"); text matches their aliases only.
const ALIAS_ONLY_TERMS: &[(&str, &[&str])] = &[("Go", &["golang", "go lang"])];

pub static DEFAULT_VOCABULARY: Lazy<SkillVocabulary> =
    Lazy::new(SkillVocabulary::technology);

impl SkillVocabulary {
    pub fn new(terms: Vec<SkillTerm>) -> Self {
        Self { terms }
    }

    /// The default technology vocabulary used for resumes and user-entered skills.
    pub fn technology() -> Self {
        let terms = TECHNOLOGY_TERMS
            .iter()
            .map(|(label, aliases)| SkillTerm::new(label, aliases))
            .chain(
                ALIAS_ONLY_TERMS
                    .iter()
                    .map(|(label, aliases)| SkillTerm::alias_only(label, aliases)),
            )
            .collect();
        Self::new(terms)
    }

    pub fn terms(&self) -> &[SkillTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Canonical label for an exact (case-insensitive) label or alias.
    pub fn canonical(&self, input: &str) -> Option<&str> {
        let needle = input.trim().to_lowercase();
        self.terms
            .iter()
            .find(|term| term.needles.iter().any(|n| *n == needle))
            .map(|term| term.label.as_str())
    }
}
