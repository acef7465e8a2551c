//! Skill Extractor: vocabulary lookup over plain text, plus the `SkillSet` value type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod extractor;
pub mod vocabulary;

pub use extractor::extract_skills;
pub use vocabulary::{SkillVocabulary, DEFAULT_VOCABULARY};

/// A case-insensitively deduplicated set of skill labels.
///
/// Keyed by the lowercased label; the first display spelling wins. Iteration order is the
/// lowercased label order, which keeps every derived output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet {
    labels: BTreeMap<String, String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from user-entered labels. Labels matching a vocabulary term or alias are
    /// replaced by the canonical label; unknown labels are kept as typed (trimmed).
    pub fn from_user_input<I, S>(labels: I, vocabulary: &SkillVocabulary) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for raw in labels {
            let raw = raw.as_ref().trim();
            match vocabulary.canonical(raw) {
                Some(label) => set.insert(label),
                None => set.insert(raw),
            }
        }
        set
    }

    /// Adds a label; blank labels and case-insensitive duplicates are ignored.
    pub fn insert(&mut self, label: &str) {
        let label = label.trim();
        if label.is_empty() {
            return;
        }
        self.labels
            .entry(label.to_lowercase())
            .or_insert_with(|| label.to_string());
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains_key(&label.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Display labels in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.values().map(String::as_str)
    }

    /// Lowercased keys in deterministic order.
    pub fn normalized(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.labels.values().cloned().collect()
    }

    /// Comma-separated labels for prompt interpolation.
    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join(", ")
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(labels: Vec<String>) -> Self {
        let mut set = Self::new();
        for label in &labels {
            set.insert(label);
        }
        set
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.labels.into_values().collect()
    }
}

const PYTHON_FAMILY: &[&str] = &["python"];
const ML_FAMILY: &[&str] = &[
    "machine learning",
    "deep learning",
    "tensorflow",
    "pytorch",
    "scikit-learn",
];
const CLOUD_FAMILY: &[&str] = &["aws", "azure", "gcp"];
const DATA_FAMILY: &[&str] = &[
    "data analysis",
    "data science",
    "pandas",
    "sql",
    "tableau",
    "power bi",
    "excel",
];

const MAX_RECOMMENDATIONS: usize = 5;

/// Static learning suggestions for the skill families missing from `skills`.
pub fn baseline_recommendations(skills: &SkillSet) -> Vec<&'static str> {
    let has_any = |family: &[&str]| family.iter().any(|s| skills.contains(s));

    [
        (PYTHON_FAMILY, "Learn Python programming fundamentals"),
        (ML_FAMILY, "Explore Machine Learning concepts and tools"),
        (CLOUD_FAMILY, "Get familiar with cloud platforms (AWS, Azure, GCP)"),
        (DATA_FAMILY, "Develop data analysis and visualization skills"),
    ]
    .into_iter()
    .filter(|(family, _)| !has_any(*family))
    .map(|(_, recommendation)| recommendation)
    .take(MAX_RECOMMENDATIONS)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_dedup_keeps_first_spelling() {
        let mut set = SkillSet::new();
        set.insert("Rust");
        set.insert("rust");
        set.insert("  ");
        assert_eq!(set.to_vec(), vec!["Rust"]);
        assert!(set.contains("RUST"));
    }

    #[test]
    fn test_user_input_is_canonicalised() {
        let set = SkillSet::from_user_input(
            ["k8s", "python", "Kubernetes", "Rust"],
            &DEFAULT_VOCABULARY,
        );
        assert_eq!(set.to_vec(), vec!["Kubernetes", "Python", "Rust"]);
    }

    #[test]
    fn test_serde_as_plain_list() {
        let set: SkillSet = serde_json::from_str(r#"["SQL", "sql", "Docker"]"#).unwrap();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["Docker","SQL"]"#);
    }

    #[test]
    fn test_joined_for_prompts() {
        let set = SkillSet::from(vec!["Python".to_string(), "AWS".to_string()]);
        assert_eq!(set.joined(), "AWS, Python");
    }

    #[test]
    fn test_baseline_for_empty_set_lists_every_family() {
        let recs = baseline_recommendations(&SkillSet::new());
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0], "Learn Python programming fundamentals");
    }

    #[test]
    fn test_baseline_skips_covered_families() {
        let set = SkillSet::from(vec!["Python".to_string(), "AWS".to_string()]);
        assert_eq!(
            baseline_recommendations(&set),
            vec![
                "Explore Machine Learning concepts and tools",
                "Develop data analysis and visualization skills",
            ]
        );
    }
}
