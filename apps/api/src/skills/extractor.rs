use super::vocabulary::SkillVocabulary;
use super::SkillSet;

/// Scans `text` for every vocabulary term and returns the canonical labels found.
///
/// Matching is case-insensitive and requires a non-alphanumeric character (or the text edge)
/// on both sides of the term, so "R" does not match inside "React" and "SQL" does not match
/// inside "MySQL". Result order depends only on the labels, never on the text.
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
    let mut skills = SkillSet::new();

    for term in vocabulary.terms() {
        if term.is_mentioned_in(text) {
            skills.insert(&term.label);
        }
    }

    skills
}
