//! Career Assistant: coaching chat, quick actions, roadmap, portfolio and fit assessment.
//!
//! Every feature reads the session's current skill set and career profile; none of them
//! writes the skill set except the explicit profile update.

use crate::adapters::truncate_chars;
use crate::skills::SkillSet;

pub mod career_fit;
pub mod chat;
pub mod handlers;
pub mod portfolio;
pub mod prompts;
pub mod roadmap;

pub const MAX_SKILLS_CHARS: usize = 1000;

/// Comma-separated skills for a prompt, bounded to `MAX_SKILLS_CHARS`.
pub(crate) fn skills_for_prompt(skills: &SkillSet) -> String {
    if skills.is_empty() {
        return "Not specified".to_string();
    }
    truncate_chars(&skills.joined(), MAX_SKILLS_CHARS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_for_prompt() {
        assert_eq!(skills_for_prompt(&SkillSet::new()), "Not specified");

        let many: Vec<String> = (0..400).map(|i| format!("Skill{i}")).collect();
        let text = skills_for_prompt(&SkillSet::from(many));
        assert_eq!(text.chars().count(), MAX_SKILLS_CHARS);
    }
}
