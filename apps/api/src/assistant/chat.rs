//! Conversational career coaching and the canned quick-action questions.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::prompts::CAREER_COACH_PROMPT_TEMPLATE;
use super::skills_for_prompt;
use crate::adapters::{run_text, truncate_chars, AdapterOutcome, TextFeature};
use crate::llm_client::prompts::COACH_TONE_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::models::profile::CareerProfile;
use crate::skills::SkillSet;

pub const MAX_QUERY_CHARS: usize = 2000;
pub const MAX_GOALS_CHARS: usize = 500;

pub const CAREER_CHAT: TextFeature = TextFeature {
    name: "career_chat",
    fallback: "I'm sorry, I'm having trouble providing career advice right now. Please try again later.",
};

/// One-click questions offered next to the chat box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickAction {
    RoleRecommendations,
    LearningPath,
    InterviewPrep,
    PortfolioIdeas,
    SalaryNegotiation,
    CareerRoadmap,
    CareerFitTest,
    LearningRoadmap,
    PortfolioGenerator,
}

impl QuickAction {
    pub const ALL: [QuickAction; 9] = [
        QuickAction::RoleRecommendations,
        QuickAction::LearningPath,
        QuickAction::InterviewPrep,
        QuickAction::PortfolioIdeas,
        QuickAction::SalaryNegotiation,
        QuickAction::CareerRoadmap,
        QuickAction::CareerFitTest,
        QuickAction::LearningRoadmap,
        QuickAction::PortfolioGenerator,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            QuickAction::RoleRecommendations => "role-recommendations",
            QuickAction::LearningPath => "learning-path",
            QuickAction::InterviewPrep => "interview-prep",
            QuickAction::PortfolioIdeas => "portfolio-ideas",
            QuickAction::SalaryNegotiation => "salary-negotiation",
            QuickAction::CareerRoadmap => "career-roadmap",
            QuickAction::CareerFitTest => "career-fit-test",
            QuickAction::LearningRoadmap => "learning-roadmap",
            QuickAction::PortfolioGenerator => "portfolio-generator",
        }
    }

    /// The user message the action sends on the user's behalf.
    pub fn question(&self) -> &'static str {
        match self {
            QuickAction::RoleRecommendations => {
                "What roles would be good for someone with my skills?"
            }
            QuickAction::LearningPath => "What should I learn next to advance my career?",
            QuickAction::InterviewPrep => "How should I prepare for technical interviews?",
            QuickAction::PortfolioIdeas => "What projects should I build for my portfolio?",
            QuickAction::SalaryNegotiation => "How should I approach salary negotiations?",
            QuickAction::CareerRoadmap => "Create a career roadmap for me",
            QuickAction::CareerFitTest => {
                "Rate my skills against trending roles and give me a career fit score"
            }
            QuickAction::LearningRoadmap => {
                "Generate a detailed learning roadmap with courses and resources"
            }
            QuickAction::PortfolioGenerator => {
                "Suggest specific GitHub project ideas based on my chosen role"
            }
        }
    }
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for QuickAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        QuickAction::ALL
            .into_iter()
            .find(|action| action.slug() == wanted)
            .ok_or_else(|| format!("Unknown quick action '{s}'"))
    }
}

pub fn build_prompt(skills: &SkillSet, profile: &CareerProfile, query: &str) -> String {
    let prompt = CAREER_COACH_PROMPT_TEMPLATE
        .replace("{user_skills}", &skills_for_prompt(skills))
        .replace("{experience_level}", profile.experience_level.as_str())
        .replace(
            "{career_goals}",
            truncate_chars(profile.goals_or_default(), MAX_GOALS_CHARS),
        )
        .replace("{user_query}", truncate_chars(query.trim(), MAX_QUERY_CHARS));
    format!("{prompt}\n{COACH_TONE_INSTRUCTION}")
}

pub async fn career_chat(
    llm: &dyn TextGenerator,
    skills: &SkillSet,
    profile: &CareerProfile,
    query: &str,
) -> AdapterOutcome<String> {
    let prompt = build_prompt(skills, profile, query);
    run_text(llm, &CAREER_CHAT, &prompt, &llm.default_config()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::Provenance;
    use crate::llm_client::testing::{FailureKind, ScriptedGenerator};
    use crate::models::profile::ExperienceLevel;

    #[test]
    fn test_quick_action_slugs_round_trip() {
        for action in QuickAction::ALL {
            assert_eq!(action.slug().parse::<QuickAction>().unwrap(), action);
        }
        assert_eq!(
            "Interview_Prep".parse::<QuickAction>().unwrap(),
            QuickAction::InterviewPrep
        );
        assert!("fortune-telling".parse::<QuickAction>().is_err());
    }

    #[test]
    fn test_prompt_carries_context() {
        let skills = SkillSet::from(vec!["Python".to_string(), "SQL".to_string()]);
        let profile = CareerProfile {
            experience_level: ExperienceLevel::Senior,
            career_goals: "  ".to_string(),
        };
        let prompt = build_prompt(&skills, &profile, "What next?");
        assert!(prompt.contains("- Skills: Python, SQL\n"));
        assert!(prompt.contains("- Experience Level: Senior\n"));
        assert!(prompt.contains("- Career Goals: Career advancement\n"));
        assert!(prompt.contains("User Query: What next?\n"));
    }

    #[test]
    fn test_prompt_without_skills() {
        let prompt = build_prompt(&SkillSet::new(), &CareerProfile::default(), "Hi");
        assert!(prompt.contains("- Skills: Not specified\n"));
    }

    #[tokio::test]
    async fn test_chat_fallback_text() {
        let llm = ScriptedGenerator::failing(FailureKind::MissingCredential);
        let envelope = career_chat(&llm, &SkillSet::new(), &CareerProfile::default(), "Hi")
            .await
            .into_text_envelope(&CAREER_CHAT);
        assert_eq!(envelope.source, Provenance::Fallback);
        assert_eq!(
            envelope.result,
            "I'm sorry, I'm having trouble providing career advice right now. Please try again later."
        );
    }

    #[tokio::test]
    async fn test_transport_and_api_failures_use_fallback_text() {
        for kind in [FailureKind::Network, FailureKind::Api, FailureKind::Decode] {
            let llm = ScriptedGenerator::failing(kind);
            let envelope = career_chat(&llm, &SkillSet::new(), &CareerProfile::default(), "Hi")
                .await
                .into_text_envelope(&CAREER_CHAT);
            assert_eq!(envelope.source, Provenance::Fallback, "{kind:?}");
            assert_eq!(envelope.result, CAREER_CHAT.fallback);
        }
    }
}
