use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::DocumentFormat;
use crate::skills::SkillSet;

/// Parsed resume held by a session. Replaced wholesale on every upload.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeProfile {
    pub raw_text: String,
    pub extracted_skills: SkillSet,
    pub file_format: DocumentFormat,
    pub file_name: Option<String>,
    /// Largest "N years of experience" claim found in the text.
    pub experience_years: Option<u32>,
    pub uploaded_at: DateTime<Utc>,
}

/// Seniority bands shared by the dataset and the career assistant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Lead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry",
            ExperienceLevel::Mid => "Mid",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Lead => "Lead",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    /// Accepts dataset codes (EN/MI/SE/EX) and the level names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let level = normalized
            .strip_suffix(" level")
            .or_else(|| normalized.strip_suffix("-level"))
            .unwrap_or(normalized.as_str());
        match level {
            "en" | "entry" | "junior" => Ok(ExperienceLevel::Entry),
            "mi" | "mid" | "intermediate" => Ok(ExperienceLevel::Mid),
            "se" | "senior" => Ok(ExperienceLevel::Senior),
            "ex" | "lead" | "executive" => Ok(ExperienceLevel::Lead),
            _ => Err(format!("unknown experience level '{s}'")),
        }
    }
}

impl TryFrom<String> for ExperienceLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExperienceLevel> for String {
    fn from(level: ExperienceLevel) -> Self {
        level.as_str().to_string()
    }
}

pub const DEFAULT_CAREER_GOALS: &str = "Career advancement";

/// What the career assistant knows about the user beyond their skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerProfile {
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub career_goals: String,
}

impl CareerProfile {
    /// Goals text for prompts; blank goals fall back to a generic aim.
    pub fn goals_or_default(&self) -> &str {
        let goals = self.career_goals.trim();
        if goals.is_empty() {
            DEFAULT_CAREER_GOALS
        } else {
            goals
        }
    }
}

impl Default for CareerProfile {
    fn default() -> Self {
        Self {
            experience_level: ExperienceLevel::Mid,
            career_goals: String::new(),
        }
    }
}
