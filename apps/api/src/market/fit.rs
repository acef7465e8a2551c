use std::collections::BTreeSet;

use serde::Serialize;

use super::dataset::JobMarketDataset;
use crate::skills::SkillSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FitLevel {
    #[serde(rename = "No skills")]
    NoSkills,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Fair,
    Good,
    Excellent,
}

impl FitLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => FitLevel::Excellent,
            60..=79 => FitLevel::Good,
            40..=59 => FitLevel::Fair,
            _ => FitLevel::NeedsImprovement,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitLevel::NoSkills => "No skills",
            FitLevel::NeedsImprovement => "Needs Improvement",
            FitLevel::Fair => "Fair",
            FitLevel::Good => "Good",
            FitLevel::Excellent => "Excellent",
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            FitLevel::NoSkills => &["Start by learning basic programming skills"],
            FitLevel::NeedsImprovement => &[
                "Start with Python programming",
                "Learn basic data analysis",
                "Explore cloud platforms",
            ],
            FitLevel::Fair => &[
                "Consider learning more in-demand skills",
                "Focus on Python, cloud platforms, or data analysis",
            ],
            FitLevel::Good => &[
                "Your skills have solid market demand",
                "Consider learning cloud technologies",
            ],
            FitLevel::Excellent => &[
                "Your skills are highly in demand!",
                "Consider specializing in emerging technologies",
            ],
        }
    }
}

/// Deterministic market fit of a skill set against the postings that ask for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerFit {
    /// 0..=100.
    pub score: u32,
    pub level: FitLevel,
    pub recommendations: Vec<String>,
    /// The user's skills that appear in the matching postings.
    pub matched_skills: Vec<String>,
    /// Distinct skills required across the matching postings.
    pub market_vocabulary_size: usize,
    pub matching_jobs: usize,
}

impl CareerFit {
    fn new(score: u32, level: FitLevel) -> Self {
        Self {
            score,
            level,
            recommendations: level.recommendations().iter().map(|s| s.to_string()).collect(),
            matched_skills: Vec::new(),
            market_vocabulary_size: 0,
            matching_jobs: 0,
        }
    }
}

/// `matched / vocabulary × 100`, rounded half away from zero and clamped to [0, 100].
pub(crate) fn fit_ratio(matched: usize, vocabulary: usize) -> u32 {
    if vocabulary == 0 {
        return 0;
    }
    let score = (matched as f64 / vocabulary as f64 * 100.0).round();
    score.clamp(0.0, 100.0) as u32
}

impl JobMarketDataset {
    /// Scores `skills` against the postings whose required skills intersect them.
    ///
    /// The vocabulary is the set of distinct skills across those postings; the score is the
    /// share of that vocabulary the user already has. An empty skill set scores 0.
    pub fn career_fit_score(&self, skills: &SkillSet) -> CareerFit {
        if skills.is_empty() {
            return CareerFit::new(0, FitLevel::NoSkills);
        }

        let matching = self.filter_by_skills(skills);
        let vocabulary: BTreeSet<&str> = matching
            .iter()
            .flat_map(|record| record.skills.normalized())
            .collect();

        let matched_skills: Vec<String> = skills
            .iter()
            .filter(|label| vocabulary.contains(label.to_lowercase().as_str()))
            .map(str::to_string)
            .collect();

        let score = fit_ratio(matched_skills.len(), vocabulary.len());
        let mut fit = CareerFit::new(score, FitLevel::from_score(score));
        fit.market_vocabulary_size = vocabulary.len();
        fit.matching_jobs = matching.len();
        fit.matched_skills = matched_skills;
        fit
    }
}
