//! Shared Session Store: the explicit per-user context every handler group reads and writes.
//!
//! A `SessionContext` holds at most one resume profile and one skill set. Every setter
//! overwrites; nothing is merged.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::adapters::{AnalysisEnvelope, Provenance};
use crate::models::chat::ChatMessage;
use crate::models::profile::{CareerProfile, ResumeProfile};
use crate::skills::SkillSet;

pub mod handlers;
pub mod registry;

pub use registry::SessionRegistry;

/// Oldest chat messages are dropped past this length.
pub const MAX_CHAT_MESSAGES: usize = 200;

/// Named slots for the last result of each feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    ResumeJobMatch,
    AtsReview,
    ResumeInsight,
    EnhancedSummary,
    MarketTrends,
    CareerFit,
    CareerFitAssessment,
    LearningRoadmap,
    PortfolioSuggestions,
}

/// Which page last wrote the session's skill set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillSource {
    Resume,
    CareerAssistant,
    JobMarket,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredAnalysis {
    pub source: Provenance,
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentSkills {
    pub skills: SkillSet,
    pub source: SkillSource,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    created_at: DateTime<Utc>,
    resume: Option<ResumeProfile>,
    skills: Option<CurrentSkills>,
    career_profile: CareerProfile,
    chat: Vec<ChatMessage>,
    analyses: BTreeMap<AnalysisKind, StoredAnalysis>,
}

/// Serializable snapshot returned by the session and export endpoints.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub resume_analyzed: bool,
    pub resume: Option<&'a ResumeProfile>,
    pub skills: Option<&'a CurrentSkills>,
    pub career_profile: &'a CareerProfile,
    pub chat_messages: usize,
    pub analyses: &'a BTreeMap<AnalysisKind, StoredAnalysis>,
}

impl SessionContext {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            resume: None,
            skills: None,
            career_profile: CareerProfile::default(),
            chat: Vec::new(),
            analyses: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    // ── resume ──────────────────────────────────────────────────────────────

    /// Replaces the resume profile and makes its skills the current skill set.
    pub fn set_resume(&mut self, profile: ResumeProfile) {
        self.set_skills(profile.extracted_skills.clone(), SkillSource::Resume);
        self.resume = Some(profile);
    }

    pub fn resume(&self) -> Option<&ResumeProfile> {
        self.resume.as_ref()
    }

    // ── skills ──────────────────────────────────────────────────────────────

    /// Last writer wins: the previous skill set is discarded, never merged.
    pub fn set_skills(&mut self, skills: SkillSet, source: SkillSource) {
        self.skills = Some(CurrentSkills {
            skills,
            source,
            updated_at: Utc::now(),
        });
    }

    pub fn skills(&self) -> Option<&CurrentSkills> {
        self.skills.as_ref()
    }

    /// The current skill set, or an empty one when nothing has been set.
    pub fn skill_set(&self) -> SkillSet {
        self.skills
            .as_ref()
            .map(|current| current.skills.clone())
            .unwrap_or_default()
    }

    /// Copies the resume's extracted skills into the current skill set.
    /// Returns `None` when no resume has been uploaded.
    pub fn load_skills_from_resume(&mut self) -> Option<&CurrentSkills> {
        let skills = self.resume.as_ref()?.extracted_skills.clone();
        self.set_skills(skills, SkillSource::Resume);
        self.skills.as_ref()
    }

    // ── career profile ──────────────────────────────────────────────────────

    pub fn career_profile(&self) -> &CareerProfile {
        &self.career_profile
    }

    pub fn set_career_profile(&mut self, profile: CareerProfile) {
        self.career_profile = profile;
    }

    // ── chat ────────────────────────────────────────────────────────────────

    pub fn push_chat(&mut self, message: ChatMessage) {
        if self.chat.len() >= MAX_CHAT_MESSAGES {
            let overflow = self.chat.len() + 1 - MAX_CHAT_MESSAGES;
            self.chat.drain(..overflow);
        }
        self.chat.push(message);
    }

    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    pub fn clear_chat(&mut self) {
        self.chat.clear();
    }

    /// Plain-text transcript for download.
    pub fn chat_transcript(&self, exported_at: DateTime<Utc>) -> String {
        let mut out = format!(
            "Career Assistant Chat Export - {}\n{}\n\n",
            exported_at.format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(50)
        );
        for message in &self.chat {
            out.push_str(&format!("{}: {}\n\n", message.role.label(), message.content));
        }
        out
    }

    // ── analyses ────────────────────────────────────────────────────────────

    /// Overwrites the slot for `kind` with the envelope's result and provenance.
    pub fn store_analysis<T: Serialize>(
        &mut self,
        kind: AnalysisKind,
        envelope: &AnalysisEnvelope<T>,
    ) -> Result<(), serde_json::Error> {
        let payload = serde_json::to_value(&envelope.result)?;
        self.analyses.insert(
            kind,
            StoredAnalysis {
                source: envelope.source,
                payload,
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    pub fn analysis(&self, kind: AnalysisKind) -> Option<&StoredAnalysis> {
        self.analyses.get(&kind)
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            session_id: self.id,
            created_at: self.created_at,
            resume_analyzed: self.resume.is_some(),
            resume: self.resume.as_ref(),
            skills: self.skills.as_ref(),
            career_profile: &self.career_profile,
            chat_messages: self.chat.len(),
            analyses: &self.analyses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::AdapterOutcome;
    use crate::document::DocumentFormat;
    use crate::models::profile::ExperienceLevel;

    fn skills(labels: &[&str]) -> SkillSet {
        SkillSet::from(labels.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    fn resume(labels: &[&str]) -> ResumeProfile {
        ResumeProfile {
            raw_text: labels.join(", "),
            extracted_skills: skills(labels),
            file_format: DocumentFormat::Docx,
            file_name: Some("cv.docx".to_string()),
            experience_years: None,
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = SessionContext::new(Uuid::new_v4());
        assert!(session.resume().is_none());
        assert!(session.skills().is_none());
        assert!(session.skill_set().is_empty());
        assert_eq!(session.career_profile().experience_level, ExperienceLevel::Mid);
    }

    #[test]
    fn test_skills_last_writer_wins() {
        let mut session = SessionContext::new(Uuid::new_v4());
        session.set_skills(skills(&["Python", "SQL"]), SkillSource::Resume);
        session.set_skills(skills(&["Rust"]), SkillSource::CareerAssistant);

        let current = session.skills().unwrap();
        assert_eq!(current.skills.to_vec(), vec!["Rust"]);
        assert_eq!(current.source, SkillSource::CareerAssistant);
    }

    #[test]
    fn test_new_resume_replaces_profile_and_skills() {
        let mut session = SessionContext::new(Uuid::new_v4());
        session.set_resume(resume(&["Python"]));
        session.set_skills(skills(&["Go"]), SkillSource::CareerAssistant);
        session.set_resume(resume(&["Docker"]));

        assert_eq!(session.resume().unwrap().raw_text, "Docker");
        assert_eq!(session.skill_set().to_vec(), vec!["Docker"]);
        assert_eq!(session.skills().unwrap().source, SkillSource::Resume);
    }

    #[test]
    fn test_load_skills_from_resume() {
        let mut session = SessionContext::new(Uuid::new_v4());
        assert!(session.load_skills_from_resume().is_none());

        session.set_resume(resume(&["AWS"]));
        session.set_skills(skills(&["Excel"]), SkillSource::CareerAssistant);
        let loaded = session.load_skills_from_resume().unwrap();
        assert_eq!(loaded.skills.to_vec(), vec!["AWS"]);
    }

    #[test]
    fn test_analysis_slot_is_overwritten() {
        let mut session = SessionContext::new(Uuid::new_v4());
        let first = AdapterOutcome::Parsed("first".to_string()).resolve(String::new);
        let second = AdapterOutcome::<String>::Fallback(crate::adapters::FallbackReason::Llm {
            error: "rate_limited".to_string(),
        })
        .resolve(|| "canned".to_string());

        session
            .store_analysis(AnalysisKind::EnhancedSummary, &first)
            .unwrap();
        session
            .store_analysis(AnalysisKind::EnhancedSummary, &second)
            .unwrap();

        let stored = session.analysis(AnalysisKind::EnhancedSummary).unwrap();
        assert_eq!(stored.payload, Value::String("canned".to_string()));
        assert_eq!(stored.source, Provenance::Fallback);
        assert!(session.analysis(AnalysisKind::AtsReview).is_none());
    }

    #[test]
    fn test_chat_transcript_and_clear() {
        let mut session = SessionContext::new(Uuid::new_v4());
        session.push_chat(ChatMessage::user("What next?"));
        session.push_chat(ChatMessage::assistant("Learn Kubernetes."));

        let exported_at = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let transcript = session.chat_transcript(exported_at);
        assert!(transcript.starts_with("Career Assistant Chat Export - 2024-05-01 10:00:00\n"));
        assert!(transcript.contains("You: What next?\n\nCareer Coach: Learn Kubernetes.\n\n"));

        session.clear_chat();
        assert!(session.chat().is_empty());
    }

    #[test]
    fn test_chat_keeps_most_recent_messages() {
        let mut session = SessionContext::new(Uuid::new_v4());
        for i in 0..MAX_CHAT_MESSAGES + 5 {
            session.push_chat(ChatMessage::user(format!("message {i}")));
        }
        assert_eq!(session.chat().len(), MAX_CHAT_MESSAGES);
        assert_eq!(session.chat()[0].content, "message 5");
        assert_eq!(
            session.chat()[MAX_CHAT_MESSAGES - 1].content,
            format!("message {}", MAX_CHAT_MESSAGES + 4)
        );
    }

    #[test]
    fn test_snapshot_serialises() {
        let mut session = SessionContext::new(Uuid::new_v4());
        session.set_resume(resume(&["Python"]));
        let value = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(value["resume_analyzed"], true);
        assert_eq!(value["skills"]["source"], "resume");
        assert_eq!(value["skills"]["skills"][0], "Python");
        assert_eq!(value["resume"]["file_format"], "DOCX");
    }
}
