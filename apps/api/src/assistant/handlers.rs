//! Axum route handlers for the Career Assistant API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::career_fit::{assess_career_fit, CareerFitAssessment};
use super::chat::{career_chat, QuickAction, CAREER_CHAT};
use super::portfolio::{portfolio_suggestions, PortfolioSuggestions};
use super::roadmap::{learning_roadmap, LearningRoadmap};
use crate::adapters::AnalysisEnvelope;
use crate::errors::AppError;
use crate::market::fit::CareerFit;
use crate::models::chat::ChatMessage;
use crate::models::profile::{CareerProfile, ExperienceLevel};
use crate::session::{AnalysisKind, CurrentSkills, SessionContext, SkillSource};
use crate::skills::{SkillSet, DEFAULT_VOCABULARY};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Partial update: absent fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub skills: Option<Vec<String>>,
    pub experience_level: Option<ExperienceLevel>,
    pub career_goals: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub skills: Option<CurrentSkills>,
    pub career_profile: CareerProfile,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<QuickAction>,
    #[serde(flatten)]
    pub reply: AnalysisEnvelope<String>,
    pub message_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct PortfolioRequest {
    pub target_role: String,
}

fn profile_response(session: &SessionContext) -> ProfileResponse {
    ProfileResponse {
        skills: session.skills().cloned(),
        career_profile: session.career_profile().clone(),
    }
}

fn store<T: Serialize>(
    session: &mut SessionContext,
    kind: AnalysisKind,
    envelope: &AnalysisEnvelope<T>,
) -> Result<(), AppError> {
    session
        .store_analysis(kind, envelope)
        .map_err(|e| AppError::Internal(e.into()))
}

/// Records the question, asks the coach, records the reply.
async fn converse(
    state: &AppState,
    id: Uuid,
    question: String,
    action: Option<QuickAction>,
) -> Result<ChatResponse, AppError> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;

    session.push_chat(ChatMessage::user(question.clone()));
    let skills = session.skill_set();
    let reply = career_chat(
        state.llm.as_ref(),
        &skills,
        session.career_profile(),
        &question,
    )
    .await
    .into_text_envelope(&CAREER_CHAT);
    session.push_chat(ChatMessage::assistant(reply.result.clone()));

    Ok(ChatResponse {
        question,
        action,
        reply,
        message_count: session.chat().len(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Profile
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/sessions/:id/profile
///
/// Entered skills replace the session's skill set (last writer wins).
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;

    if let Some(skills) = request.skills {
        let skills = SkillSet::from_user_input(skills, &DEFAULT_VOCABULARY);
        session.set_skills(skills, SkillSource::CareerAssistant);
    }

    let mut profile = session.career_profile().clone();
    if let Some(level) = request.experience_level {
        profile.experience_level = level;
    }
    if let Some(goals) = request.career_goals {
        profile.career_goals = goals.trim().to_string();
    }
    session.set_career_profile(profile);

    Ok(Json(profile_response(&session)))
}

/// POST /api/v1/sessions/:id/profile/load-resume
pub async fn handle_load_resume_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;

    if session.load_skills_from_resume().is_none() {
        return Err(AppError::Validation(
            "No resume has been uploaded for this session".to_string(),
        ));
    }
    Ok(Json(profile_response(&session)))
}

// ────────────────────────────────────────────────────────────────────────────
// Chat
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }
    let response = converse(&state, id, message.to_string(), None).await?;
    Ok(Json(response))
}

/// POST /api/v1/sessions/:id/chat/quick/:action
pub async fn handle_quick_action(
    State(state): State<AppState>,
    Path((id, action)): Path<(Uuid, String)>,
) -> Result<Json<ChatResponse>, AppError> {
    let action: QuickAction = action.parse().map_err(AppError::Validation)?;
    info!(session = %id, %action, "Quick action");
    let response = converse(&state, id, action.question().to_string(), Some(action)).await?;
    Ok(Json(response))
}

/// GET /api/v1/sessions/:id/chat/export
///
/// Plain-text transcript as a download.
pub async fn handle_export_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session(id).await?;
    let session = session.lock().await;

    let now = Utc::now();
    let transcript = session.chat_transcript(now);
    let disposition = format!(
        "attachment; filename=\"career_chat_{}.txt\"",
        now.format("%Y%m%d_%H%M%S")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        transcript,
    ))
}

/// DELETE /api/v1/sessions/:id/chat
pub async fn handle_clear_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let session = state.session(id).await?;
    session.lock().await.clear_chat();
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Structured features
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/career-fit
///
/// Deterministic dataset score for the session's current skills.
pub async fn handle_career_fit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisEnvelope<CareerFit>>, AppError> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;

    let fit = state.market.career_fit_score(&session.skill_set());
    let envelope = AnalysisEnvelope::from_dataset(fit);
    store(&mut session, AnalysisKind::CareerFit, &envelope)?;
    Ok(Json(envelope))
}

/// POST /api/v1/sessions/:id/career-fit/assessment
pub async fn handle_career_fit_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisEnvelope<CareerFitAssessment>>, AppError> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;

    let skills = session.skill_set();
    let level = session.career_profile().experience_level;
    let envelope = assess_career_fit(state.llm.as_ref(), &skills, level)
        .await
        .into_envelope();
    store(&mut session, AnalysisKind::CareerFitAssessment, &envelope)?;
    Ok(Json(envelope))
}

/// POST /api/v1/sessions/:id/roadmap
///
/// Uses the career goals from the session profile.
pub async fn handle_learning_roadmap(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisEnvelope<LearningRoadmap>>, AppError> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;

    let skills = session.skill_set();
    let goals = session.career_profile().goals_or_default().to_string();
    let envelope = learning_roadmap(state.llm.as_ref(), &skills, &goals)
        .await
        .into_envelope();
    store(&mut session, AnalysisKind::LearningRoadmap, &envelope)?;
    Ok(Json(envelope))
}

/// POST /api/v1/sessions/:id/portfolio
pub async fn handle_portfolio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PortfolioRequest>,
) -> Result<Json<AnalysisEnvelope<PortfolioSuggestions>>, AppError> {
    if request.target_role.trim().is_empty() {
        return Err(AppError::Validation(
            "target_role cannot be empty".to_string(),
        ));
    }

    let session = state.session(id).await?;
    let mut session = session.lock().await;

    let skills = session.skill_set();
    let envelope = portfolio_suggestions(state.llm.as_ref(), &skills, &request.target_role)
        .await
        .into_envelope();
    store(&mut session, AnalysisKind::PortfolioSuggestions, &envelope)?;
    Ok(Json(envelope))
}
