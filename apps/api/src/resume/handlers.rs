//! Axum route handlers for the Resume Analysis API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::ats::{review_ats, AtsReview};
use super::insight::{analyze_resume, ResumeInsight};
use super::job_match::{analyze_resume_vs_job, ResumeJobMatch};
use super::linkedin_search_url;
use super::summary::{
    enhanced_summary, job_description_from_url, ENHANCED_SUMMARY, JOB_DESCRIPTION_FROM_URL,
};
use crate::adapters::AnalysisEnvelope;
use crate::document::{detect_experience_years, extract_text, DocumentFormat};
use crate::errors::AppError;
use crate::models::profile::ResumeProfile;
use crate::session::{AnalysisKind, SessionContext};
use crate::skills::{baseline_recommendations, extract_skills, SkillSet, DEFAULT_VOCABULARY};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";
const NO_SKILLS_WARNING: &str = "No skills detected. Try another resume or adjust file format.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub file_format: DocumentFormat,
    pub file_name: Option<String>,
    pub text_length: usize,
    pub skills: SkillSet,
    pub skill_count: usize,
    pub experience_years: Option<u32>,
    pub recommendations: Vec<&'static str>,
    pub linkedin_search_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct JobMatchRequest {
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractJobDescriptionRequest {
    pub url: String,
}

struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
        return Ok(Upload {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(AppError::Validation(format!(
        "Multipart field '{UPLOAD_FIELD}' is required"
    )))
}

fn resume_text(session: &SessionContext) -> Result<String, AppError> {
    session
        .resume()
        .map(|profile| profile.raw_text.clone())
        .ok_or_else(|| {
            AppError::Validation("No resume has been uploaded for this session".to_string())
        })
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

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/resume
///
/// Multipart upload (`file`). Extracts text and skills and replaces the session's resume.
/// Empty extraction is terminal for the upload; the LLM is never called with empty input.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let session = state.session(id).await?;
    let upload = read_upload(multipart).await?;

    let format = DocumentFormat::detect(
        upload.file_name.as_deref(),
        upload.content_type.as_deref(),
        &upload.bytes,
    )?;

    let bytes = upload.bytes.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes, format))
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    if text.trim().is_empty() {
        return Err(AppError::EmptyExtractedText);
    }

    let skills = extract_skills(&text, &DEFAULT_VOCABULARY);
    let experience_years = detect_experience_years(&text);
    info!(
        session = %id,
        format = ?format,
        skills = skills.len(),
        "Resume parsed"
    );

    let response = ResumeUploadResponse {
        file_format: format,
        file_name: upload.file_name.clone(),
        text_length: text.chars().count(),
        skill_count: skills.len(),
        experience_years,
        recommendations: baseline_recommendations(&skills),
        linkedin_search_url: linkedin_search_url(&skills),
        warning: skills.is_empty().then_some(NO_SKILLS_WARNING),
        skills: skills.clone(),
    };

    session.lock().await.set_resume(ResumeProfile {
        raw_text: text,
        extracted_skills: skills,
        file_format: format,
        file_name: upload.file_name,
        experience_years,
        uploaded_at: Utc::now(),
    });

    Ok(Json(response))
}

/// POST /api/v1/sessions/:id/resume/match
pub async fn handle_job_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<JobMatchRequest>,
) -> Result<Json<AnalysisEnvelope<ResumeJobMatch>>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let session = state.session(id).await?;
    let mut session = session.lock().await;
    let resume = resume_text(&session)?;

    let envelope = analyze_resume_vs_job(state.llm.as_ref(), &resume, &request.job_description)
        .await
        .into_envelope();
    store(&mut session, AnalysisKind::ResumeJobMatch, &envelope)?;
    Ok(Json(envelope))
}

/// POST /api/v1/sessions/:id/resume/ats
pub async fn handle_ats_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisEnvelope<AtsReview>>, AppError> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;
    let resume = resume_text(&session)?;

    let envelope = review_ats(state.llm.as_ref(), &resume).await.into_envelope();
    store(&mut session, AnalysisKind::AtsReview, &envelope)?;
    Ok(Json(envelope))
}

/// POST /api/v1/sessions/:id/resume/insight
pub async fn handle_resume_insight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisEnvelope<ResumeInsight>>, AppError> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;
    let resume = resume_text(&session)?;

    let envelope = analyze_resume(state.llm.as_ref(), &resume, state.config.chunk_size)
        .await
        .into_envelope();
    store(&mut session, AnalysisKind::ResumeInsight, &envelope)?;
    Ok(Json(envelope))
}

/// POST /api/v1/sessions/:id/resume/summary
pub async fn handle_enhanced_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisEnvelope<String>>, AppError> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;
    let resume = resume_text(&session)?;

    let envelope = enhanced_summary(state.llm.as_ref(), &resume)
        .await
        .into_text_envelope(&ENHANCED_SUMMARY);
    store(&mut session, AnalysisKind::EnhancedSummary, &envelope)?;
    Ok(Json(envelope))
}

/// POST /api/v1/job-description/extract
///
/// Asks the model for the job description behind a posting URL. Session-free.
pub async fn handle_extract_job_description(
    State(state): State<AppState>,
    Json(request): Json<ExtractJobDescriptionRequest>,
) -> Result<Json<AnalysisEnvelope<String>>, AppError> {
    let url = Url::parse(request.url.trim())
        .map_err(|e| AppError::Validation(format!("Invalid job posting URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Validation(
            "Job posting URL must use http or https".to_string(),
        ));
    }

    let envelope = job_description_from_url(state.llm.as_ref(), url.as_str())
        .await
        .into_text_envelope(&JOB_DESCRIPTION_FROM_URL);
    Ok(Json(envelope))
}
