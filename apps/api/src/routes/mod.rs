pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::market::handlers as market;
use crate::resume::handlers as resume;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/llm/status", get(health::llm_status_handler))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_end_session),
        )
        .route(
            "/api/v1/sessions/:id/export",
            get(session::handle_export_profile),
        )
        // Resume analysis
        .route(
            "/api/v1/sessions/:id/resume",
            post(resume::handle_upload_resume),
        )
        .route(
            "/api/v1/sessions/:id/resume/match",
            post(resume::handle_job_match),
        )
        .route(
            "/api/v1/sessions/:id/resume/ats",
            post(resume::handle_ats_review),
        )
        .route(
            "/api/v1/sessions/:id/resume/insight",
            post(resume::handle_resume_insight),
        )
        .route(
            "/api/v1/sessions/:id/resume/summary",
            post(resume::handle_enhanced_summary),
        )
        .route(
            "/api/v1/job-description/extract",
            post(resume::handle_extract_job_description),
        )
        // Job market
        .route("/api/v1/market/overview", get(market::handle_overview))
        .route("/api/v1/market/salaries", get(market::handle_salaries))
        .route("/api/v1/market/skills", get(market::handle_skill_demand))
        .route("/api/v1/market/industries", get(market::handle_industries))
        .route("/api/v1/market/regions", get(market::handle_regions))
        .route("/api/v1/market/titles", get(market::handle_titles))
        .route(
            "/api/v1/sessions/:id/market/skills",
            put(market::handle_set_market_skills),
        )
        .route(
            "/api/v1/sessions/:id/market/matches",
            get(market::handle_matches),
        )
        .route(
            "/api/v1/sessions/:id/market/certifications",
            get(market::handle_certifications),
        )
        .route(
            "/api/v1/sessions/:id/market/trends",
            post(market::handle_market_trends),
        )
        // Career assistant
        .route(
            "/api/v1/sessions/:id/profile",
            put(assistant::handle_update_profile),
        )
        .route(
            "/api/v1/sessions/:id/profile/load-resume",
            post(assistant::handle_load_resume_skills),
        )
        .route(
            "/api/v1/sessions/:id/chat",
            post(assistant::handle_chat).delete(assistant::handle_clear_chat),
        )
        .route(
            "/api/v1/sessions/:id/chat/quick/:action",
            post(assistant::handle_quick_action),
        )
        .route(
            "/api/v1/sessions/:id/chat/export",
            get(assistant::handle_export_chat),
        )
        .route(
            "/api/v1/sessions/:id/career-fit",
            get(assistant::handle_career_fit),
        )
        .route(
            "/api/v1/sessions/:id/career-fit/assessment",
            post(assistant::handle_career_fit_assessment),
        )
        .route(
            "/api/v1/sessions/:id/roadmap",
            post(assistant::handle_learning_roadmap),
        )
        .route(
            "/api/v1/sessions/:id/portfolio",
            post(assistant::handle_portfolio),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::document::docx::build_docx;
    use crate::document::pdf::build_pdf;
    use crate::llm_client::testing::{FailureKind, ScriptedGenerator};
    use crate::market::dataset::fixtures::sample;
    use crate::session::SessionRegistry;

    const BOUNDARY: &str = "skillgap-test-boundary";
    const DOCX_MIME: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    fn app(llm: ScriptedGenerator) -> Router {
        build_router(AppState {
            llm: Arc::new(llm),
            market: Arc::new(sample()),
            sessions: SessionRegistry::new(),
            config: Config::default(),
        })
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn upload_request(session_id: &str, filename: &str, mime: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: {mime}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(format!("/api/v1/sessions/{session_id}/resume"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn create_session(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(empty_request("POST", "/api/v1/sessions"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["session_id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    async fn upload_sample_resume(app: &Router, session_id: &str) -> Response {
        let docx = build_docx(&["Jane Doe", "Proficient in Python, SQL, and Docker"]);
        app.clone()
            .oneshot(upload_request(session_id, "cv.docx", DOCX_MIME, &docx))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(ScriptedGenerator::replying("ok"))
            .oneshot(empty_request("GET", "/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["service"], "skillgap-api");
        assert_eq!(body["job_records"], 5);
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let response = app(ScriptedGenerator::replying("ok"))
            .oneshot(empty_request(
                "GET",
                &format!("/api/v1/sessions/{}", Uuid::new_v4()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_docx_upload_to_career_fit() {
        let app = app(ScriptedGenerator::replying("ok"));
        let id = create_session(&app).await;

        let response = upload_sample_resume(&app, &id).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["file_format"], "DOCX");
        assert_eq!(body["skills"], json!(["Docker", "Python", "SQL"]));

        let response = app
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/api/v1/sessions/{id}/market/matches"),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["total_matches"], 4);

        let response = app
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/api/v1/sessions/{id}/career-fit"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["source"], "dataset");
        assert_eq!(body["result"]["score"], 38);
        assert_eq!(body["result"]["market_vocabulary_size"], 8);
    }

    #[tokio::test]
    async fn test_rate_limited_match_returns_fallback_envelope() {
        let app = app(ScriptedGenerator::failing(FailureKind::RateLimited));
        let id = create_session(&app).await;
        assert_eq!(
            upload_sample_resume(&app, &id).await.status(),
            StatusCode::OK
        );

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/sessions/{id}/resume/match"),
                json!({ "job_description": "Senior Python engineer" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["fallback_reason"]["error"], "rate_limited");
        assert_eq!(
            body["result"],
            json!({
                "relevance_score": 0.0,
                "ats_score": 0.0,
                "matched_skills": [],
                "missing_skills": [],
                "formatting_feedback": "Analysis could not be completed due to technical issues",
                "summary": "Analysis unavailable - please try again"
            })
        );

        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/api/v1/sessions/{id}")))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["analyses"]["resume_job_match"]["source"], "fallback");
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_422() {
        let app = app(ScriptedGenerator::replying("ok"));
        let id = create_session(&app).await;

        let response = app
            .clone()
            .oneshot(upload_request(&id, "cv.txt", "text/plain", b"Python and SQL"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FILE_FORMAT");
    }

    #[tokio::test]
    async fn test_empty_document_is_422() {
        let app = app(ScriptedGenerator::replying("ok"));
        let id = create_session(&app).await;

        let docx = build_docx(&[]);
        let response = app
            .clone()
            .oneshot(upload_request(&id, "blank.docx", DOCX_MIME, &docx))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "EMPTY_EXTRACTED_TEXT");
    }

    #[tokio::test]
    async fn test_pdf_upload_extracts_skills() {
        let app = app(ScriptedGenerator::replying("ok"));
        let id = create_session(&app).await;

        let pdf = build_pdf(&["Jane Doe", "Skills: Python, SQL and Docker"]);
        let response = app
            .clone()
            .oneshot(upload_request(&id, "cv.pdf", "application/pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["file_format"], "PDF");
        assert_eq!(body["skills"], json!(["Docker", "Python", "SQL"]));
    }

    #[tokio::test]
    async fn test_pdf_without_text_layer_is_422() {
        let app = app(ScriptedGenerator::replying("ok"));
        let id = create_session(&app).await;

        let pdf = build_pdf(&[]);
        let response = app
            .clone()
            .oneshot(upload_request(&id, "scan.pdf", "application/pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "EMPTY_EXTRACTED_TEXT");
    }

    #[tokio::test]
    async fn test_transport_failures_return_ats_fallback() {
        let cases = [
            (FailureKind::Network, "network_failure"),
            (FailureKind::Api, "api_error"),
            (FailureKind::Decode, "decode_error"),
        ];
        for (kind, label) in cases {
            let app = app(ScriptedGenerator::failing(kind));
            let id = create_session(&app).await;
            assert_eq!(
                upload_sample_resume(&app, &id).await.status(),
                StatusCode::OK
            );

            let response = app
                .clone()
                .oneshot(empty_request(
                    "POST",
                    &format!("/api/v1/sessions/{id}/resume/ats"),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{label}");
            let body = body_json(response).await;
            assert_eq!(body["source"], "fallback");
            assert_eq!(body["fallback_reason"]["error"], label);
            let unavailable = "Unable to analyze resume right now. Please try again later.";
            assert_eq!(
                body["result"],
                json!({
                    "ats_score": 0,
                    "keyword_relevance": unavailable,
                    "formatting_issues": [],
                    "improvements": [unavailable]
                })
            );
        }
    }

    #[tokio::test]
    async fn test_assistant_skills_replace_resume_skills() {
        let app = app(ScriptedGenerator::replying("Learn Kubernetes next."));
        let id = create_session(&app).await;
        upload_sample_resume(&app, &id).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/v1/sessions/{id}/profile"),
                json!({ "skills": ["k8s", "Go"], "experience_level": "Senior" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["skills"]["skills"], json!(["Go", "Kubernetes"]));
        assert_eq!(body["skills"]["source"], "career_assistant");
        assert_eq!(body["career_profile"]["experience_level"], "Senior");

        let response = app
            .clone()
            .oneshot(empty_request(
                "POST",
                &format!("/api/v1/sessions/{id}/chat/quick/interview-prep"),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["question"], "How should I prepare for technical interviews?");
        assert_eq!(body["source"], "model");
        assert_eq!(body["result"], "Learn Kubernetes next.");
        assert_eq!(body["message_count"], 2);
    }

    #[tokio::test]
    async fn test_chat_export_is_plain_text() {
        let app = app(ScriptedGenerator::replying("Build a portfolio."));
        let id = create_session(&app).await;
        app.clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/sessions/{id}/chat"),
                json!({ "message": "What next?" }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/api/v1/sessions/{id}/chat/export"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .starts_with("attachment; filename=\"career_chat_"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("You: What next?\n\nCareer Coach: Build a portfolio.\n\n"));
    }
}
