use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::market::JobMarketDataset;
use crate::session::registry::SharedSession;
use crate::session::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Every model call goes through this seam. Production: `GeminiClient`.
    pub llm: Arc<dyn TextGenerator>,
    /// Loaded once at startup, read-only afterwards.
    pub market: Arc<JobMarketDataset>,
    pub sessions: SessionRegistry,
    pub config: Config,
}

impl AppState {
    /// Looks up a session or fails with 404.
    pub async fn session(&self, id: Uuid) -> Result<SharedSession, AppError> {
        self.sessions
            .get(id)
            .await
            .ok_or_else(|| AppError::session_not_found(id))
    }
}
