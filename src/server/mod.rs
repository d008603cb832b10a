use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::mood::MoodEngine;
use crate::spotify::SharedSpotify;
use crate::store::SessionStore;

mod routes;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<MoodEngine>,
    pub spotify: SharedSpotify,
    pub store: Arc<dyn SessionStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        config: Config,
        engine: MoodEngine,
        spotify: SharedSpotify,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        AppState {
            config: Arc::new(config),
            engine: Arc::new(engine),
            spotify,
            store,
            started_at: Instant::now(),
        }
    }

    /// Whether the shared client currently holds a token.
    pub async fn is_authenticated(&self) -> bool {
        let sp = self.spotify.lock().await;
        let token = sp.token.lock().await.unwrap();
        token.is_some()
    }
}

/// Request-level failures. Mood-signal errors never reach this layer;
/// they degrade to Neutral inside the engine.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not authenticated with Spotify")]
    Unauthenticated,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("spotify request failed: {0}")]
    Upstream(#[from] anyhow::Error),
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::status))
        .route("/login", get(routes::login))
        .route("/callback", get(routes::callback))
        .route("/api/moods", post(routes::infer_moods))
        .route("/api/generate-playlist", post(routes::generate_playlist))
        .route("/api/save-playlist", post(routes::save_playlist))
        .route("/api/saved-playlists", get(routes::saved_playlists))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
