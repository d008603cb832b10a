use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::mood::{params_for_mood, CatalogParams};
use crate::spotify::{
    auth,
    playlist::{PlaylistAssembler, TrackSummary},
};
use crate::store::SavedPlaylist;

use super::{AppError, AppState};

// ── Status ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub authenticated: bool,
    pub weather_enabled: bool,
    pub uptime_secs: u64,
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "moodtune",
        authenticated: state.is_authenticated().await,
        weather_enabled: state.engine.weather_enabled(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

// ── OAuth flow ───────────────────────────────────────────────────────────

pub async fn login(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let sp = state.spotify.lock().await;
    let url = auth::authorize_url(&sp)?;
    Ok(Redirect::temporary(&url))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    if let Some(denied) = query.error {
        return Redirect::to(&format!("/?error={}", urlencoding::encode(&denied)));
    }
    let Some(code) = query.code else {
        return Redirect::to("/?error=missing_code");
    };

    let sp = state.spotify.lock().await;
    match auth::complete_auth(
        &sp,
        &code,
        query.state.as_deref().unwrap_or_default(),
        state.store.as_ref(),
    )
    .await
    {
        Ok(()) => Redirect::to("/"),
        Err(e) => {
            error!("OAuth callback failed: {e:?}");
            Redirect::to(&format!("/?error={}", urlencoding::encode(&e.to_string())))
        }
    }
}

// ── Mood inference ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub text: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoodResponse {
    pub moods: Vec<String>,
    pub primary: String,
    pub params: CatalogParams,
}

pub async fn infer_moods(
    State(state): State<AppState>,
    Json(request): Json<MoodRequest>,
) -> Json<MoodResponse> {
    let moods = state
        .engine
        .infer_moods(request.text.as_deref(), request.city.as_deref())
        .await;
    // The time signal is unconditional, so moods is never empty
    let primary = moods.first().cloned().unwrap_or_else(|| "Neutral".into());
    let params = params_for_mood(&primary);
    Json(MoodResponse {
        moods,
        primary,
        params,
    })
}

// ── Playlist generation ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub text: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub playlist_id: String,
    pub playlist_url: String,
    pub playlist_name: String,
    pub suggested_moods: Vec<String>,
    pub tracks: Vec<TrackSummary>,
}

pub async fn generate_playlist(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if !state.is_authenticated().await {
        return Err(AppError::Unauthenticated);
    }

    let moods = state
        .engine
        .infer_moods(request.text.as_deref(), request.city.as_deref())
        .await;
    let primary = moods.first().cloned().unwrap_or_else(|| "Neutral".into());
    let params = params_for_mood(&primary);
    info!(mood = %primary, genres = ?params.seed_genres, "Generating playlist");

    let assembler = PlaylistAssembler::new(state.spotify.clone());
    let tracks = assembler.tracks_for_mood(&primary, &params).await?;
    let track_ids: Vec<String> = tracks.iter().filter_map(|t| t.id.clone()).collect();

    let playlist = assembler.create_mood_playlist(&primary, &track_ids).await?;

    let entry = SavedPlaylist {
        mood: primary.clone(),
        name: playlist.name.clone(),
        playlist_id: playlist.id.clone(),
        spotify_url: playlist.url.clone(),
        track_count: track_ids.len(),
        saved_at: Utc::now(),
    };
    state.store.append_playlist(&entry).await.ok();

    Ok(Json(GenerateResponse {
        playlist_id: playlist.id,
        playlist_url: playlist.url,
        playlist_name: playlist.name,
        suggested_moods: moods,
        tracks,
    }))
}

// ── Saved playlists ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub mood: String,
    pub track_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub status: &'static str,
    pub playlist_id: String,
    pub spotify_url: String,
}

pub async fn save_playlist(
    State(state): State<AppState>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    if !state.is_authenticated().await {
        return Err(AppError::Unauthenticated);
    }
    if request.track_ids.is_empty() {
        return Err(AppError::BadRequest("track_ids must not be empty".into()));
    }

    let assembler = PlaylistAssembler::new(state.spotify.clone());
    let playlist = assembler
        .create_mood_playlist(&request.mood, &request.track_ids)
        .await?;

    let entry = SavedPlaylist {
        mood: request.mood,
        name: playlist.name,
        playlist_id: playlist.id.clone(),
        spotify_url: playlist.url.clone(),
        track_count: request.track_ids.len(),
        saved_at: Utc::now(),
    };
    state.store.append_playlist(&entry).await.ok();

    Ok(Json(SaveResponse {
        status: "success",
        playlist_id: playlist.id,
        spotify_url: playlist.url,
    }))
}

pub async fn saved_playlists(
    State(state): State<AppState>,
) -> Result<Json<Vec<SavedPlaylist>>, AppError> {
    let playlists = state
        .store
        .saved_playlists()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(playlists))
}
