mod config;
mod mood;
mod server;
mod spotify;
mod store;
#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    config::Config,
    mood::{weather::WeatherClient, MoodEngine},
    server::AppState,
    store::{MemoryStore, RedisStore, SessionStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    // ── Logging setup ────────────────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("moodtune=info,tower_http=info"));
    fmt().with_env_filter(filter).init();

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load()?;

    // ── Try Redis (optional — the app works without it) ──────────────────────
    let store: Arc<dyn SessionStore> = match RedisStore::new(&config.redis_url) {
        Ok(redis) if redis.ping().await => {
            info!("Redis connected at {}", config.redis_url);
            Arc::new(redis)
        }
        _ => {
            warn!("Redis not reachable — using in-memory session store");
            Arc::new(MemoryStore::new())
        }
    };

    // ── Mood engine ──────────────────────────────────────────────────────────
    let weather = match &config.weather_api_key {
        Some(key) => Some(WeatherClient::new(key)),
        None => {
            warn!("OPENWEATHER_API_KEY not set — weather signal disabled");
            None
        }
    };
    let engine = MoodEngine::new(weather);

    // ── Spotify client (restores a stored token when possible) ───────────────
    let (spotify, authenticated) = spotify::build_spotify_client(&config, store.as_ref()).await?;
    if authenticated {
        info!("Spotify session restored");
    } else {
        info!("No Spotify session — visit /login to authenticate");
    }

    // ── Serve ────────────────────────────────────────────────────────────────
    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config, engine, spotify, store);
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    info!("moodtune listening on {bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
