use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

const TOKEN_KEY: &str = "moodtune:spotify_token";
const PLAYLISTS_KEY: &str = "moodtune:saved_playlists";
const TOKEN_TTL_SECS: u64 = 3600 * 24;

/// One playlist the user kept, appended per save, listed in save order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlaylist {
    pub mood: String,
    pub name: String,
    pub playlist_id: String,
    pub spotify_url: String,
    pub track_count: usize,
    pub saved_at: DateTime<Utc>,
}

/// Session-scoped persistence: the serialized Spotify token plus the
/// saved-playlist list. Created once at startup and injected; handlers
/// never touch process-wide mutable state directly.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load_token(&self) -> Result<Option<String>>;
    async fn store_token(&self, token_json: &str) -> Result<()>;
    async fn clear_token(&self) -> Result<()>;
    async fn append_playlist(&self, entry: &SavedPlaylist) -> Result<()>;
    async fn saved_playlists(&self) -> Result<Vec<SavedPlaylist>>;
}

/// Redis-backed store. Connection failures degrade to None/no-op instead
/// of failing the request; a dead Redis costs persistence, not uptime.
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    pub fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(RedisStore { client })
    }

    pub async fn ping(&self) -> bool {
        match self.client.get_multiplexed_async_connection().await {
            Ok(mut conn) => {
                let result: std::result::Result<String, _> =
                    redis::cmd("PING").query_async(&mut conn).await;
                result.is_ok()
            }
            Err(_) => false,
        }
    }
}

#[async_trait]
impl SessionStore for RedisStore {
    async fn load_token(&self) -> Result<Option<String>> {
        match self.client.get_multiplexed_async_connection().await {
            Ok(mut conn) => {
                let val: Option<String> = conn.get(TOKEN_KEY).await.unwrap_or(None);
                Ok(val)
            }
            Err(_) => Ok(None),
        }
    }

    async fn store_token(&self, token_json: &str) -> Result<()> {
        if let Ok(mut conn) = self.client.get_multiplexed_async_connection().await {
            let _: std::result::Result<(), _> =
                conn.set_ex(TOKEN_KEY, token_json, TOKEN_TTL_SECS).await;
        }
        Ok(())
    }

    async fn clear_token(&self) -> Result<()> {
        if let Ok(mut conn) = self.client.get_multiplexed_async_connection().await {
            let _: std::result::Result<(), _> = conn.del(TOKEN_KEY).await;
        }
        Ok(())
    }

    async fn append_playlist(&self, entry: &SavedPlaylist) -> Result<()> {
        let json = serde_json::to_string(entry)?;
        if let Ok(mut conn) = self.client.get_multiplexed_async_connection().await {
            let _: std::result::Result<(), _> = conn.rpush(PLAYLISTS_KEY, json).await;
        }
        Ok(())
    }

    async fn saved_playlists(&self) -> Result<Vec<SavedPlaylist>> {
        match self.client.get_multiplexed_async_connection().await {
            Ok(mut conn) => {
                let raw: Vec<String> = conn.lrange(PLAYLISTS_KEY, 0, -1).await.unwrap_or_default();
                Ok(raw
                    .iter()
                    .filter_map(|s| serde_json::from_str(s).ok())
                    .collect())
            }
            Err(_) => Ok(Vec::new()),
        }
    }
}

/// In-process fallback used when Redis is unreachable at startup.
#[derive(Default)]
pub struct MemoryStore {
    token: RwLock<Option<String>>,
    playlists: RwLock<Vec<SavedPlaylist>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load_token(&self) -> Result<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn store_token(&self, token_json: &str) -> Result<()> {
        *self.token.write().await = Some(token_json.to_string());
        Ok(())
    }

    async fn clear_token(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }

    async fn append_playlist(&self, entry: &SavedPlaylist) -> Result<()> {
        self.playlists.write().await.push(entry.clone());
        Ok(())
    }

    async fn saved_playlists(&self) -> Result<Vec<SavedPlaylist>> {
        Ok(self.playlists.read().await.clone())
    }
}
