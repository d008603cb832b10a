use anyhow::Result;
use rspotify::{
    clients::BaseClient, scopes, AuthCodeSpotify, Config as SpotifyConfig, Credentials, OAuth,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::Config;
use crate::store::SessionStore;

pub mod auth;
pub mod playlist;

pub type SharedSpotify = Arc<Mutex<AuthCodeSpotify>>;

/// Builds the Spotify client for the authorization-code web flow and
/// tries to restore a previously stored token. Returns the shared client
/// and whether it is already usable; when it isn't, the `/login` route
/// starts the interactive flow.
pub async fn build_spotify_client(
    config: &Config,
    store: &dyn SessionStore,
) -> Result<(SharedSpotify, bool)> {
    let creds = Credentials::new(&config.client_id, &config.client_secret);

    let scopes = scopes!(
        "playlist-modify-public",
        "playlist-modify-private",
        "user-read-private"
    );

    let oauth = OAuth {
        redirect_uri: config.redirect_uri.clone(),
        scopes,
        state: auth::generate_state(),
        ..Default::default()
    };

    let sp_config = SpotifyConfig {
        token_refreshing: true,
        ..Default::default()
    };

    let spotify = AuthCodeSpotify::with_config(creds, oauth, sp_config);

    // Try restoring a stored token
    if let Ok(Some(token_json)) = store.load_token().await {
        if let Ok(token) = serde_json::from_str::<rspotify::Token>(&token_json) {
            info!("Restored Spotify token from the session store");
            *spotify.token.lock().await.unwrap() = Some(token);

            // Attempt to refresh the token to ensure it's still valid
            match spotify.refetch_token().await {
                Ok(_) => {
                    persist_token(&spotify, store).await;
                    return Ok((Arc::new(Mutex::new(spotify)), true));
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to refresh stored token ({e}), clearing it and waiting for login"
                    );
                    *spotify.token.lock().await.unwrap() = None;
                    store.clear_token().await.ok();
                }
            }
        }
    }

    Ok((Arc::new(Mutex::new(spotify)), false))
}

/// Writes the client's current token through to the session store.
pub async fn persist_token(spotify: &AuthCodeSpotify, store: &dyn SessionStore) {
    let token_guard = spotify.token.lock().await.unwrap();
    if let Some(ref token) = *token_guard {
        if let Ok(token_json) = serde_json::to_string(token) {
            drop(token_guard);
            store.store_token(&token_json).await.ok();
            info!("Token saved to the session store");
        }
    }
}
