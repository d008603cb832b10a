use anyhow::{bail, Context, Result};
use base64::Engine;
use rand::Rng;
use rspotify::{clients::OAuthClient, AuthCodeSpotify};
use tracing::info;

use crate::store::SessionStore;

/// Random URL-safe value for the OAuth `state` parameter, generated once
/// per process and carried in the client's OAuth config.
pub fn generate_state() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..16).map(|_| rng.gen_range(0u8..=255u8)).collect();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&bytes)
}

/// The URL the user is redirected to for the Spotify consent screen.
pub fn authorize_url(spotify: &AuthCodeSpotify) -> Result<String> {
    spotify
        .get_authorize_url(false)
        .context("Failed to build Spotify authorize URL")
}

/// Finishes the flow after the provider redirect: checks `state`,
/// exchanges the code for a token and writes the token through to the
/// session store.
pub async fn complete_auth(
    spotify: &AuthCodeSpotify,
    code: &str,
    state: &str,
    store: &dyn SessionStore,
) -> Result<()> {
    if state != spotify.oauth.state {
        bail!("OAuth state mismatch on callback");
    }

    spotify
        .request_token(code)
        .await
        .context("Spotify token exchange failed")?;
    info!("Spotify authentication completed");

    super::persist_token(spotify, store).await;
    Ok(())
}
