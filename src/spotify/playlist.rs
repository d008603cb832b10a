use anyhow::{Context, Result};
use chrono::Local;
use rspotify::{
    model::{
        ArtistId, FullTrack, Market, PlayableId, RecommendationsAttribute, SearchResult,
        SearchType, SimplifiedTrack, TrackId,
    },
    prelude::*,
};
use serde::Serialize;
use tracing::warn;

use crate::mood::CatalogParams;

use super::SharedSpotify;

pub const TRACK_LIMIT: u32 = 20;

/// Flattened track record returned to API callers.
#[derive(Debug, Clone, Serialize)]
pub struct TrackSummary {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub image_url: Option<String>,
    pub preview_url: Option<String>,
    pub external_url: Option<String>,
}

impl From<&FullTrack> for TrackSummary {
    fn from(track: &FullTrack) -> Self {
        TrackSummary {
            id: track.id.as_ref().map(|id| id.id().to_string()),
            name: track.name.clone(),
            artists: track.artists.iter().map(|a| a.name.clone()).collect(),
            album: Some(track.album.name.clone()),
            image_url: track.album.images.first().map(|i| i.url.clone()),
            preview_url: track.preview_url.clone(),
            external_url: track.external_urls.get("spotify").cloned(),
        }
    }
}

impl From<&SimplifiedTrack> for TrackSummary {
    fn from(track: &SimplifiedTrack) -> Self {
        TrackSummary {
            id: track.id.as_ref().map(|id| id.id().to_string()),
            name: track.name.clone(),
            artists: track.artists.iter().map(|a| a.name.clone()).collect(),
            // The recommendations endpoint returns tracks without album data
            album: None,
            image_url: None,
            preview_url: track.preview_url.clone(),
            external_url: track.external_urls.get("spotify").cloned(),
        }
    }
}

/// A playlist created on the user's account.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedPlaylist {
    pub id: String,
    pub name: String,
    pub url: String,
}

pub struct PlaylistAssembler {
    spotify: SharedSpotify,
}

impl PlaylistAssembler {
    pub fn new(spotify: SharedSpotify) -> Self {
        PlaylistAssembler { spotify }
    }

    /// Fetches candidate tracks for the given catalog parameters: the
    /// recommendations endpoint first, falling back to a mood-keyword
    /// genre search when that call fails.
    pub async fn tracks_for_mood(
        &self,
        mood: &str,
        params: &CatalogParams,
    ) -> Result<Vec<TrackSummary>> {
        match self.recommend(params).await {
            Ok(tracks) if !tracks.is_empty() => Ok(tracks),
            Ok(_) => {
                warn!("Recommendations returned no tracks, falling back to search");
                self.search_by_mood(mood, params).await
            }
            Err(e) => {
                warn!("Recommendations call failed ({e}), falling back to search");
                self.search_by_mood(mood, params).await
            }
        }
    }

    async fn recommend(&self, params: &CatalogParams) -> Result<Vec<TrackSummary>> {
        let sp = self.spotify.lock().await;
        let attributes = [
            RecommendationsAttribute::TargetEnergy(params.target_energy),
            RecommendationsAttribute::TargetValence(params.target_valence),
        ];
        let seed_genres: Vec<&str> = params.seed_genres.iter().map(String::as_str).collect();

        let recommendations = sp
            .recommendations(
                attributes,
                None::<Vec<ArtistId>>,
                Some(seed_genres),
                None::<Vec<TrackId>>,
                Some(Market::FromToken),
                Some(TRACK_LIMIT),
            )
            .await?;

        Ok(recommendations
            .tracks
            .iter()
            .map(TrackSummary::from)
            .collect())
    }

    async fn search_by_mood(&self, mood: &str, params: &CatalogParams) -> Result<Vec<TrackSummary>> {
        let genre = params
            .seed_genres
            .first()
            .map(String::as_str)
            .unwrap_or("pop");
        let query = format!("genre:{genre} {}", mood.to_lowercase());

        let sp = self.spotify.lock().await;
        let result = sp
            .search(
                &query,
                SearchType::Track,
                Some(Market::FromToken),
                None,
                Some(TRACK_LIMIT),
                None,
            )
            .await?;

        let tracks = match result {
            SearchResult::Tracks(page) => page.items,
            _ => vec![],
        };
        Ok(tracks.iter().map(TrackSummary::from).collect())
    }

    /// Creates a private "<Mood> Mood - <date>" playlist for the current
    /// user and adds the given tracks. A new playlist per call, no dedup
    /// against earlier playlists of the same mood.
    pub async fn create_mood_playlist(
        &self,
        mood: &str,
        track_ids: &[String],
    ) -> Result<CreatedPlaylist> {
        let sp = self.spotify.lock().await;
        let user = sp
            .current_user()
            .await
            .context("Could not resolve the current Spotify user")?;

        let name = playlist_name(mood);
        let playlist = sp
            .user_playlist_create(user.id, &name, Some(false), None, None)
            .await
            .context("Playlist creation failed")?;

        let items: Vec<PlayableId> = track_ids
            .iter()
            .filter_map(|id| TrackId::from_id(id.as_str()).ok())
            .map(PlayableId::Track)
            .collect();
        if !items.is_empty() {
            sp.playlist_add_items(playlist.id.clone(), items, None)
                .await
                .context("Adding tracks to the playlist failed")?;
        }

        Ok(CreatedPlaylist {
            id: playlist.id.id().to_string(),
            name: playlist.name,
            url: playlist
                .external_urls
                .get("spotify")
                .cloned()
                .unwrap_or_default(),
        })
    }
}

pub fn playlist_name(mood: &str) -> String {
    format!("{mood} Mood - {}", Local::now().format("%Y-%m-%d"))
}
