use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

use super::{parse_iso8601_duration, YouTubeError};
use crate::config;

/// One page of playlist items plus the continuation token, if any.
#[derive(Debug, Clone)]
pub struct PlaylistPage {
    pub items: Vec<PlaylistItemResource>,
    pub next_page_token: Option<String>,
}

// Wire types for the Data API v3. Every field is optional; item validation
// decides what is usable.

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemResource {
    pub snippet: Option<PlaylistItemSnippet>,
    pub content_details: Option<PlaylistItemContentDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnails: Option<Thumbnails>,
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnails {
    pub medium: Option<Thumbnail>,
    #[serde(rename = "default")]
    pub default_size: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItemResource>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResource {
    id: String,
    content_details: Option<VideoContentDetails>,
}

#[derive(Debug, Deserialize)]
struct VideoContentDetails {
    duration: Option<String>,
}

/// Seam between the import logic and the Data API, so imports are testable
/// against a fake source.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, YouTubeError>;

    /// Durations in seconds keyed by video id. Unknown ids are absent.
    async fn video_durations(
        &self,
        video_ids: &[String],
    ) -> Result<HashMap<String, i32>, YouTubeError>;
}

/// reqwest-backed Data API v3 client.
pub struct YouTubeDataApi {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    page_size: u32,
}

impl YouTubeDataApi {
    pub fn from_config() -> Result<Self, YouTubeError> {
        let youtube = &config::config().youtube;
        let api_key = youtube.api_key.clone().ok_or(YouTubeError::MissingApiKey)?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: youtube.api_base_url.clone(),
            page_size: youtube.page_size,
        })
    }
}

#[async_trait]
impl PlaylistSource for YouTubeDataApi {
    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, YouTubeError> {
        let mut params: Vec<(&str, String)> = vec![
            ("part", "snippet,contentDetails".to_string()),
            ("maxResults", self.page_size.to_string()),
            ("playlistId", playlist_id.to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        let response = self
            .client
            .get(format!("{}/playlistItems", self.base_url))
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let body: PlaylistItemsResponse = response.json().await?;
        Ok(PlaylistPage {
            items: body.items,
            next_page_token: body.next_page_token,
        })
    }

    async fn video_durations(
        &self,
        video_ids: &[String],
    ) -> Result<HashMap<String, i32>, YouTubeError> {
        let mut durations = HashMap::new();

        // The videos endpoint accepts at most 50 ids per call
        for chunk in video_ids.chunks(50) {
            let params: Vec<(&str, String)> = vec![
                ("part", "contentDetails".to_string()),
                ("id", chunk.join(",")),
                ("key", self.api_key.clone()),
            ];

            let response = self
                .client
                .get(format!("{}/videos", self.base_url))
                .query(&params)
                .send()
                .await?
                .error_for_status()?;

            let body: VideoListResponse = response.json().await?;
            for item in body.items {
                let duration = item
                    .content_details
                    .and_then(|details| details.duration)
                    .and_then(|d| parse_iso8601_duration(&d));
                if let Some(duration) = duration {
                    durations.insert(item.id, duration);
                }
            }
        }

        Ok(durations)
    }
}
