use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

use super::client::{PlaylistItemResource, PlaylistSource};
use super::{extract_playlist_id, uploads_playlist_id, YouTubeError};
use crate::database::models::video::VideoImport;
use crate::error::ApiError;
use crate::services::{ChannelService, VideoService};

/// Per-playlist outcome counts. The operation is not atomic: failed items are
/// skipped and counted while the rest of the batch proceeds.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ImportSummary {
    pub imported: u32,
    pub updated: u32,
    pub failed: u32,
    pub total: u32,
}

/// A playlist item that passed minimal-field validation.
#[derive(Debug, Clone)]
struct PlaylistEntry {
    youtube_id: String,
    title: String,
    description: Option<String>,
    thumbnail_url: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

fn validate_item(item: &PlaylistItemResource) -> Option<PlaylistEntry> {
    let snippet = item.snippet.as_ref()?;

    let youtube_id = item
        .content_details
        .as_ref()
        .and_then(|details| details.video_id.clone())
        .or_else(|| snippet.resource_id.as_ref().and_then(|r| r.video_id.clone()))
        .filter(|id| !id.is_empty())?;

    let title = snippet
        .title
        .clone()
        .filter(|title| !title.trim().is_empty())?;

    let thumbnail_url = snippet.thumbnails.as_ref().and_then(|t| {
        t.medium
            .as_ref()
            .or(t.default_size.as_ref())
            .map(|thumb| thumb.url.clone())
    });

    Some(PlaylistEntry {
        youtube_id,
        title,
        description: snippet.description.clone().filter(|d| !d.is_empty()),
        thumbnail_url,
        published_at: snippet.published_at,
    })
}

/// Page through the whole playlist, counting malformed items instead of
/// aborting on them.
async fn collect_entries(
    source: &dyn PlaylistSource,
    playlist_id: &str,
) -> Result<(Vec<PlaylistEntry>, u32), YouTubeError> {
    let mut entries = Vec::new();
    let mut failed = 0u32;
    let mut page_token: Option<String> = None;

    loop {
        let page = source
            .playlist_page(playlist_id, page_token.as_deref())
            .await?;

        for item in &page.items {
            match validate_item(item) {
                Some(entry) => entries.push(entry),
                None => failed += 1,
            }
        }

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    Ok((entries, failed))
}

/// Import every video in the playlist behind `playlist_url`, upserting on the
/// external video id so re-imports update instead of duplicating.
pub async fn import_playlist(
    source: &dyn PlaylistSource,
    videos: &VideoService,
    playlist_url: &str,
) -> Result<ImportSummary, ApiError> {
    let playlist_id = extract_playlist_id(playlist_url)?;
    import_playlist_by_id(source, videos, &playlist_id).await
}

pub async fn import_playlist_by_id(
    source: &dyn PlaylistSource,
    videos: &VideoService,
    playlist_id: &str,
) -> Result<ImportSummary, ApiError> {
    let (entries, failed) = collect_entries(source, playlist_id).await?;

    let mut summary = ImportSummary {
        failed,
        total: failed + entries.len() as u32,
        ..Default::default()
    };

    // Durations are best-effort enrichment; a lookup failure leaves them unset
    let ids: Vec<String> = entries.iter().map(|e| e.youtube_id.clone()).collect();
    let durations = match source.video_durations(&ids).await {
        Ok(durations) => durations,
        Err(e) => {
            warn!("duration lookup failed for playlist {}: {}", playlist_id, e);
            HashMap::new()
        }
    };

    for entry in entries {
        let existed = match videos.get_by_youtube_id(&entry.youtube_id).await {
            Ok(video) => video.is_some(),
            Err(e) => {
                warn!("lookup failed for {}: {}", entry.youtube_id, e);
                summary.failed += 1;
                continue;
            }
        };

        let import = VideoImport {
            duration: durations.get(&entry.youtube_id).copied(),
            youtube_id: entry.youtube_id,
            title: entry.title,
            description: entry.description,
            thumbnail_url: entry.thumbnail_url,
            published_at: entry.published_at,
        };

        match videos.upsert_by_youtube_id(&import).await {
            Ok(_) if existed => summary.updated += 1,
            Ok(_) => summary.imported += 1,
            Err(e) => {
                warn!("upsert failed for {}: {}", import.youtube_id, e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "playlist {} import finished: {} new, {} updated, {} failed",
        playlist_id, summary.imported, summary.updated, summary.failed
    );
    Ok(summary)
}

#[derive(Debug, Serialize)]
pub struct ChannelCheckResult {
    pub channel_id: String,
    pub summary: Option<ImportSummary>,
    pub error: Option<String>,
}

/// Re-import every watched channel whose check window has elapsed, via its
/// uploads playlist. Per-channel failures are reported, not fatal.
pub async fn check_watched_channels(
    source: &dyn PlaylistSource,
) -> Result<Vec<ChannelCheckResult>, ApiError> {
    let channels = ChannelService::new().await?;
    let videos = VideoService::new().await?;
    let now = Utc::now();

    let mut results = Vec::new();
    for channel in channels.due_channels(now).await? {
        let outcome = match uploads_playlist_id(&channel.channel_id) {
            Some(playlist_id) => import_playlist_by_id(source, &videos, &playlist_id).await,
            None => Err(ApiError::bad_request(format!(
                "Channel {} has no derivable uploads playlist",
                channel.channel_id
            ))),
        };

        match outcome {
            Ok(summary) => {
                channels.mark_checked(channel.id, now).await?;
                results.push(ChannelCheckResult {
                    channel_id: channel.channel_id,
                    summary: Some(summary),
                    error: None,
                });
            }
            Err(e) => {
                warn!("channel {} import failed: {}", channel.channel_id, e);
                results.push(ChannelCheckResult {
                    channel_id: channel.channel_id,
                    summary: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::client::{
        PlaylistItemContentDetails, PlaylistItemSnippet, PlaylistPage,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn item(video_id: Option<&str>, title: Option<&str>) -> PlaylistItemResource {
        PlaylistItemResource {
            snippet: Some(PlaylistItemSnippet {
                title: title.map(String::from),
                description: Some("desc".to_string()),
                published_at: None,
                thumbnails: None,
                resource_id: None,
            }),
            content_details: Some(PlaylistItemContentDetails {
                video_id: video_id.map(String::from),
            }),
        }
    }

    struct FakeSource {
        pages: Mutex<Vec<PlaylistPage>>,
    }

    #[async_trait]
    impl PlaylistSource for FakeSource {
        async fn playlist_page(
            &self,
            _playlist_id: &str,
            _page_token: Option<&str>,
        ) -> Result<PlaylistPage, YouTubeError> {
            let mut pages = self.pages.lock().unwrap();
            if pages.is_empty() {
                return Err(YouTubeError::UnexpectedResponse(
                    "no more pages".to_string(),
                ));
            }
            Ok(pages.remove(0))
        }

        async fn video_durations(
            &self,
            _video_ids: &[String],
        ) -> Result<HashMap<String, i32>, YouTubeError> {
            Ok(HashMap::new())
        }
    }

    #[tokio::test]
    async fn collects_across_pages_and_counts_malformed() {
        let source = FakeSource {
            pages: Mutex::new(vec![
                PlaylistPage {
                    items: vec![item(Some("vid-one-0001"), Some("First"))],
                    next_page_token: Some("page2".to_string()),
                },
                PlaylistPage {
                    items: vec![
                        item(None, Some("No id")),
                        item(Some("vid-two-0002"), Some("Second")),
                        item(Some("vid-three-3"), Some("   ")),
                    ],
                    next_page_token: None,
                },
            ]),
        };

        let (entries, failed) = collect_entries(&source, "PLwhatever12345").await.unwrap();
        assert_eq!(failed, 2);
        let ids: Vec<&str> = entries.iter().map(|e| e.youtube_id.as_str()).collect();
        assert_eq!(ids, vec!["vid-one-0001", "vid-two-0002"]);
    }

    #[test]
    fn validate_prefers_content_details_id() {
        let mut resource = item(Some("from-details"), Some("Title"));
        resource.snippet.as_mut().unwrap().resource_id = Some(crate::youtube::client::ResourceId {
            video_id: Some("from-snippet".to_string()),
        });

        let entry = validate_item(&resource).unwrap();
        assert_eq!(entry.youtube_id, "from-details");
        assert_eq!(entry.description.as_deref(), Some("desc"));
    }
}
