use url::Url;

pub mod client;
pub mod import;

pub use client::{PlaylistPage, PlaylistSource, YouTubeDataApi};
pub use import::{check_watched_channels, import_playlist, ImportSummary};

#[derive(Debug, thiserror::Error)]
pub enum YouTubeError {
    #[error("YouTube API key is not configured")]
    MissingApiKey,

    #[error("Invalid playlist URL: {0}")]
    InvalidPlaylistUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Pull the playlist id out of a YouTube URL. Accepts playlist pages, watch
/// URLs carrying a `list` parameter, and bare playlist ids.
pub fn extract_playlist_id(input: &str) -> Result<String, YouTubeError> {
    let input = input.trim();

    if looks_like_playlist_id(input) {
        return Ok(input.to_string());
    }

    let url = Url::parse(input)
        .map_err(|_| YouTubeError::InvalidPlaylistUrl(input.to_string()))?;

    match url.host_str() {
        Some("youtube.com") | Some("www.youtube.com") | Some("m.youtube.com")
        | Some("music.youtube.com") | Some("youtu.be") => url
            .query_pairs()
            .find(|(key, _)| key == "list")
            .map(|(_, value)| value.to_string())
            .filter(|id| looks_like_playlist_id(id))
            .ok_or_else(|| YouTubeError::InvalidPlaylistUrl(input.to_string())),
        _ => Err(YouTubeError::InvalidPlaylistUrl(input.to_string())),
    }
}

/// Playlist ids use a known prefix followed by a base64-ish tail.
fn looks_like_playlist_id(s: &str) -> bool {
    const PREFIXES: &[&str] = &["PL", "UU", "FL", "OL", "RD"];
    (13..=64).contains(&s.len())
        && PREFIXES.iter().any(|p| s.starts_with(p))
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A channel's uploads playlist shares the channel id tail: UC… becomes UU….
pub fn uploads_playlist_id(channel_id: &str) -> Option<String> {
    channel_id
        .strip_prefix("UC")
        .filter(|tail| !tail.is_empty())
        .map(|tail| format!("UU{}", tail))
}

/// Parse an ISO-8601 duration (the Data API's `PT#H#M#S` shape) to seconds.
pub fn parse_iso8601_duration(input: &str) -> Option<i32> {
    let rest = input.strip_prefix('P')?;
    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => (date, time),
        None => (rest, ""),
    };

    let mut total: i64 = 0;
    let mut digits = String::new();

    for c in date_part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c == 'D' {
            total += digits.parse::<i64>().ok()? * 86_400;
            digits.clear();
        } else {
            return None;
        }
    }
    if !digits.is_empty() {
        return None;
    }

    for c in time_part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let value: i64 = digits.parse().ok()?;
        digits.clear();
        total += match c {
            'H' => value * 3600,
            'M' => value * 60,
            'S' => value,
            _ => return None,
        };
    }
    if !digits.is_empty() {
        return None;
    }

    i32::try_from(total).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_playlist_page_url() {
        let id = extract_playlist_id(
            "https://www.youtube.com/playlist?list=PLabcdefghijklmnop",
        )
        .unwrap();
        assert_eq!(id, "PLabcdefghijklmnop");
    }

    #[test]
    fn extracts_from_watch_url() {
        let id = extract_playlist_id(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLabcdefghijklmnop&index=2",
        )
        .unwrap();
        assert_eq!(id, "PLabcdefghijklmnop");
    }

    #[test]
    fn accepts_bare_playlist_id() {
        assert_eq!(
            extract_playlist_id("UUabcdefghijklmnop").unwrap(),
            "UUabcdefghijklmnop"
        );
    }

    #[test]
    fn rejects_non_youtube_hosts_and_missing_list() {
        assert!(extract_playlist_id("https://vimeo.com/playlist?list=PLabcdefghijklmnop").is_err());
        assert!(extract_playlist_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").is_err());
        assert!(extract_playlist_id("not a url").is_err());
    }

    #[test]
    fn uploads_playlist_mapping() {
        assert_eq!(
            uploads_playlist_id("UC1234567890abcdef").as_deref(),
            Some("UU1234567890abcdef")
        );
        assert_eq!(uploads_playlist_id("HC123"), None);
        assert_eq!(uploads_playlist_id("UC"), None);
    }

    #[test]
    fn duration_parsing() {
        assert_eq!(parse_iso8601_duration("PT1H2M3S"), Some(3723));
        assert_eq!(parse_iso8601_duration("PT15S"), Some(15));
        assert_eq!(parse_iso8601_duration("PT4M"), Some(240));
        assert_eq!(parse_iso8601_duration("P1DT1S"), Some(86_401));
        assert_eq!(parse_iso8601_duration("PT0S"), Some(0));
        assert_eq!(parse_iso8601_duration("garbage"), None);
        assert_eq!(parse_iso8601_duration("PT5"), None);
    }
}
