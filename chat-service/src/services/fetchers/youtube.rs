//! YouTube transcript source.
//!
//! Fetches the watch page, locates the caption track list embedded in the
//! player payload, and downloads the transcript. Manually-authored English
//! captions are preferred, then auto-generated ones; if only a non-English
//! track exists it is translated to English via the timedtext endpoint.

use super::{DocumentSource, FetchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub struct YoutubeSource {
    client: Client,
}

impl YoutubeSource {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl DocumentSource for YoutubeSource {
    async fn fetch(&self, reference: &str) -> Result<String, FetchError> {
        let video_id = extract_video_id(reference).ok_or_else(|| {
            FetchError::Malformed(format!("not a recognizable YouTube URL: {}", reference))
        })?;

        let watch_url = format!("https://www.youtube.com/watch?v={}", video_id);
        let response = self.client.get(&watch_url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Network(format!(
                "HTTP {} fetching watch page",
                response.status()
            )));
        }

        let page = response.text().await?;
        let tracks = caption_tracks(&page)?;
        if tracks.is_empty() {
            return Err(FetchError::NoTranscript);
        }

        let (track, translate) = select_track(&tracks).ok_or(FetchError::NoTranscript)?;
        tracing::debug!(
            video_id = %video_id,
            language = %track.language_code,
            auto_generated = track.is_auto_generated(),
            translate,
            "Selected caption track"
        );

        let mut transcript_url = format!("{}&fmt=json3", track.base_url);
        if translate {
            transcript_url.push_str("&tlang=en");
        }

        let response = self.client.get(&transcript_url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Network(format!(
                "HTTP {} fetching transcript",
                response.status()
            )));
        }

        let payload: TranscriptPayload = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(format!("transcript payload: {}", e)))?;

        let text = render_transcript(&payload);
        if text.trim().is_empty() {
            return Err(FetchError::NoTranscript);
        }

        Ok(text)
    }
}

/// Pull the video id out of the common URL shapes: watch?v=, youtu.be/,
/// /embed/, /shorts/.
fn extract_video_id(url: &str) -> Option<&str> {
    // Anchor on the query delimiter so an unrelated parameter ending in
    // "v" (e.g. "tv=") does not match.
    let candidate = if let Some(idx) = url.find("?v=").or_else(|| url.find("&v=")) {
        &url[idx + "?v=".len()..]
    } else if let Some(idx) = url.find("youtu.be/") {
        &url[idx + "youtu.be/".len()..]
    } else if let Some(idx) = url.find("/embed/") {
        &url[idx + "/embed/".len()..]
    } else if let Some(idx) = url.find("/shorts/") {
        &url[idx + "/shorts/".len()..]
    } else {
        return None;
    };

    let id: &str = candidate
        .split(|c: char| c == '&' || c == '?' || c == '/' || c == '#')
        .next()
        .unwrap_or_default();

    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(id)
}

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: String,
    /// "asr" marks auto-generated tracks.
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_english(&self) -> bool {
        self.language_code == "en" || self.language_code.starts_with("en-")
    }

    fn is_auto_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Locate the `"captionTracks"` array in the watch-page payload. Absent
/// array means the video has no captions at all.
fn caption_tracks(page: &str) -> Result<Vec<CaptionTrack>, FetchError> {
    const KEY: &str = "\"captionTracks\":";

    let Some(key_idx) = page.find(KEY) else {
        return Ok(Vec::new());
    };
    let after_key = &page[key_idx + KEY.len()..];
    let array = json_array_at(after_key)
        .ok_or_else(|| FetchError::Malformed("unterminated captionTracks array".to_string()))?;

    serde_json::from_str(array)
        .map_err(|e| FetchError::Malformed(format!("captionTracks payload: {}", e)))
}

/// Slice out the balanced JSON array starting at the first `[`, respecting
/// string literals and escapes.
fn json_array_at(s: &str) -> Option<&str> {
    let start = s.find('[')?;
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'[' if !in_string => depth += 1,
            b']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Preference order: manual English, auto-generated English, then any track
/// translated to English.
fn select_track(tracks: &[CaptionTrack]) -> Option<(&CaptionTrack, bool)> {
    if let Some(track) = tracks.iter().find(|t| t.is_english() && !t.is_auto_generated()) {
        return Some((track, false));
    }
    if let Some(track) = tracks.iter().find(|t| t.is_english()) {
        return Some((track, false));
    }
    tracks.first().map(|track| (track, true))
}

#[derive(Debug, Deserialize)]
struct TranscriptPayload {
    #[serde(default)]
    events: Vec<TranscriptEvent>,
}

#[derive(Debug, Deserialize)]
struct TranscriptEvent {
    #[serde(default)]
    segs: Vec<TranscriptSegment>,
}

#[derive(Debug, Deserialize)]
struct TranscriptSegment {
    #[serde(default)]
    utf8: String,
}

fn render_transcript(payload: &TranscriptPayload) -> String {
    let mut lines = Vec::new();
    for event in &payload.events {
        let line: String = event.segs.iter().map(|seg| seg.utf8.as_str()).collect();
        let line = line.replace('\n', " ");
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_video_id_from_common_url_shapes() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=xyz",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
        ] {
            assert_eq!(extract_video_id(url), Some("dQw4w9WgXcQ"), "url: {}", url);
        }
    }

    #[test]
    fn rejects_urls_without_a_video_id() {
        assert_eq!(extract_video_id("https://example.com/page"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v="), None);
    }

    #[test]
    fn unrelated_parameter_ending_in_v_is_not_a_video_id() {
        assert_eq!(extract_video_id("https://example.com/watch?tv=abc123"), None);
        assert_eq!(extract_video_id("https://example.com/page?a=1&mtv=xyz"), None);
        // The anchored form still matches when v= is not the first parameter.
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?app=desktop&v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn parses_caption_tracks_from_player_payload() {
        let page = r#"junk{"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=x&lang=en","languageCode":"en"},{"baseUrl":"https://t/2","languageCode":"fr","kind":"asr"}]}}}more"#;
        let tracks = caption_tracks(page).expect("parse");
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language_code, "en");
        assert!(tracks[0].base_url.contains("&lang=en"));
        assert!(tracks[1].is_auto_generated());
    }

    #[test]
    fn page_without_caption_tracks_yields_no_tracks() {
        assert!(caption_tracks("<html>no captions here</html>")
            .expect("parse")
            .is_empty());
    }

    #[test]
    fn prefers_manual_english_over_auto_generated() {
        let tracks = vec![
            CaptionTrack {
                base_url: "auto".into(),
                language_code: "en".into(),
                kind: Some("asr".into()),
            },
            CaptionTrack {
                base_url: "manual".into(),
                language_code: "en-US".into(),
                kind: None,
            },
        ];
        let (track, translate) = select_track(&tracks).expect("track");
        assert_eq!(track.base_url, "manual");
        assert!(!translate);
    }

    #[test]
    fn falls_back_to_translating_a_foreign_track() {
        let tracks = vec![CaptionTrack {
            base_url: "fr".into(),
            language_code: "fr".into(),
            kind: None,
        }];
        let (track, translate) = select_track(&tracks).expect("track");
        assert_eq!(track.base_url, "fr");
        assert!(translate);
    }

    #[test]
    fn renders_transcript_segments_into_lines() {
        let payload: TranscriptPayload = serde_json::from_str(
            r#"{"events":[{"segs":[{"utf8":"Hello "},{"utf8":"world"}]},{"segs":[{"utf8":"\n"}]},{"segs":[{"utf8":"second line"}]}]}"#,
        )
        .expect("payload");
        assert_eq!(render_transcript(&payload), "Hello world\nsecond line");
    }
}
