//! YouTube caption retrieval via the timedtext endpoint.
//! Resolves a video id from a URL and fetches the caption track as json3.

use crate::error::{RecapError, Result};
use crate::transcript::CaptionEntry;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

/// Production timedtext endpoint.
pub const DEFAULT_TIMEDTEXT_URL: &str = "https://www.youtube.com/api/timedtext";

/// Caption languages tried in order when the caller picks none.
/// The `a.` prefix selects the auto-generated track for a language.
pub const DEFAULT_LANGUAGES: &[&str] = &["en", "a.en"];

/// Extract the 11-character video id from a YouTube URL or bare id.
pub fn extract_video_id(input: &str) -> Result<String> {
    let input = input.trim();
    if is_video_id(input) {
        return Ok(input.to_string());
    }
    let host_and_path = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
        .unwrap_or(input);
    let host_and_path = host_and_path
        .strip_prefix("www.")
        .or_else(|| host_and_path.strip_prefix("m."))
        .unwrap_or(host_and_path);
    let candidate = if let Some(rest) = host_and_path.strip_prefix("youtu.be/") {
        rest.split(['?', '&', '#']).next()
    } else if let Some(rest) = host_and_path.strip_prefix("youtube.com/") {
        if let Some(query) = rest.strip_prefix("watch?") {
            query
                .split('#')
                .next()
                .and_then(|q| q.split('&').find_map(|p| p.strip_prefix("v=")))
        } else if let Some(path) = rest
            .strip_prefix("embed/")
            .or_else(|| rest.strip_prefix("shorts/"))
            .or_else(|| rest.strip_prefix("live/"))
        {
            path.split(['?', '#']).next()
        } else {
            None
        }
    } else {
        None
    };
    match candidate {
        Some(id) if is_video_id(id) => Ok(id.to_string()),
        _ => Err(RecapError::SourceResolution {
            input: input.to_string(),
        }),
    }
}

/// Video ids are 11 URL-safe base64 characters.
fn is_video_id(s: &str) -> bool {
    s.len() == 11 && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Fetches the ordered caption track for a resolved video id.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(&self, video_id: &str) -> Result<Vec<CaptionEntry>>;
}

/// Caption source backed by the YouTube timedtext endpoint.
pub struct TimedTextClient {
    client: reqwest::Client,
    base_url: String,
    languages: Vec<String>,
}

impl TimedTextClient {
    /// Create a client against the production endpoint. An empty
    /// language list falls back to [`DEFAULT_LANGUAGES`].
    pub fn new(languages: &[String]) -> Self {
        Self::with_base_url(DEFAULT_TIMEDTEXT_URL, languages)
    }

    /// Create a client against an explicit endpoint, used by tests.
    pub fn with_base_url(base_url: &str, languages: &[String]) -> Self {
        let languages = if languages.is_empty() {
            DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
        } else {
            languages.to_vec()
        };
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
            languages,
        }
    }

    /// Request one language's track; `None` when the track is missing.
    /// The endpoint answers 200 with an empty body for absent tracks.
    async fn fetch_track(&self, video_id: &str, lang: &str) -> Result<Option<Vec<CaptionEntry>>> {
        let (lang_code, kind) = match lang.strip_prefix("a.") {
            Some(code) => (code, Some("asr")),
            None => (lang, None),
        };
        let mut query = vec![("v", video_id), ("lang", lang_code), ("fmt", "json3")];
        if let Some(kind) = kind {
            query.push(("kind", kind));
        }
        let resp = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await?;
        if !resp.status().is_success() {
            debug!("timedtext returned {} for lang {lang}", resp.status());
            return Ok(None);
        }
        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<TimedTextDocument>(&body) {
            Ok(doc) => Ok(Some(doc.into_entries())),
            Err(err) => {
                debug!("unparseable timedtext body for lang {lang}: {err}");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl TranscriptSource for TimedTextClient {
    /// Try each configured language in order and return the first track
    /// that has captions.
    async fn fetch(&self, video_id: &str) -> Result<Vec<CaptionEntry>> {
        for lang in &self.languages {
            if let Some(entries) = self.fetch_track(video_id, lang).await? {
                if !entries.is_empty() {
                    info!("found {} captions in language {lang}", entries.len());
                    return Ok(entries);
                }
            }
        }
        Err(RecapError::TranscriptUnavailable {
            video_id: video_id.to_string(),
            languages: self.languages.join(", "),
        })
    }
}

/// Top-level json3 payload.
#[derive(Debug, Deserialize)]
struct TimedTextDocument {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

/// One caption event; windowing events carry no `segs`.
#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs")]
    start_ms: Option<u64>,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: u64,
    #[serde(default)]
    segs: Vec<TimedTextSeg>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

impl TimedTextDocument {
    /// Flatten events into caption entries, dropping empty ones.
    /// Newlines inside a caption become spaces so the rendered transcript
    /// keeps one caption per line.
    fn into_entries(self) -> Vec<CaptionEntry> {
        self.events
            .into_iter()
            .filter_map(|event| {
                let start_ms = event.start_ms?;
                let text = event
                    .segs
                    .iter()
                    .map(|seg| seg.utf8.as_str())
                    .collect::<String>()
                    .replace('\n', " ")
                    .trim()
                    .to_string();
                if text.is_empty() {
                    return None;
                }
                let start = start_ms as f64 / 1000.0;
                Some(CaptionEntry {
                    start,
                    end: start + event.duration_ms as f64 / 1000.0,
                    text,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn extracts_id_from_common_url_forms() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://youtube.com/watch?v=dQw4w9WgXcQ&t=42",
            "https://m.youtube.com/watch?list=PL123&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abc",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
        ] {
            assert_eq!(extract_video_id(url).unwrap(), "dQw4w9WgXcQ", "failed for {url}");
        }
    }

    #[test]
    fn rejects_inputs_without_a_video_id() {
        for input in [
            "https://example.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?t=42",
            "not a url",
            "",
        ] {
            let err = extract_video_id(input).unwrap_err();
            assert!(matches!(err, RecapError::SourceResolution { .. }), "accepted {input:?}");
        }
    }

    #[test]
    fn parses_json3_events_into_entries() {
        let body = r#"{
            "events": [
                {"tStartMs": 0, "dDurationMs": 2000, "segs": [{"utf8": "Hello"}]},
                {"tStartMs": 1500},
                {"tStartMs": 2000, "dDurationMs": 3000, "segs": [{"utf8": "wor"}, {"utf8": "ld\n"}]}
            ]
        }"#;
        let doc: TimedTextDocument = serde_json::from_str(body).unwrap();
        let entries = doc.into_entries();
        assert_eq!(
            entries,
            vec![
                CaptionEntry {
                    start: 0.0,
                    end: 2.0,
                    text: "Hello".to_string()
                },
                CaptionEntry {
                    start: 2.0,
                    end: 5.0,
                    text: "world".to_string()
                },
            ]
        );
    }

    /// The first language with captions wins; later ones are not tried.
    #[tokio::test]
    async fn fetch_returns_first_language_with_captions() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/timedtext")
                .query_param("v", "dQw4w9WgXcQ")
                .query_param("lang", "en")
                .query_param_exists("fmt");
            then.status(200).body(
                r#"{"events": [{"tStartMs": 0, "dDurationMs": 1000, "segs": [{"utf8": "hi"}]}]}"#,
            );
        });
        let client = TimedTextClient::with_base_url(&server.url("/timedtext"), &[]);
        let entries = client.fetch("dQw4w9WgXcQ").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "hi");
    }

    /// Auto-generated tracks are requested with the asr kind parameter.
    #[tokio::test]
    async fn falls_back_to_the_auto_generated_track() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/timedtext").query_param("lang", "fr");
            then.status(200).body("");
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/timedtext")
                .query_param("lang", "en")
                .query_param("kind", "asr");
            then.status(200).body(
                r#"{"events": [{"tStartMs": 0, "dDurationMs": 1000, "segs": [{"utf8": "auto"}]}]}"#,
            );
        });
        let languages = vec!["fr".to_string(), "a.en".to_string()];
        let client = TimedTextClient::with_base_url(&server.url("/timedtext"), &languages);
        let entries = client.fetch("dQw4w9WgXcQ").await.unwrap();
        assert_eq!(entries[0].text, "auto");
    }

    /// No language yields captions: the track is reported unavailable.
    #[tokio::test]
    async fn missing_tracks_are_reported_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/timedtext");
            then.status(404);
        });
        let client = TimedTextClient::with_base_url(&server.url("/timedtext"), &[]);
        let err = client.fetch("dQw4w9WgXcQ").await.unwrap_err();
        assert!(matches!(err, RecapError::TranscriptUnavailable { .. }));
    }
}
