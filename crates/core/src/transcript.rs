//! Transcript retrieval through yt-dlp subtitles.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::{fs, process::Command};

use crate::{
    cache::{find_subtitle_file, get_cache_dir, get_download_dir, get_transcript_path},
    error::{Result, VidsumError},
    types::{Segment, Transcript},
};

/// Source of video transcripts, tried in language preference order
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Transcript>;
}

pub struct YtDlpTranscripts {
    cache_root: PathBuf,
}

impl YtDlpTranscripts {
    pub fn new(cache_root: PathBuf) -> Self {
        Self { cache_root }
    }

    async fn download_subtitles(video_id: &str, languages: &[&str], dir: &Path) -> Result<()> {
        let output_template = dir.join("subtitles.%(ext)s");
        let output = Command::new("yt-dlp")
            .arg(format!("https://www.youtube.com/watch?v={}", video_id))
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .arg("--sub-langs")
            .arg(languages.join(","))
            .arg("--sub-format")
            .arg("json3")
            .arg("-o")
            .arg(&output_template)
            .output()
            .await
            .map_err(|e| VidsumError::TranscriptFailed {
                video_id: video_id.to_string(),
                reason: format!("could not run yt-dlp: {}", e),
            })?;

        if !output.status.success() {
            return Err(VidsumError::TranscriptFailed {
                video_id: video_id.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }

    async fn download_and_read(video_id: &str, languages: &[&str], download_dir: &Path) -> Result<Transcript> {
        tracing::info!(video_id, languages = %languages.join(","), "downloading subtitles");
        Self::download_subtitles(video_id, languages, download_dir).await?;
        read_first_subtitle(video_id, languages, download_dir).await
    }
}

#[async_trait]
impl TranscriptSource for YtDlpTranscripts {
    async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Transcript> {
        let languages: Vec<&str> = languages
            .iter()
            .map(|lang| lang.trim())
            .filter(|lang| !lang.is_empty())
            .collect();
        if languages.is_empty() {
            return Err(VidsumError::NoTranscript {
                video_id: video_id.to_string(),
                languages: String::new(),
            });
        }

        // one scratch dir per request; only transcript.json is shared
        let cache_dir = get_cache_dir(&self.cache_root, video_id);
        let download_dir = get_download_dir(&cache_dir);
        fs::create_dir_all(&download_dir).await?;

        let result = match Self::download_and_read(video_id, &languages, &download_dir).await {
            Ok(transcript) => save_transcript(&transcript, &download_dir, &cache_dir)
                .await
                .map(|()| transcript),
            Err(e) => Err(e),
        };

        if let Err(e) = fs::remove_dir_all(&download_dir).await {
            tracing::warn!(path = %download_dir.display(), error = %e, "could not remove download dir");
        }
        result
    }
}

/// Parse the subtitle track of the first preferred language present in `dir`
async fn read_first_subtitle(video_id: &str, languages: &[&str], dir: &Path) -> Result<Transcript> {
    let Some((lang, path)) = languages
        .iter()
        .find_map(|lang| find_subtitle_file(dir, lang).map(|path| (*lang, path)))
    else {
        return Err(VidsumError::NoTranscript {
            video_id: video_id.to_string(),
            languages: languages.join(", "),
        });
    };

    let raw = fs::read_to_string(&path).await?;
    parse_json3(video_id, lang, &raw)
}

/// Write `transcript.json` in the scratch dir, then move it into the cache dir
async fn save_transcript(transcript: &Transcript, download_dir: &Path, cache_dir: &Path) -> Result<()> {
    let staged = get_transcript_path(download_dir);
    fs::write(&staged, serde_json::to_string_pretty(transcript)?).await?;
    let transcript_path = get_transcript_path(cache_dir);
    fs::rename(&staged, &transcript_path).await?;
    tracing::debug!(path = %transcript_path.display(), segments = transcript.segments.len(), "transcript saved");
    Ok(())
}

#[derive(Deserialize)]
struct Json3 {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs", default)]
    start_ms: u64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: u64,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Parse a YouTube json3 subtitle track into a transcript
pub fn parse_json3(video_id: &str, language: &str, raw: &str) -> Result<Transcript> {
    let track: Json3 = serde_json::from_str(raw)?;

    let segments: Vec<Segment> = track
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs.iter().map(|seg| seg.utf8.as_str()).collect();
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }
            Some(Segment {
                start: event.start_ms as f64 / 1000.0,
                end: (event.start_ms + event.duration_ms) as f64 / 1000.0,
                text,
            })
        })
        .collect();

    let text = segments
        .iter()
        .map(|seg| seg.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(Transcript {
        video_id: video_id.to_string(),
        language: language.to_string(),
        text,
        segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: &str = r#"{
        "wireMagic": "pb3",
        "events": [
            {"tStartMs": 0, "dDurationMs": 2000, "segs": [{"utf8": "Hello"}, {"utf8": " world"}]},
            {"tStartMs": 1500, "aAppend": 1, "segs": [{"utf8": "\n"}]},
            {"tStartMs": 2000, "dDurationMs": 1500, "segs": [{"utf8": "second\nline"}]},
            {"tStartMs": 4000, "dDurationMs": 10}
        ]
    }"#;

    #[test]
    fn json3_events_become_segments() {
        let transcript = parse_json3("abc", "en", TRACK).unwrap();
        assert_eq!(transcript.language, "en");
        assert_eq!(transcript.segments.len(), 2);
        assert_eq!(transcript.segments[0].text, "Hello world");
        assert_eq!(transcript.segments[1].start, 2.0);
        assert_eq!(transcript.segments[1].end, 3.5);
    }

    #[test]
    fn transcript_text_joins_segments_with_spaces() {
        let transcript = parse_json3("abc", "en", TRACK).unwrap();
        assert_eq!(transcript.text, "Hello world second line");
    }

    #[test]
    fn malformed_track_is_a_json_error() {
        assert!(matches!(
            parse_json3("abc", "en", "<html>").unwrap_err(),
            VidsumError::JsonError(_)
        ));
    }

    #[tokio::test]
    async fn sibling_downloads_do_not_share_subtitles() {
        let cache = tempfile::tempdir().unwrap();
        let first = get_download_dir(cache.path());
        let second = get_download_dir(cache.path());
        std::fs::create_dir_all(&first).unwrap();
        std::fs::create_dir_all(&second).unwrap();
        std::fs::write(first.join("subtitles.en.json3"), TRACK).unwrap();

        let err = read_first_subtitle("abc", &["en"], &second).await.unwrap_err();
        assert!(matches!(err, VidsumError::NoTranscript { .. }));

        std::fs::remove_dir_all(&second).unwrap();
        let transcript = read_first_subtitle("abc", &["es", "en"], &first).await.unwrap();
        assert_eq!(transcript.language, "en");
        assert_eq!(transcript.text, "Hello world second line");
    }

    #[tokio::test]
    async fn missing_subtitles_are_no_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_first_subtitle("abc", &["en", "es"], dir.path())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VidsumError::NoTranscript { ref languages, .. } if languages == "en, es"
        ));
    }

    #[tokio::test]
    async fn saved_transcript_lands_in_cache_dir() {
        let cache = tempfile::tempdir().unwrap();
        let download_dir = get_download_dir(cache.path());
        std::fs::create_dir_all(&download_dir).unwrap();
        let transcript = parse_json3("abc", "en", TRACK).unwrap();

        save_transcript(&transcript, &download_dir, cache.path()).await.unwrap();

        let saved = std::fs::read_to_string(get_transcript_path(cache.path())).unwrap();
        let saved: Transcript = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved, transcript);
        assert!(!get_transcript_path(&download_dir).exists());
    }

    #[tokio::test]
    async fn blank_language_list_fails_before_download() {
        let dir = tempfile::tempdir().unwrap();
        let source = YtDlpTranscripts::new(dir.path().to_path_buf());
        let err = source
            .fetch("abc", &[String::new(), " ".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, VidsumError::NoTranscript { .. }));
    }
}
