//! Normalise user input (bare ids or YouTube links) to a video id.

use reqwest::Url;

const PATH_PREFIXES: [&str; 3] = ["shorts", "embed", "live"];

/// Extract the video id from a YouTube URL, or return the input unchanged.
///
/// A YouTube URL that carries no id yields an empty string.
pub fn extract_video_id(input: &str) -> String {
    let input = input.trim();
    let Ok(url) = Url::parse(input) else {
        return input.to_string();
    };

    let Some(host) = url.host_str() else {
        return input.to_string();
    };
    let host = host.trim_start_matches("www.").trim_start_matches("m.");

    match host {
        "youtu.be" => url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .unwrap_or_default()
            .to_string(),
        "youtube.com" | "music.youtube.com" | "youtube-nocookie.com" => {
            if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "v") {
                return id.into_owned();
            }
            let mut segments = url.path_segments().into_iter().flatten();
            match (segments.next(), segments.next()) {
                (Some(prefix), Some(id)) if PATH_PREFIXES.contains(&prefix) => id.to_string(),
                _ => String::new(),
            }
        }
        _ => input.to_string(),
    }
}
