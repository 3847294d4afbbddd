use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Get the cache directory for a given video id
pub fn get_cache_dir(root: &Path, video_id: &str) -> PathBuf {
    // ids are opaque; keep them from escaping the cache root
    let safe: String = video_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    root.join(safe)
}

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("vidsum")
}

/// Get the path for a cached transcript file
pub fn get_transcript_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("transcript.json")
}

/// Fresh scratch directory under a video's cache dir for one download
pub fn get_download_dir(cache_dir: &Path) -> PathBuf {
    cache_dir.join(format!("download-{}", Uuid::new_v4()))
}

/// Find the subtitle file yt-dlp wrote for a language
pub fn find_subtitle_file(cache_dir: &Path, lang: &str) -> Option<PathBuf> {
    let path = cache_dir.join(format!("subtitles.{}.json3", lang));
    path.exists().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_ids_stay_inside_cache_root() {
        let root = Path::new("/cache");
        assert_eq!(get_cache_dir(root, "DQdB7wFEygo"), root.join("DQdB7wFEygo"));
        assert_eq!(get_cache_dir(root, "../etc"), root.join("___etc"));
    }

    #[test]
    fn download_dirs_are_unique_per_request() {
        let cache_dir = Path::new("/cache/abc");
        let first = get_download_dir(cache_dir);
        let second = get_download_dir(cache_dir);
        assert_ne!(first, second);
        assert_eq!(first.parent(), Some(cache_dir));
        assert_eq!(second.parent(), Some(cache_dir));
    }

    #[test]
    fn subtitle_lookup_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_subtitle_file(dir.path(), "en"), None);

        let expected = dir.path().join("subtitles.en.json3");
        std::fs::write(&expected, "{}").unwrap();
        assert_eq!(find_subtitle_file(dir.path(), "en"), Some(expected));
    }
}
