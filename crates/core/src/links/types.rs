use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Playback links partitioned by audio track, keyed by quality tier
/// ("720p", "1080p_download", ...). Within one resolution run a key is
/// written at most once per bucket; a duplicate extraction overwrites
/// (last write wins).
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkBundle {
    pub sub: HashMap<String, String>,
    pub dub: HashMap<String, String>,
}

/// A streaming candidate as extracted from the player's resolution menu.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamSource {
    pub resolution: Option<String>,
    pub audio: Option<String>,
    pub src: Option<String>,
}

/// A download-mirror anchor: visible label plus target URL.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadSource {
    pub label: Option<String>,
    pub href: Option<String>,
}

/// Quality substrings checked in order; no entry is expected to match more
/// than one.
const DOWNLOAD_QUALITIES: [&str; 4] = ["360", "480", "720", "1080"];

impl LinkBundle {
    /// Classify one streaming entry. Audio "jpn" buckets as sub, "eng" as
    /// dub; any other audio tag is dropped rather than defaulted, since
    /// misclassifying sub/dub is worse than omitting.
    pub fn add_stream(&mut self, source: &StreamSource) {
        let (Some(resolution), Some(audio), Some(src)) =
            (&source.resolution, &source.audio, &source.src)
        else {
            return;
        };
        let key = format!("{}p", resolution);
        match audio.as_str() {
            "jpn" => {
                self.sub.insert(key, src.clone());
            }
            "eng" => {
                self.dub.insert(key, src.clone());
            }
            _ => {}
        }
    }

    /// Classify one download entry by its label text: an "eng" marker
    /// selects the dub bucket, and the first matching quality substring
    /// (checked 360 -> 1080) selects the key. Entries without a known
    /// quality substring are dropped.
    pub fn add_download(&mut self, source: &DownloadSource) {
        let (Some(label), Some(href)) = (&source.label, &source.href) else {
            return;
        };
        let label = label.trim().to_lowercase();
        let Some(quality) = DOWNLOAD_QUALITIES.iter().find(|q| label.contains(*q)) else {
            return;
        };
        let key = format!("{}p_download", quality);
        let bucket = if label.contains("eng") {
            &mut self.dub
        } else {
            &mut self.sub
        };
        bucket.insert(key, href.clone());
    }

    pub fn is_empty(&self) -> bool {
        self.sub.is_empty() && self.dub.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(resolution: &str, audio: &str, src: &str) -> StreamSource {
        StreamSource {
            resolution: Some(resolution.to_string()),
            audio: Some(audio.to_string()),
            src: Some(src.to_string()),
        }
    }

    fn download(label: &str, href: &str) -> DownloadSource {
        DownloadSource {
            label: Some(label.to_string()),
            href: Some(href.to_string()),
        }
    }

    #[test]
    fn test_stream_jpn_buckets_as_sub() {
        let mut bundle = LinkBundle::default();
        bundle.add_stream(&stream("720", "jpn", "https://kwik.si/a"));
        assert_eq!(bundle.sub.get("720p").unwrap(), "https://kwik.si/a");
        assert!(bundle.dub.is_empty());
    }

    #[test]
    fn test_stream_eng_buckets_as_dub() {
        let mut bundle = LinkBundle::default();
        bundle.add_stream(&stream("720", "eng", "https://kwik.si/b"));
        assert_eq!(bundle.dub.get("720p").unwrap(), "https://kwik.si/b");
        assert!(bundle.sub.is_empty());
    }

    #[test]
    fn test_stream_unknown_audio_is_dropped() {
        let mut bundle = LinkBundle::default();
        bundle.add_stream(&stream("1080", "spa", "https://kwik.si/c"));
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_stream_uncommon_resolution_carried_through() {
        let mut bundle = LinkBundle::default();
        bundle.add_stream(&stream("540", "jpn", "https://kwik.si/d"));
        assert!(bundle.sub.contains_key("540p"));
    }

    #[test]
    fn test_download_eng_label_buckets_as_dub() {
        let mut bundle = LinkBundle::default();
        bundle.add_download(&download("1080p ENG", "https://pahe.win/x"));
        assert_eq!(bundle.dub.get("1080p_download").unwrap(), "https://pahe.win/x");
    }

    #[test]
    fn test_download_plain_label_buckets_as_sub() {
        let mut bundle = LinkBundle::default();
        bundle.add_download(&download("480p", "https://pahe.win/y"));
        assert_eq!(bundle.sub.get("480p_download").unwrap(), "https://pahe.win/y");
    }

    #[test]
    fn test_download_without_quality_is_dropped() {
        let mut bundle = LinkBundle::default();
        bundle.add_download(&download("Mirror (fast)", "https://pahe.win/z"));
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let mut bundle = LinkBundle::default();
        bundle.add_stream(&stream("720", "jpn", "first"));
        bundle.add_stream(&stream("720", "jpn", "second"));
        assert_eq!(bundle.sub.get("720p").unwrap(), "second");
    }

    #[test]
    fn test_incomplete_entries_are_dropped() {
        let mut bundle = LinkBundle::default();
        bundle.add_stream(&StreamSource {
            resolution: Some("720".into()),
            audio: None,
            src: Some("u".into()),
        });
        bundle.add_download(&DownloadSource {
            label: Some("720p".into()),
            href: None,
        });
        assert!(bundle.is_empty());
    }
}
