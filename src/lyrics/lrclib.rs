//! LRCLIB API client
//!
//! LRCLIB is a free lyrics API that provides synchronized (LRC format) lyrics.
//! API Documentation: https://lrclib.net/docs
//!
//! Public calls never fail: transport and decode errors are logged and turn
//! into an empty result.

use crate::config::LrclibConfig;
use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};

/// A track as returned by LRCLIB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: i64,
    pub track_name: String,
    pub artist_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub album_name: String,
    /// Nominal duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub instrumental: bool,
    #[serde(default)]
    pub plain_lyrics: Option<String>,
    #[serde(default)]
    pub synced_lyrics: Option<String>,
}

impl Track {
    pub fn has_lyrics(&self) -> bool {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.synced_lyrics) || present(&self.plain_lyrics)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// LRCLIB API client
#[derive(Debug, Clone)]
pub struct LrclibClient {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    const USER_AGENT: &'static str = concat!("lyrasync/", env!("CARGO_PKG_VERSION"));

    /// Create a new LRCLIB client
    pub fn new(cfg: &LrclibConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build lrclib http client")?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search tracks by free text. Empty on any failure.
    pub async fn search(&self, query: &str) -> Vec<Track> {
        match self.try_search(query).await {
            Ok(tracks) => {
                tracing::debug!(query, results = tracks.len(), "lrclib search");
                tracks
            }
            Err(e) => {
                tracing::warn!(query, "lrclib search failed: {e:#}");
                Vec::new()
            }
        }
    }

    /// Get a single track by artist and title. `None` on any failure.
    pub async fn fetch(&self, artist: &str, title: &str) -> Option<Track> {
        match self.try_fetch(artist, title).await {
            Ok(track) => track,
            Err(e) => {
                tracing::warn!(artist, title, "lrclib fetch failed: {e:#}");
                None
            }
        }
    }

    async fn try_search(&self, query: &str) -> anyhow::Result<Vec<Track>> {
        let url = format!("{}/search?q={}", self.base_url, urlencoding::encode(query));

        let response = self.client.get(&url).send().await.context("send search")?;
        if !response.status().is_success() {
            anyhow::bail!("LRCLIB search error: {}", response.status());
        }
        response.json().await.context("decode search results")
    }

    async fn try_fetch(&self, artist: &str, title: &str) -> anyhow::Result<Option<Track>> {
        let url = format!(
            "{}/get?artist_name={}&track_name={}",
            self.base_url,
            urlencoding::encode(artist),
            urlencoding::encode(title)
        );

        let response = self.client.get(&url).send().await.context("send get")?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("LRCLIB API error: {}", response.status());
        }
        let track: Track = response.json().await.context("decode track")?;
        Ok(Some(track))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 3396226,
        "trackName": "I Want to Live",
        "artistName": "Borislav Slavov",
        "albumName": null,
        "duration": 233,
        "instrumental": false,
        "plainLyrics": "I feel your breath upon my neck",
        "syncedLyrics": "[00:17.12] I feel your breath upon my neck"
    }"#;

    #[test]
    fn test_track_from_lrclib_json() {
        let track: Track = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(track.id, 3396226);
        assert_eq!(track.track_name, "I Want to Live");
        assert_eq!(track.album_name, "");
        assert_eq!(track.duration, Some(233.0));
        assert!(!track.instrumental);
        assert!(track.has_lyrics());
    }

    #[test]
    fn test_track_minimal_json() {
        let track: Track =
            serde_json::from_str(r#"{"id":1,"trackName":"t","artistName":"a","syncedLyrics":null}"#)
                .unwrap();
        assert_eq!(track.duration, None);
        assert!(!track.has_lyrics());
    }

    fn unreachable_client() -> LrclibClient {
        // Port 9 (discard) on loopback refuses connections immediately.
        LrclibClient::new(&LrclibConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            timeout_secs: 2,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_failure_returns_empty() {
        assert!(unreachable_client().search("anything").await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_returns_none() {
        assert!(unreachable_client().fetch("artist", "title").await.is_none());
    }
}
