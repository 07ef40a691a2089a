//! Gemini `generateContent` client

use super::{ANALYSIS_FALLBACK, RECOMMEND_FALLBACK};
use crate::config::AnalysisConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    language: String,
    api_key: Option<String>,
}

impl AnalysisClient {
    pub fn new(cfg: &AnalysisConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build analysis http client")?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            language: cfg.language.clone(),
            api_key: cfg.resolved_api_key(),
        })
    }

    /// Interpret the meaning and emotional context of a song
    pub async fn analyze(&self, lyrics: &str, song: &str, artist: &str) -> String {
        let prompt = format!(
            "Explain the deeper meaning and emotional context of the song \"{song}\" by {artist}. \
             Here are the lyrics:\n\n{lyrics}"
        );
        let system = format!(
            "You are an expert musicologist with great lyrical sensitivity. \
             Answer concisely and poetically, in {}.",
            self.language
        );
        match self.generate(&prompt, Some(&system)).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(song, artist, "lyrics analysis failed: {e:#}");
                ANALYSIS_FALLBACK.to_string()
            }
        }
    }

    /// Five songs similar in style or theme
    pub async fn recommend(&self, song: &str, artist: &str) -> String {
        let prompt = format!(
            "Based on the song \"{song}\" by {artist}, recommend 5 songs similar in style or theme. \
             Only return the song and artist names as a list. Write in {}.",
            self.language
        );
        match self.generate(&prompt, None).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(song, artist, "recommendations failed: {e:#}");
                RECOMMEND_FALLBACK.to_string()
            }
        }
    }

    async fn generate(&self, prompt: &str, system: Option<&str>) -> anyhow::Result<String> {
        let key = self
            .api_key
            .as_deref()
            .context("no API key configured (set analysis.api_key or GEMINI_API_KEY)")?;

        let body = GenerateRequest {
            system_instruction: system.map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await
            .context("send generateContent")?;

        if !response.status().is_success() {
            anyhow::bail!("generateContent error: {}", response.status());
        }

        let parsed: GenerateResponse = response.json().await.context("decode generateContent")?;
        parsed.text().context("empty model answer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>) -> AnalysisClient {
        AnalysisClient::new(&AnalysisConfig {
            api_key: api_key.map(str::to_string),
            base_url: "http://127.0.0.1:9/v1beta".to_string(),
            timeout_secs: 2,
            ..AnalysisConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_response_text_joins_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}],"role":"model"}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_response_without_text() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(parsed.text(), None);
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#).unwrap();
        assert_eq!(parsed.text(), None);
    }

    #[test]
    fn test_request_shape() {
        let body = GenerateRequest {
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part { text: "sys" }],
            }),
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: "hi" }],
            }],
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["systemInstruction"]["parts"][0]["text"], "sys");
        assert!(v["systemInstruction"].get("role").is_none());
        assert_eq!(v["contents"][0]["role"], "user");
        assert_eq!(v["contents"][0]["parts"][0]["text"], "hi");
    }

    #[tokio::test]
    async fn test_transport_failure_returns_fallback() {
        let c = client(Some("key"));
        assert_eq!(c.analyze("la la", "Song", "Artist").await, ANALYSIS_FALLBACK);
        assert_eq!(c.recommend("Song", "Artist").await, RECOMMEND_FALLBACK);
    }
}
