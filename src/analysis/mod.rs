//! Lyrics interpretation via a generative-text API
//!
//! Like the lyrics client, calls here never fail: anything that goes wrong
//! comes back as a short apology the UI can show as-is.

pub mod gemini;

pub use gemini::AnalysisClient;

pub const ANALYSIS_FALLBACK: &str = "Could not analyze the lyrics right now.";
pub const RECOMMEND_FALLBACK: &str = "Could not fetch recommendations right now.";

/// What the user asked the model for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Meaning,
    Similar,
}

impl AnalysisKind {
    pub fn title(self) -> &'static str {
        match self {
            AnalysisKind::Meaning => "Meaning",
            AnalysisKind::Similar => "Similar songs",
        }
    }
}
