//! Gemini `generateContent` wire types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

impl GeminiRequest {
    /// Single-turn request carrying one text part.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
pub struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    /// Text of the first candidate, parts joined. `None` when there is no text at all.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    // Absent when the candidate was blocked
    pub content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponseContent {
    #[serde(default)]
    pub parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponsePart {
    pub text: Option<String>,
}
