use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::{
    config::GeminiConfig,
    models::gemini::{GeminiRequest, GeminiResponse},
};

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(String),
    #[error("completion service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid completion response: {0}")]
    Decode(String),
    #[error("completion response contained no text")]
    Empty,
}

/// Opaque text completion: prompt in, text out.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    cfg: GeminiConfig,
}

impl GeminiClient {
    pub fn new(cfg: GeminiConfig, http: reqwest::Client) -> Self {
        Self { http, cfg }
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = self
            .cfg
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.cfg.model))
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        debug!("Requesting completion from model {}", self.cfg.model);

        let res = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.cfg.api_key)
            .timeout(self.cfg.timeout)
            .json(&GeminiRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Transport(format!(
                        "timed out after {}s",
                        self.cfg.timeout.as_secs()
                    ))
                } else {
                    CompletionError::Transport(e.to_string())
                }
            })?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(CompletionError::Status { status, body });
        }

        let parsed: GeminiResponse = res
            .json()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;

        parsed.text().ok_or(CompletionError::Empty)
    }
}
