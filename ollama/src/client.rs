//! Generation client trait and the Ollama implementation.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::OllamaConfig;
use crate::error::{GenerationError, Result};

/// Completion returned when the backend omits the `response` field.
pub const NO_RESPONSE: &str = "No response from model.";

/// Turns a prompt into generated text.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Non-streaming client for `POST /api/generate`.
pub struct OllamaClient {
    config: OllamaConfig,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Self {
        let config = OllamaConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(OllamaConfig::default())
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

#[async_trait]
impl GenerationClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
            },
        };

        debug!(
            "Generating with model {} ({} prompt chars)",
            self.config.model,
            prompt.len()
        );

        let response = self
            .client
            .post(format!("{}/api/generate", self.config.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!("Ollama returned {status}");
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        Ok(parsed.response.unwrap_or_else(|| NO_RESPONSE.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            model: "llama3",
            prompt: "hi",
            stream: false,
            options: GenerateOptions { temperature: 0.5 },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "model": "llama3",
                "prompt": "hi",
                "stream": false,
                "options": { "temperature": 0.5 }
            })
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client =
            OllamaClient::new(OllamaConfig::default().with_base_url("http://ollama:11434/"));
        assert_eq!(client.config().base_url, "http://ollama:11434");
    }

    #[test]
    fn test_status_error_message() {
        let error = GenerationError::Status {
            status: 500,
            body: "model not loaded".to_string(),
        };
        assert_eq!(error.to_string(), "500: model not loaded");
    }
}
