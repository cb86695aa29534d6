use reqwest::Client;
use serde::Deserialize;

use crate::{error::Error, llm::model::TextModel};

/// Google Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("No text in response: {reason}")]
    EmptyResponse { reason: String },
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::ModelConfigError("Gemini API key is empty".into()));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| Error::ModelConfigError(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            model: Self::DEFAULT_MODEL.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub async fn send_generate_request(
        &self,
        prompt: &str,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let body = serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ]
        });

        let resp = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, message });
        }

        Ok(resp.json::<GenerateContentResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<String>();

        (!text.is_empty()).then_some(text)
    }
}

impl TextModel for GeminiClient {
    const DEFAULT_MODEL: &'static str = "gemini-1.5-pro";

    type Error = GeminiError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let response = self
            .send_generate_request(prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, model = %self.model, "Failed to generate content"))?;

        response.text().ok_or_else(|| {
            let reason = response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
                .or_else(|| {
                    response
                        .candidates
                        .first()
                        .and_then(|c| c.finish_reason.clone())
                })
                .unwrap_or_else(|| "no candidates returned".into());

            GeminiError::EmptyResponse { reason }
        })
    }
}
