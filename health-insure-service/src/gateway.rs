use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{
    config::Config,
    error::{Result, ServiceError},
};

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

/// Turns a prompt into model text. Handlers only ever see this trait.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// With `structured_output` set the remote side is asked for JSON text.
    /// That request is best-effort and is not validated here.
    async fn generate(&self, prompt: &str, structured_output: bool) -> Result<String>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<RemoteError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteError {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: RemoteError,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str, structured_output: bool) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: structured_output.then_some(GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
            }),
        }
    }
}

/// Client for the Gemini `generateContent` endpoint. One attempt per call.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ServiceError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.api_base, config.model
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AiGateway for GeminiClient {
    async fn generate(&self, prompt: &str, structured_output: bool) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::Configuration("GEMINI_API_KEY".to_string()))?;

        info!(
            prompt_length = %prompt.len(),
            structured_output = %structured_output,
            "Calling Gemini API"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest::new(prompt, structured_output))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, timeout = %e.is_timeout(), "Gemini API unreachable");
                ServiceError::UpstreamUnavailable(e.to_string())
            })?;

        let status = response.status();
        let raw = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ServiceError::UpstreamUnavailable(e.to_string())
            } else {
                ServiceError::Upstream(format!("failed to read response body: {e}"))
            }
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .ok()
                .and_then(|envelope| envelope.error.message)
                .unwrap_or_else(|| format!("request failed with status {status}"));
            error!(status = %status.as_u16(), error = %message, "Gemini API returned an error");
            return Err(ServiceError::Upstream(message));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| ServiceError::Upstream(format!("unreadable response body: {e}")))?;

        extract_candidate_text(parsed)
    }
}

fn extract_candidate_text(response: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(match response.error {
            Some(remote) => ServiceError::Upstream(
                remote.message.unwrap_or_else(|| "Unknown error".to_string()),
            ),
            None => ServiceError::UpstreamProtocol("response has no candidates".to_string()),
        });
    };

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        return Err(ServiceError::UpstreamProtocol(
            "first candidate has no text content".to_string(),
        ));
    }

    info!(response_length = %text.len(), "Gemini API call completed");
    Ok(text)
}
