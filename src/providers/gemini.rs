//! Google Gemini provider
//!
//! Uses the `generateContent` REST endpoint with structured output: the
//! resume travels as inline data, and the response is constrained by a
//! JSON schema so the reply can be parsed strictly.
//!
//! # Configuration
//!
//! ```toml
//! [llm]
//! model = "gemini-2.5-flash"
//! endpoint = "https://generativelanguage.googleapis.com/v1beta"
//! api_key_env = "GEMINI_API_KEY"
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::{prompts, Config, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::roast::{Language, RoastIntensity, RoastResponse, UploadedFile};

use super::{parse_roast, ProviderError, RoastProvider};

/// generateContent request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    InlineData(InlineData),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

/// generateContent response body
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Error response from API
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Schema the model's JSON reply must satisfy
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "oneLiner": { "type": "STRING" },
            "sections": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "content": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        }
                    },
                    "required": ["title", "content"]
                }
            },
            "score": { "type": "INTEGER" }
        },
        "required": ["oneLiner", "sections", "score"]
    })
}

/// Gemini provider configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL for the API
    pub base_url: String,
    /// API key; checked when a request is made, not at startup
    pub api_key: Option<String>,
    /// Model to use
    pub model: String,
    /// Request timeout; transport default when absent
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }
}

impl From<&Config> for GeminiConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.gemini_api_key.clone(),
            model: config.model.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Gemini API provider
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Create a new provider with the given configuration
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    fn build_request(
        file: &UploadedFile,
        intensity: RoastIntensity,
        language: Language,
    ) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part::Text(prompts::build(intensity, language))],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::InlineData(InlineData {
                        mime_type: file.mime_type.clone(),
                        data: file.base64.clone(),
                    }),
                    Part::Text(prompts::USER_INSTRUCTION.to_string()),
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }

    /// Pull the JSON text out of a generateContent reply
    fn extract_text(body: &str) -> Result<String, ProviderError> {
        let reply: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse response: {} - Body: {}", e, body))
        })?;

        let candidate = reply
            .candidates
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            tracing::warn!(finish_reason = ?candidate.finish_reason, "Gemini returned no text");
            return Err(ProviderError::EmptyResponse);
        }

        Ok(text)
    }

    /// Map a non-2xx reply to an error, preferring the API's own message
    fn error_from_status(status: StatusCode, body: &str) -> ProviderError {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(error_resp) => ProviderError::InvalidResponse(format!(
                "API error ({}): {}",
                error_resp.error.status.as_deref().unwrap_or(status.as_str()),
                error_resp.error.message
            )),
            Err(_) => ProviderError::InvalidResponse(format!("HTTP {}: {}", status, body)),
        }
    }
}

#[async_trait]
impl RoastProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn roast(
        &self,
        file: &UploadedFile,
        intensity: RoastIntensity,
        language: Language,
    ) -> Result<RoastResponse, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("gemini API key is not set".to_string()))?;

        let request = Self::build_request(file, intensity, language);

        tracing::debug!(
            model = %self.config.model,
            mime_type = %file.mime_type,
            bytes = file.size,
            %intensity,
            %language,
            "Sending roast request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::error_from_status(status, &body));
        }

        let text = Self::extract_text(&body)?;
        parse_roast(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file() -> UploadedFile {
        UploadedFile {
            name: "resume.png".to_string(),
            base64: "iVBORw0KGgo=".to_string(),
            mime_type: "image/png".to_string(),
            size: 8,
        }
    }

    #[test]
    fn test_request_shape() {
        let request = GeminiProvider::build_request(&sample_file(), RoastIntensity::Spicy, Language::English);
        let value = serde_json::to_value(&request).unwrap();

        let system = value["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
        assert!(system.contains("jaded recruiter"));
        assert!(value["systemInstruction"].get("role").is_none());

        let parts = &value["contents"][0]["parts"];
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "iVBORw0KGgo=");
        assert_eq!(parts[1]["text"], prompts::USER_INSTRUCTION);

        let generation = &value["generationConfig"];
        assert_eq!(generation["responseMimeType"], "application/json");
        assert_eq!(
            generation["responseSchema"]["required"],
            json!(["oneLiner", "sections", "score"])
        );
        assert_eq!(generation["responseSchema"]["properties"]["score"]["type"], "INTEGER");
    }

    #[test]
    fn test_endpoint() {
        let provider = GeminiProvider::new(GeminiConfig::default()).unwrap();
        assert_eq!(
            provider.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"oneLiner\":\"a\","},{"text":"\"sections\":[],\"score\":3}"}]},"finishReason":"STOP"}]}"#;
        let text = GeminiProvider::extract_text(body).unwrap();
        let roast = parse_roast(&text).unwrap();
        assert_eq!(roast.score, 3);
    }

    #[test]
    fn test_extract_text_missing() {
        assert!(matches!(
            GeminiProvider::extract_text(r#"{"candidates":[]}"#),
            Err(ProviderError::EmptyResponse)
        ));
        assert!(matches!(
            GeminiProvider::extract_text(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#),
            Err(ProviderError::EmptyResponse)
        ));
        assert!(matches!(
            GeminiProvider::extract_text("<html>502</html>"),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_error_from_status_uses_api_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        match GeminiProvider::error_from_status(StatusCode::BAD_REQUEST, body) {
            ProviderError::InvalidResponse(msg) => {
                assert_eq!(msg, "API error (INVALID_ARGUMENT): API key not valid")
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let body = r#"{"error":{"message":"quota exhausted"}}"#;
        match GeminiProvider::error_from_status(StatusCode::TOO_MANY_REQUESTS, body) {
            ProviderError::InvalidResponse(msg) => assert_eq!(msg, "API error (429): quota exhausted"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_from_status_falls_back_to_body() {
        match GeminiProvider::error_from_status(StatusCode::BAD_GATEWAY, "<html>upstream down</html>") {
            ProviderError::InvalidResponse(msg) => {
                assert_eq!(msg, "HTTP 502 Bad Gateway: <html>upstream down</html>")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_at_request_time() {
        let provider = GeminiProvider::new(GeminiConfig::default()).unwrap();
        let result = provider
            .roast(&sample_file(), RoastIntensity::Mild, Language::Hindi)
            .await;
        assert!(matches!(result, Err(ProviderError::NotConfigured(_))));
    }

    #[test]
    fn test_config_from_app_config() {
        let config = Config {
            gemini_api_key: Some("k".to_string()),
            model: "gemini-2.5-pro".to_string(),
            base_url: "http://localhost:8080/v1beta/".to_string(),
            timeout_secs: Some(45),
            defaults: Default::default(),
            timings: Default::default(),
        };
        let gemini = GeminiConfig::from(&config);
        assert_eq!(gemini.base_url, "http://localhost:8080/v1beta");
        assert_eq!(gemini.timeout, Some(Duration::from_secs(45)));
        assert_eq!(gemini.api_key.as_deref(), Some("k"));
    }
}
