//! AI provider integrations

pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

use crate::roast::{Language, RoastIntensity, RoastResponse, UploadedFile};

pub use gemini::{GeminiConfig, GeminiProvider};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("No response from AI")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A model that can turn an uploaded resume into a roast
#[async_trait]
pub trait RoastProvider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Send one roast request; a single attempt, never retried
    async fn roast(
        &self,
        file: &UploadedFile,
        intensity: RoastIntensity,
        language: Language,
    ) -> Result<RoastResponse, ProviderError>;
}

/// Parse the model's JSON text into a roast
///
/// Blank text is `EmptyResponse`; anything that is not exactly the expected
/// shape is `InvalidResponse`.
pub fn parse_roast(text: &str) -> Result<RoastResponse, ProviderError> {
    if text.trim().is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    serde_json::from_str(text)
        .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse roast: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roast() {
        let roast = parse_roast(
            r#"{"oneLiner":"Times New Roman called, it wants its dignity back.","sections":[{"title":"Design Disaster","content":["Three fonts","Clip art"]}],"score":17}"#,
        )
        .unwrap();
        assert_eq!(roast.score, 17);
        assert_eq!(roast.sections[0].title, "Design Disaster");
    }

    #[test]
    fn test_parse_roast_empty() {
        assert!(matches!(parse_roast(""), Err(ProviderError::EmptyResponse)));
        assert!(matches!(parse_roast("  \n"), Err(ProviderError::EmptyResponse)));
    }

    #[test]
    fn test_parse_roast_rejects_partial() {
        // missing score
        let err = parse_roast(r#"{"oneLiner":"meh","sections":[]}"#).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));

        let err = parse_roast("Your resume is bad.").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));

        let err = parse_roast(r#"{"oneLiner":"meh","sections":[],"score":"forty"}"#).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
