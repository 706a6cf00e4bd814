use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest, TranslationResponse};

/// Client for the Google Translate web endpoint (`client=gtx`)
///
/// The endpoint needs no API key and answers with a nested JSON array whose
/// first element holds the translated segments.
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    /// HTTP client for making requests
    client: Client,
    /// Endpoint URL
    endpoint: String,
}

impl GoogleTranslate {
    /// Create a new client for the given endpoint with a request timeout
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the request URL for a translation
    pub fn request_url(&self, request: &TranslationRequest) -> Result<Url, ProviderError> {
        let source = if request.source_language.is_empty() {
            "auto"
        } else {
            request.source_language.as_str()
        };

        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", source),
                ("tl", request.target_language.as_str()),
                ("dt", "t"),
                ("q", request.text.trim()),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", self.endpoint, e)))
    }

    /// Extract the translation from a `translate_a/single` payload
    pub fn parse_payload(payload: &Value) -> Result<TranslationResponse, ProviderError> {
        let segments = payload
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Unexpected translation payload".to_string()))?;

        let text: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        let detected_language = payload.get(2).and_then(Value::as_str).map(str::to_string);

        Ok(TranslationResponse {
            text: text.trim().to_string(),
            detected_language,
        })
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    async fn complete(&self, request: TranslationRequest) -> Result<TranslationResponse, ProviderError> {
        let url = self.request_url(&request)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(0)
            } else if e.is_connect() {
                ProviderError::ConnectionError(e.to_string())
            } else {
                ProviderError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimitExceeded(format!(
                "Google Translate answered {}",
                status
            )));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let parsed = Self::parse_payload(&payload)?;
        debug!(
            "Translated {} chars ({} -> {})",
            request.text.chars().count(),
            request.source_language,
            request.target_language
        );
        Ok(parsed)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.complete(TranslationRequest::new("hello", "en", "fr"))
            .await
            .map(|_| ())
    }

    fn name(&self) -> &str {
        "Google Translate"
    }
}
