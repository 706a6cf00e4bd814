/*!
 * Provider implementations for machine translation services.
 *
 * This module contains client implementations for the translation backends:
 * - Google: the public `translate_a/single` web endpoint
 * - Mock: deterministic provider used by tests and offline runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single text to translate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// The text to translate
    pub text: String,
    /// Source language code, or `auto` for detection
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

impl TranslationRequest {
    pub fn new(text: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

/// Provider response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResponse {
    /// The translated text
    pub text: String,
    /// Language reported by the provider, when it detected one
    pub detected_language: Option<String>,
}

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a translation request
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<TranslationResponse, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: TranslationRequest) -> Result<TranslationResponse, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Display name used in logs
    fn name(&self) -> &str;
}

pub mod google;
pub mod mock;
