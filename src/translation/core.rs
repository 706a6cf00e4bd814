/*!
 * Core translation service implementation.
 *
 * `TranslationService` sits between the document translator and a
 * `Provider`: it consults the cache, bounds every provider call with a
 * timeout, retries transient failures with exponential backoff and, when
 * every attempt fails, hands back the untranslated text.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::ProviderError;
use crate::providers::google::GoogleTranslate;
use crate::providers::mock::MockProvider;
use crate::providers::{Provider, TranslationRequest};

use super::Translator;
use super::cache::{AUTO_LANGUAGE, TranslationCache};

/// Options for customizing the translation process
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    /// Upper bound for a single provider call
    pub timeout: Duration,

    /// Extra attempts after the first failed call
    pub retry_count: u32,

    /// Base backoff, doubled on each retry
    pub retry_backoff_ms: u64,

    /// Maximum number of concurrent requests per document
    pub max_concurrent_requests: usize,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry_count: 3,
            retry_backoff_ms: 1000,
            max_concurrent_requests: 4,
        }
    }
}

impl From<&TranslationConfig> for TranslationOptions {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            retry_count: config.retry_count,
            retry_backoff_ms: config.retry_backoff_ms,
            max_concurrent_requests: config.concurrent_requests.max(1),
        }
    }
}

/// Main translation service for post documents
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// Provider implementation
    provider: Arc<dyn Provider>,

    /// Translation options
    pub options: TranslationOptions,

    /// Translation cache for storing and retrieving translations
    pub cache: TranslationCache,

    /// Provider calls issued, retries included
    requests: Arc<AtomicUsize>,

    /// Texts that fell back to the original after all attempts failed
    failures: Arc<AtomicUsize>,
}

impl TranslationService {
    /// Create a service over an existing provider
    pub fn new(provider: Arc<dyn Provider>, options: TranslationOptions, cache: TranslationCache) -> Self {
        Self {
            provider,
            options,
            cache,
            requests: Arc::new(AtomicUsize::new(0)),
            failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create the service described by the configuration
    pub fn from_config(config: &TranslationConfig) -> Result<Self> {
        let provider: Arc<dyn Provider> = match config.provider {
            ConfigTranslationProvider::Google => {
                Arc::new(GoogleTranslate::new(config.endpoint.clone(), config.timeout_secs))
            }
            ConfigTranslationProvider::Passthrough => Arc::new(MockProvider::identity()),
        };

        Ok(Self::new(
            provider,
            TranslationOptions::from(config),
            TranslationCache::new(config.enable_cache),
        ))
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }

    /// Number of provider calls issued so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    /// Number of texts returned untranslated because every attempt failed
    pub fn failure_count(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Translate a single text, surfacing the provider error after the last attempt
    pub async fn try_translate(
        &self,
        text: &str,
        source_language: Option<&str>,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(text.to_string());
        }

        if let Some(cached) = self.cache.get(trimmed, source_language, target_language) {
            return Ok(cached);
        }

        let source = source_language
            .filter(|lang| !lang.trim().is_empty())
            .unwrap_or(AUTO_LANGUAGE);
        let request = TranslationRequest::new(trimmed, source, target_language);

        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.options.retry_count {
            self.requests.fetch_add(1, Ordering::Relaxed);

            let outcome = tokio::time::timeout(self.options.timeout, self.provider.complete(request.clone())).await;
            let error = match outcome {
                Ok(Ok(response)) => {
                    let translated = response.text.trim();
                    if translated.is_empty() {
                        debug!("{} returned an empty translation, keeping source text", self.provider.name());
                        return Ok(text.to_string());
                    }
                    self.cache.store(trimmed, source_language, target_language, translated);
                    return Ok(translated.to_string());
                }
                Ok(Err(e)) => e,
                Err(_) => ProviderError::Timeout(self.options.timeout.as_millis() as u64),
            };

            debug!(
                "{} attempt {}/{} failed: {}",
                self.provider.name(),
                attempt + 1,
                self.options.retry_count + 1,
                error
            );

            let retryable = error.is_retryable();
            last_error = Some(error);
            if !retryable {
                break;
            }

            attempt += 1;

            // If we have more retries left, wait with exponential backoff
            if attempt <= self.options.retry_count {
                let backoff_ms = self.options.retry_backoff_ms.saturating_mul(1u64 << (attempt - 1).min(16));
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed(format!(
                "Translation failed after {} attempts",
                self.options.retry_count + 1
            ))
        }))
    }
}

#[async_trait]
impl Translator for TranslationService {
    async fn translate(&self, text: &str, target_language: &str, source_language: Option<&str>) -> String {
        match self.try_translate(text, source_language, target_language).await {
            Ok(translated) => translated,
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                warn!("Keeping untranslated text after provider failure: {}", e);
                text.to_string()
            }
        }
    }
}
