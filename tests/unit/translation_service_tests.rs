/*!
 * Tests for the translation service
 */

use std::sync::Arc;

use postmill::app_config::{TranslationConfig, TranslationProvider};
use postmill::errors::ProviderError;
use postmill::providers::mock::MockProvider;
use postmill::translation::{TranslationCache, TranslationService, Translator};

use crate::common;

#[tokio::test]
async fn test_translate_withWorkingProvider_shouldCacheResult() {
    let provider = MockProvider::working();
    let service = common::mock_service(provider.clone());

    assert_eq!(service.translate("你好", "en", Some("zh")).await, "[en] 你好");
    assert_eq!(service.translate("你好", "en", Some("zh")).await, "[en] 你好");

    assert_eq!(provider.request_count(), 1);
    assert_eq!(service.request_count(), 1);
}

#[tokio::test]
async fn test_translate_withDisabledCache_shouldCallProviderEachTime() {
    let provider = MockProvider::working();
    let service = TranslationService::new(
        Arc::new(provider.clone()),
        common::fast_options(),
        TranslationCache::new(false),
    );

    service.translate("你好", "en", None).await;
    service.translate("你好", "en", None).await;

    assert_eq!(provider.request_count(), 2);
}

#[tokio::test]
async fn test_translate_withFailingProvider_shouldNotCacheFallback() {
    let provider = MockProvider::failing();
    let service = common::mock_service(provider.clone());

    assert_eq!(service.translate("你好", "en", None).await, "你好");
    assert_eq!(service.translate("你好", "en", None).await, "你好");

    // One retry per call
    assert_eq!(provider.request_count(), 4);
    assert_eq!(service.failure_count(), 2);
    assert!(service.cache.is_empty());
}

#[tokio::test]
async fn test_try_translate_withNonRetryableError_shouldStopImmediately() {
    #[derive(Debug)]
    struct Unparsable;

    #[async_trait::async_trait]
    impl postmill::providers::Provider for Unparsable {
        async fn complete(
            &self,
            _request: postmill::providers::TranslationRequest,
        ) -> Result<postmill::providers::TranslationResponse, ProviderError> {
            Err(ProviderError::ParseError("garbage".to_string()))
        }

        async fn test_connection(&self) -> Result<(), ProviderError> {
            Ok(())
        }

        fn name(&self) -> &str {
            "Unparsable"
        }
    }

    let service = TranslationService::new(Arc::new(Unparsable), common::fast_options(), TranslationCache::new(true));
    let result = service.try_translate("你好", None, "en").await;

    assert!(matches!(result, Err(ProviderError::ParseError(_))));
    assert_eq!(service.request_count(), 1);
}

#[tokio::test]
async fn test_translate_concurrently_shouldShareCounters() {
    let provider = MockProvider::working();
    let service = Arc::new(common::mock_service(provider.clone()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move { service.translate(&format!("第{}段", i), "en", None).await })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap(), format!("[en] 第{}段", i));
    }
    assert_eq!(provider.request_count(), 8);
    assert_eq!(service.cache.len(), 8);
}

#[tokio::test]
async fn test_from_config_withPassthrough_shouldReturnInput() {
    let config = TranslationConfig {
        provider: TranslationProvider::Passthrough,
        ..TranslationConfig::default()
    };
    let service = TranslationService::from_config(&config).unwrap();

    assert_eq!(service.translate("你好", "en", None).await, "你好");
    assert!(service.test_connection().await.is_ok());
}
