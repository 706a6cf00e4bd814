/*!
 * Tests for error types
 */

use postmill::errors::{AppError, ProviderError};

#[test]
fn test_provider_error_display_shouldIncludeDetails() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "unavailable".to_string(),
    };
    assert_eq!(error.to_string(), "API responded with error: 503 - unavailable");
    assert_eq!(ProviderError::Timeout(250).to_string(), "Request timed out after 250 ms");
}

#[test]
fn test_provider_error_is_retryable_shouldSeparateTransientErrors() {
    assert!(ProviderError::Timeout(10).is_retryable());
    assert!(ProviderError::RateLimitExceeded("slow down".to_string()).is_retryable());
    assert!(ProviderError::ConnectionError("reset".to_string()).is_retryable());
    assert!(ProviderError::ApiError { status_code: 500, message: String::new() }.is_retryable());
    assert!(!ProviderError::ApiError { status_code: 400, message: String::new() }.is_retryable());
    assert!(!ProviderError::ParseError("bad".to_string()).is_retryable());
}

#[test]
fn test_app_error_from_conversions_shouldWrapSources() {
    let provider: AppError = ProviderError::ParseError("bad".to_string()).into();
    assert!(matches!(provider, AppError::Provider(_)));

    let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
    assert!(matches!(io, AppError::File(_)));

    let other: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(other.to_string(), "Unknown error: boom");
}
