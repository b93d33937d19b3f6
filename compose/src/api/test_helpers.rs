//! Test helpers for the Compose API

#[cfg(test)]
pub fn create_test_client(url: &str) -> super::Client {
    super::Client::new(url, "test-token").unwrap()
}

/// Retry settings that keep failure-path tests fast.
#[cfg(test)]
pub fn fast_retry_config() -> super::RetryConfig {
    super::RetryConfig {
        max_retries: 2,
        initial_backoff_ms: 1,
        max_backoff_ms: 5,
        timeout_seconds: 5,
    }
}

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_api_error_formatting() {
        use std::collections::HashMap;

        let mut field_errors = HashMap::new();
        field_errors.insert("ip".to_string(), vec!["is invalid".to_string()]);

        let details = ApiErrorDetails {
            errors: Some(vec!["general error".to_string()]),
            field_errors: Some(field_errors),
        };

        let error = ApiError::ApiError {
            status: 400,
            message: "Bad Request".to_string(),
            details: Some(Box::new(details)),
        };

        let error_str = error.to_string();
        assert!(error_str.contains("HTTP 400"));
        assert!(error_str.contains("Bad Request"));
        assert!(!error.is_not_found());
    }
}
