//! Provider-level errors

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Unknown resource: {0}")]
    ResourceNotFound(String),

    #[error("Provider not configured")]
    ProviderNotConfigured,
}

pub type Result<T> = std::result::Result<T, ProviderError>;
