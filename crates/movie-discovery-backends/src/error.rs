use thiserror::Error;

/// Authentication failures, surfaced to callers as result values and
/// never propagated past the session layer as anything else.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account email is not confirmed yet")]
    EmailNotConfirmed,
    #[error("authentication service error ({status}): {message}")]
    Service { status: u16, message: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("authentication service is not configured")]
    NotConfigured,
}

/// Remote row-store failures. The sync engine absorbs these: it logs and
/// reverts the optimistic change, nothing reaches the user.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store error ({status}): {message}")]
    Service { status: u16, message: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("store is not configured")]
    NotConfigured,
}

/// Generative content service failures. The recommendation pipeline
/// absorbs these and hands back an empty result.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("generative service API key is not configured")]
    MissingApiKey,
    #[error("generative service error ({status}): {message}")]
    Service { status: u16, message: String },
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
