use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmendError {
    #[error("API key not configured. Run 'amendlaw config set law.key YOUR_KEY' to configure.")]
    NoApiKey,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({code}): {message}")]
    ApiError {
        code: String,
        message: String,
        hint: Option<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("Malformed law document: {0}")]
    MalformedDocument(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimit,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("{0}")]
    Other(String),
}

impl AmendError {
    /// Get user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NoApiKey => Some(
                "Visit https://open.law.go.kr to get your API key. \
                 Then run: amendlaw config set law.key YOUR_KEY"
                    .to_string(),
            ),
            Self::ApiError { hint, .. } => hint.clone(),
            Self::Network(_) => Some("Check your internet connection and try again.".to_string()),
            Self::RateLimit => Some("You've made too many requests. Please wait a moment.".to_string()),
            _ => None,
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::ServerError(_) | Self::RateLimit)
    }
}

pub type Result<T> = std::result::Result<T, AmendError>;
