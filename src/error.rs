use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("api key rejected: {0}")]
    Auth(String),

    #[error("network error calling {path}: {source}")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("http {status} from {path}")]
    Status { path: String, status: u16 },

    #[error("rate limited on {path}: {detail}")]
    RateLimited { path: String, detail: String },

    /// Envelope `errors` such as bad parameters or plan restrictions.
    #[error("upstream rejected {path}: {detail}")]
    Upstream { path: String, detail: String },

    #[error("unexpected response from {path}: {detail}")]
    Parse { path: String, detail: String },

    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }

    /// Network errors, rate limits, 429 and 5xx may succeed on a later try.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Network { .. } | ApiError::RateLimited { .. } => true,
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub(crate) fn parse(path: &str, detail: impl Into<String>) -> Self {
        ApiError::Parse {
            path: path.to_string(),
            detail: detail.into(),
        }
    }
}
