use reqwest::StatusCode;
use thiserror::Error;

/// Failures raised while talking to a price API.
///
/// `Transport`, `Status` and `RateLimited` describe the HTTP exchange itself;
/// `UnknownSymbol`, `Decode` and `Empty` mean the exchange succeeded but the
/// data asked for is not there.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("rate limited (HTTP {status})")]
    RateLimited { status: StatusCode },

    #[error("unknown symbol {0}")]
    UnknownSymbol(String),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("empty response from {0}")]
    Empty(&'static str),
}

impl FetchError {
    pub fn is_data_absent(&self) -> bool {
        matches!(
            self,
            FetchError::UnknownSymbol(_) | FetchError::Decode(_) | FetchError::Empty(_)
        )
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
