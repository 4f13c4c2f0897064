use std::fmt;

/// Errors from the SegurMaps client
#[derive(Debug)]
pub enum SegurmapsError {
    Http(reqwest::Error),
    Json(serde_json::Error),
    /// Non-success HTTP status; 401 usually means the bearer token expired
    Status(u16),
    /// The bearer token is not a valid header value
    InvalidToken,
}

impl fmt::Display for SegurmapsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "SegurMaps HTTP error: {e}"),
            Self::Json(e) => write!(f, "SegurMaps JSON parse error: {e}"),
            Self::Status(code) => write!(f, "SegurMaps returned status {code}"),
            Self::InvalidToken => write!(f, "SegurMaps token is not a valid header value"),
        }
    }
}

impl std::error::Error for SegurmapsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SegurmapsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<serde_json::Error> for SegurmapsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, SegurmapsError>;
