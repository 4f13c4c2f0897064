//! Error types for the Overpass API client

use std::fmt;

/// Errors that can occur when querying an Overpass interpreter
#[derive(Debug)]
pub enum OverpassError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// Failed to parse JSON response
    Json(serde_json::Error),
    /// Non-success HTTP status (429 and 504 are common under load)
    Status(u16),
}

impl fmt::Display for OverpassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "Overpass HTTP error: {}", e),
            Self::Json(e) => write!(f, "Overpass JSON parse error: {}", e),
            Self::Status(code) => write!(f, "Overpass returned status {}", code),
        }
    }
}

impl std::error::Error for OverpassError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for OverpassError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for OverpassError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for Overpass API operations
pub type Result<T> = std::result::Result<T, OverpassError>;
