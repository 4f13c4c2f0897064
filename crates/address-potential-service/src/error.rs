//! Startup errors for the address-potential service

use std::fmt;

#[derive(Debug)]
pub enum ServiceError {
    /// Missing or invalid environment setting
    Config(String),
    /// An upstream client could not be built
    Client(Box<dyn std::error::Error + Send + Sync>),
    /// Binding or serving the HTTP listener failed
    Io(Box<std::io::Error>),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ServiceError::Client(err) => write!(f, "Client setup error: {}", err),
            ServiceError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Client(err) => Some(err.as_ref()),
            ServiceError::Io(err) => Some(err.as_ref()),
            ServiceError::Config(_) => None,
        }
    }
}

impl From<nominatim_client::NominatimError> for ServiceError {
    fn from(err: nominatim_client::NominatimError) -> Self {
        ServiceError::Client(Box::new(err))
    }
}

impl From<bigdatacloud_client::BigDataCloudError> for ServiceError {
    fn from(err: bigdatacloud_client::BigDataCloudError) -> Self {
        ServiceError::Client(Box::new(err))
    }
}

impl From<overpass_client::OverpassError> for ServiceError {
    fn from(err: overpass_client::OverpassError) -> Self {
        ServiceError::Client(Box::new(err))
    }
}

impl From<segurmaps_client::SegurmapsError> for ServiceError {
    fn from(err: segurmaps_client::SegurmapsError) -> Self {
        ServiceError::Client(Box::new(err))
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Client(Box::new(err))
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for ServiceError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ServiceError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
