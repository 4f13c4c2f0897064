//! Nominatim Geocoding Client
//!
//! A Rust client for the [Nominatim](https://nominatim.org/) search and reverse
//! geocoding APIs. Every call is a single request with a bounded timeout; no
//! caching or retrying happens here.

mod client;
mod error;
mod types;

pub use client::NominatimClient;
pub use error::{NominatimError, Result};
pub use types::SearchResult;
