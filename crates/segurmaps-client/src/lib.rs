//! Client for the SegurMaps map extraction API
//!
//! SegurMaps publishes the CIRAC flood-risk index as a map layer. Posting a
//! GeoJSON point to `/api/v2/extract` returns the layer's attributes at that
//! point; the risk class is the `ridx` attribute (1 = very low … 5 = very high).

mod client;
mod error;
mod types;

pub use client::{SegurmapsClient, SegurmapsOptions};
pub use error::{Result, SegurmapsError};
pub use types::{extract_risk_index, PointGeometry};
