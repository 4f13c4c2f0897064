//! Rust client for the OpenStreetMap [Overpass API](https://wiki.openstreetmap.org/wiki/Overpass_API)
//!
//! Only the query shape the scoring pipeline needs is covered: every node, way
//! and relation carrying a given tag within a radius of a point, returned with
//! `out center;` so that ways and relations come back with a centroid.
//!
//! # Example
//!
//! ```no_run
//! use overpass_client::OverpassClient;
//!
//! # async fn example() -> Result<(), overpass_client::OverpassError> {
//! let client = OverpassClient::new()?;
//! let elements = client.around("amenity", 38.7223, -9.1393, 500).await?;
//! for element in elements {
//!     println!("{:?} {:?}", element.tag("name"), element.position());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod query;
mod types;

pub use client::OverpassClient;
pub use error::{OverpassError, Result};
pub use query::tagged_around_query;
pub use types::{Center, Element, ElementKind, OverpassResponse};
