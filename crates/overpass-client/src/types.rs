//! Data types for Overpass API JSON responses

use serde::Deserialize;
use std::collections::BTreeMap;

/// Top-level `[out:json]` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Set by the server when a query ran out of time or memory
    #[serde(default)]
    pub remark: Option<String>,
}

/// OSM element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
    #[serde(other)]
    Other,
}

/// Centroid computed by `out center;`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

/// A single OSM element
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Element {
    /// Tag value by key
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// `(latitude, longitude)`: own coordinate for nodes, centroid otherwise
    pub fn position(&self) -> Option<(f64, f64)> {
        match self.kind {
            ElementKind::Node => Some((self.lat?, self.lon?)),
            _ => self.center.map(|c| (c.lat, c.lon)),
        }
    }
}
