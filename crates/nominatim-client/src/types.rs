use serde::Deserialize;

/// One candidate from the `/search` endpoint
///
/// Nominatim encodes coordinates as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl SearchResult {
    /// Parsed `(latitude, longitude)`, or `None` if either is missing or not numeric
    pub fn position(&self) -> Option<(f64, f64)> {
        let lat = self.lat.as_deref()?.trim().parse::<f64>().ok()?;
        let lon = self.lon.as_deref()?.trim().parse::<f64>().ok()?;
        Some((lat, lon))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NominatimResponse {
    #[serde(default)]
    pub(crate) address: NominatimAddress,
    pub(crate) error: Option<String>,
}

/// Address levels that can name a municipality, most specific first
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NominatimAddress {
    pub(crate) city: Option<String>,
    pub(crate) town: Option<String>,
    pub(crate) village: Option<String>,
    pub(crate) municipality: Option<String>,
}
