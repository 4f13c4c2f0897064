//! Points of interest around an address

use std::collections::HashSet;

use crate::types::{Coordinates, PoiSummary, PointOfInterest};

/// Search radius around the geocoded address, in meters
pub const SEARCH_RADIUS_M: u32 = 500;

/// Amenity feature as reported by a spatial index, before filtering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmenityFeature {
    pub name: Option<String>,
    pub amenity: Option<String>,
    pub position: Option<Coordinates>,
}

/// Build the POI list: nameless or unpositioned features are dropped, and
/// features at an already-seen exact position are skipped
pub fn summarize<I>(features: I) -> PoiSummary
where
    I: IntoIterator<Item = AmenityFeature>,
{
    let mut seen = HashSet::new();
    let mut summary = PoiSummary::default();

    for feature in features {
        let Some(name) = feature.name.filter(|name| !name.is_empty()) else {
            continue;
        };
        let Some(position) = feature.position else {
            continue;
        };
        if !seen.insert(position_key(position)) {
            continue;
        }

        let category = feature.amenity.as_deref().map(category_label);
        if let Some(ref category) = category {
            *summary.category_counts.entry(category.clone()).or_insert(0) += 1;
        }

        summary.locations.push(PointOfInterest {
            name,
            category,
            latitude: position.latitude,
            longitude: position.longitude,
        });
    }

    summary.count = summary.locations.len();
    summary
}

/// Exact-equality key; adding 0.0 folds -0.0 into 0.0
fn position_key(position: Coordinates) -> (u64, u64) {
    (
        (position.latitude + 0.0).to_bits(),
        (position.longitude + 0.0).to_bits(),
    )
}

/// `fast_food` -> `Fast food`
pub fn category_label(amenity: &str) -> String {
    let spaced = amenity.replace('_', " ").to_lowercase();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(name: Option<&str>, amenity: &str, lat: f64, lon: f64) -> AmenityFeature {
        AmenityFeature {
            name: name.map(str::to_string),
            amenity: Some(amenity.to_string()),
            position: Some(Coordinates::new(lat, lon)),
        }
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("fast_food"), "Fast food");
        assert_eq!(category_label("cafe"), "Cafe");
        assert_eq!(category_label("PARKING_space"), "Parking space");
        assert_eq!(category_label(""), "");
    }

    #[test]
    fn test_nameless_features_are_discarded() {
        let summary = summarize(vec![
            feature(None, "bench", 38.70, -9.10),
            feature(Some(""), "cafe", 38.71, -9.11),
            feature(Some("Farmácia Estácio"), "pharmacy", 38.72, -9.12),
        ]);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.locations[0].name, "Farmácia Estácio");
        assert_eq!(summary.category_counts.get("Cafe"), None);
    }

    #[test]
    fn test_duplicate_positions_count_once() {
        let summary = summarize(vec![
            feature(Some("Escola A"), "school", 38.7, -9.1),
            feature(Some("Escola A (annex)"), "school", 38.7, -9.1),
            feature(Some("Escola B"), "school", 38.7, -9.2),
        ]);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.locations[0].name, "Escola A");
        assert_eq!(summary.category_counts.get("School"), Some(&2));
    }

    #[test]
    fn test_signed_zero_is_one_position() {
        let summary = summarize(vec![
            feature(Some("Null Island Café"), "cafe", 0.0, 0.0),
            feature(Some("Null Island Bar"), "bar", -0.0, 0.0),
        ]);
        assert_eq!(summary.count, 1);
    }

    #[test]
    fn test_features_without_position_are_discarded() {
        let summary = summarize(vec![AmenityFeature {
            name: Some("Hospital".to_string()),
            amenity: Some("hospital".to_string()),
            position: None,
        }]);
        assert_eq!(summary, PoiSummary::default());
    }

    #[test]
    fn test_category_tally() {
        let summary = summarize(vec![
            feature(Some("A"), "fast_food", 38.1, -9.1),
            feature(Some("B"), "fast_food", 38.2, -9.1),
            feature(Some("C"), "bank", 38.3, -9.1),
            AmenityFeature {
                name: Some("D".to_string()),
                amenity: None,
                position: Some(Coordinates::new(38.4, -9.1)),
            },
        ]);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.category_counts.get("Fast food"), Some(&2));
        assert_eq!(summary.category_counts.get("Bank"), Some(&1));
        assert_eq!(summary.category_counts.values().sum::<usize>(), 3);
        assert!(summary.locations[3].category.is_none());
    }
}
