//! Overpass QL query builders

/// Build a query for all nodes, ways and relations carrying `tag` within
/// `radius_m` meters of the point, with centroids for non-node features
pub fn tagged_around_query(tag: &str, latitude: f64, longitude: f64, radius_m: u32) -> String {
    let around = format!("(around:{radius_m},{latitude},{longitude})");
    format!(
        "[out:json];(node[\"{tag}\"]{around};way[\"{tag}\"]{around};relation[\"{tag}\"]{around};);out center;"
    )
}
