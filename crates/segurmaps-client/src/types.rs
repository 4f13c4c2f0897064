use serde::Serialize;

/// GeoJSON point geometry; coordinates are `[longitude, latitude]`
#[derive(Debug, Clone, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            kind: "Point",
            coordinates: [longitude, latitude],
        }
    }
}

/// Pull `geojson.features[0].properties.__extract__.ridx` out of an extract response
///
/// Returns `None` when any step of the path is missing. Numeric strings are
/// accepted since some layers serialize attributes as text.
pub fn extract_risk_index(body: &serde_json::Value) -> Option<u8> {
    let ridx = body.pointer("/geojson/features/0/properties/__extract__/ridx")?;
    let value = match ridx {
        serde_json::Value::Number(n) => match n.as_u64() {
            Some(value) => value,
            None => whole_number(n.as_f64()?)?,
        },
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u8::try_from(value).ok()
}

/// Integral floats such as `3.0`; anything with a fraction or out of `u8` range is rejected
fn whole_number(value: f64) -> Option<u64> {
    if value.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&value) {
        Some(value as u64)
    } else {
        None
    }
}
