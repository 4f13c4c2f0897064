//! HTTP server exposing the analysis pipeline

use address_potential::{AnalysisError, Analyzer, Coordinates, FailureKind, Stage};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state for the HTTP server
pub struct ServerState {
    pub analyzer: Analyzer,
    /// `"live"` or `"fixed"`, reported by `/health`
    pub risk_mode: &'static str,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(analyzer: Analyzer, risk_mode: &'static str) -> Self {
        Self {
            analyzer,
            risk_mode,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    risk_mode: &'static str,
}

/// Error response for malformed requests
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Body returned when a pipeline stage fails
#[derive(Serialize)]
struct FailureResponse<'a> {
    status: &'static str,
    kind: FailureKind,
    stage: Stage,
    message: &'a str,
    coordinates: Option<Coordinates>,
    municipality: Option<&'a str>,
}

#[derive(Deserialize)]
pub struct AnalyzeQuery {
    #[serde(default)]
    address: Option<String>,
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", get(analyze))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: "ok",
        uptime_secs,
        risk_mode: state.risk_mode,
    })
}

/// Score one address
async fn analyze(
    State(state): State<SharedState>,
    Query(params): Query<AnalyzeQuery>,
) -> Response {
    let Some(address) = params.address else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing required query parameter 'address'".to_string(),
            }),
        )
            .into_response();
    };

    match state.analyzer.analyze(&address).await {
        Ok(analysis) => Json(analysis).into_response(),
        Err(e) => {
            tracing::error!(error = %e, stage = %e.stage(), "Analysis failed");
            failure_response(&e)
        }
    }
}

fn failure_response(err: &AnalysisError) -> Response {
    let status = match err.kind() {
        FailureKind::GeocodeFailure | FailureKind::ReverseGeocodeFailure => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        FailureKind::DataFetchFailure => StatusCode::BAD_GATEWAY,
    };

    let body = FailureResponse {
        status: "failed",
        kind: err.kind(),
        stage: err.stage(),
        message: err.message(),
        coordinates: err.coordinates(),
        municipality: err.municipality(),
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use address_potential::{
        AmenityFeature, FloodRiskStrategy, Geocoder, PoiSource, PopulationDataset,
        PopulationSource, ProviderError, ReverseGeocoder, RiskLevel,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    const LISBOA: Coordinates = Coordinates {
        latitude: 38.7077,
        longitude: -9.1365,
    };

    struct StubGeocoder(Option<Coordinates>);

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn geocode(&self, _address: &str) -> Result<Option<Coordinates>, ProviderError> {
            Ok(self.0)
        }
    }

    struct StubReverse;

    #[async_trait]
    impl ReverseGeocoder for StubReverse {
        async fn municipality(&self, _at: Coordinates) -> Result<Option<String>, ProviderError> {
            Ok(Some("Lisboa".to_string()))
        }
    }

    struct StubPopulation(Result<&'static str, &'static str>);

    #[async_trait]
    impl PopulationSource for StubPopulation {
        async fn load(&self) -> Result<PopulationDataset, ProviderError> {
            let csv = self.0?;
            Ok(PopulationDataset::from_csv(csv)?)
        }
    }

    struct StubPois;

    #[async_trait]
    impl PoiSource for StubPois {
        async fn amenities_near(
            &self,
            at: Coordinates,
            _radius_m: u32,
        ) -> Result<Vec<AmenityFeature>, ProviderError> {
            Ok(vec![AmenityFeature {
                name: Some("Café Martinho da Arcada".to_string()),
                amenity: Some("cafe".to_string()),
                position: Some(at),
            }])
        }
    }

    fn create_test_state(
        geocoded: Option<Coordinates>,
        population: Result<&'static str, &'static str>,
    ) -> SharedState {
        let analyzer = Analyzer::new(
            Arc::new(StubGeocoder(geocoded)),
            Arc::new(StubReverse),
            Arc::new(StubPopulation(population)),
            Arc::new(FloodRiskStrategy::Fixed(RiskLevel::Low)),
            Arc::new(StubPois),
        );
        Arc::new(ServerState::new(analyzer, "fixed"))
    }

    fn default_state() -> SharedState {
        create_test_state(Some(LISBOA), Ok("PT,Lisboa,\"545,796\"\n"))
    }

    async fn get_json(state: SharedState, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = create_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, json) = get_json(default_state(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["risk_mode"], "fixed");
        assert!(json["uptime_secs"].as_u64().is_some());
    }

    #[tokio::test]
    async fn test_analyze_scored() {
        let (status, json) =
            get_json(default_state(), "/analyze?address=Rua%20Augusta%201%2C%20Lisboa").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "scored");
        assert_eq!(json["address"], "Rua Augusta 1, Lisboa");
        assert_eq!(json["municipality"], "Lisboa");
        assert_eq!(json["population"], 545_796);
        assert_eq!(json["risk"]["code"], 2);
        assert_eq!(json["pois"]["count"], 1);
        assert!(json["tier"].is_string());
        let score = json["score"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&score));
    }

    #[tokio::test]
    async fn test_analyze_inconclusive_when_municipality_missing() {
        let state = create_test_state(Some(LISBOA), Ok("PT,Porto,231800\n"));
        let (status, json) = get_json(state, "/analyze?address=Lisboa").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "inconclusive");
        assert_eq!(json["reason"], "population_not_found");
        assert!(json["population"].is_null());
    }

    #[tokio::test]
    async fn test_analyze_missing_address() {
        let (status, json) = get_json(default_state(), "/analyze").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("address"));
    }

    #[tokio::test]
    async fn test_analyze_geocode_failure() {
        let state = create_test_state(None, Ok("PT,Lisboa,545796\n"));
        let (status, json) = get_json(state, "/analyze?address=nowhere").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["status"], "failed");
        assert_eq!(json["kind"], "geocode_failure");
        assert_eq!(json["stage"], "geocoder");
        assert!(json["coordinates"].is_null());
        assert!(json["municipality"].is_null());
    }

    #[tokio::test]
    async fn test_analyze_blank_address_is_geocode_failure() {
        let (status, json) = get_json(default_state(), "/analyze?address=%20%20").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["kind"], "geocode_failure");
    }

    #[tokio::test]
    async fn test_analyze_data_fetch_failure() {
        let state = create_test_state(Some(LISBOA), Err("connection refused"));
        let (status, json) = get_json(state, "/analyze?address=Lisboa").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["kind"], "data_fetch_failure");
        assert_eq!(json["stage"], "population");
        assert_eq!(json["municipality"], "Lisboa");
        assert_eq!(json["coordinates"]["latitude"], 38.7077);
        assert_eq!(json["message"], "connection refused");
    }
}
