//! HTTP surface of the gateway.
//!
//! Successful lookups relay the upstream JSON verbatim; failures are plain
//! text with the status code of the corresponding `LookupError`.

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use weather_lookup::{LookupError, WeatherLookupService, WeatherPayload};

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: WeatherLookupService,
}

/// Query params for `/weather/by-coords`
#[derive(Deserialize)]
pub struct ByCoordsQuery {
    pub lat: f64,
    pub lon: f64,
}

/// Query params for `/weather`
#[derive(Deserialize)]
pub struct CoordinatesQuery {
    pub latitude: f64,
    pub longitude: f64,
}

/// Query params for `/weather/by-city`
#[derive(Deserialize)]
pub struct ByCityQuery {
    #[serde(default)]
    pub city: Option<String>,
}

/// Outcome of a lookup as an HTTP response.
pub struct LookupResponse(Result<WeatherPayload, LookupError>);

impl IntoResponse for LookupResponse {
    fn into_response(self) -> Response {
        match self.0 {
            Ok(payload) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                payload.into_inner(),
            )
                .into_response(),
            Err(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    tracing::warn!("Lookup failed with {}: {}", status, err);
                }
                (status, err.to_string()).into_response()
            }
        }
    }
}

/// GET /weather/by-coords?lat=..&lon=..
async fn weather_by_coords(
    State(state): State<AppState>,
    Query(query): Query<ByCoordsQuery>,
) -> LookupResponse {
    LookupResponse(
        state
            .service
            .fetch_by_coordinates(query.lat, query.lon)
            .await,
    )
}

/// GET /weather?latitude=..&longitude=..
async fn weather_by_latitude_longitude(
    State(state): State<AppState>,
    Query(query): Query<CoordinatesQuery>,
) -> LookupResponse {
    LookupResponse(
        state
            .service
            .fetch_by_coordinates(query.latitude, query.longitude)
            .await,
    )
}

/// GET /weather/by-city?city=..
async fn weather_by_city(
    State(state): State<AppState>,
    Query(query): Query<ByCityQuery>,
) -> LookupResponse {
    let city = query.city.unwrap_or_default();
    LookupResponse(state.service.fetch_by_city(&city).await)
}

/// GET /health - Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Create the HTTP router
pub fn create_router(service: WeatherLookupService) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/health", get(health_check))
        .route("/weather", get(weather_by_latitude_longitude))
        .route("/weather/by-coords", get(weather_by_coords))
        .route("/weather/by-city", get(weather_by_city))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until Ctrl+C.
pub async fn run_http_server(service: WeatherLookupService, bind_addr: &str) -> anyhow::Result<()> {
    let app = create_router(service);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, shutting down gracefully...");
}
