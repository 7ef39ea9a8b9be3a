pub mod appointments;
pub mod barbers;
pub mod clients;
pub mod locations;
pub mod payments;
pub mod services;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Ack, Health};

use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// `201 Created` with a `Location` header pointing at the new record.
pub(crate) fn created(location: String, message: String) -> impl IntoResponse {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(Ack::ok(message)))
}

fn api_v1() -> Router<ServerState> {
    Router::new()
        .route("/locations", get(locations::list).post(locations::create))
        .route("/locations/:id", get(locations::get).put(locations::update).delete(locations::delete))
        .route("/locations/:id/barbers", get(locations::barbers))
        .route("/barbers", get(barbers::list).post(barbers::create))
        .route("/barbers/:id", get(barbers::get).put(barbers::update).delete(barbers::delete))
        .route("/clients", get(clients::list).post(clients::create))
        .route("/clients/:id", get(clients::get).put(clients::update).delete(clients::delete))
        .route("/clients/:id/appointments", get(clients::appointments))
        .route("/services", get(services::list).post(services::create))
        .route("/services/:id", get(services::get).put(services::update).delete(services::delete))
        .route("/appointments", get(appointments::list).post(appointments::create))
        // static segment registered next to `:id`; axum prefers the static match
        .route("/appointments/by-barber", get(appointments::by_barber))
        .route("/appointments/:id", get(appointments::get).put(appointments::update).delete(appointments::delete))
        .route("/appointments/:id/payments", get(payments::for_appointment))
        .route("/payments", get(payments::list).post(payments::create))
        .route("/payments/by-method", get(payments::by_method))
        .route("/payments/by-date-range", get(payments::by_date_range))
        .route("/payments/:id", get(payments::get).put(payments::update).delete(payments::delete))
}

/// Build the full application router: health, the v1 API and Swagger UI.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_v1())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
