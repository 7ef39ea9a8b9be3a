use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use common::types::Ack;
use service::barber_service;
use service::location_service::{self, LocationPatch, NewLocation};

use super::created;
use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/v1/locations", tag = "locations",
    responses((status = 200, description = "All locations", body = [crate::openapi::LocationDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<models::location::Model>>, ApiError> {
    Ok(Json(location_service::list_locations(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/v1/locations", tag = "locations",
    request_body = crate::openapi::NewLocationDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AckDoc),
        (status = 400, description = "Missing or invalid field", body = crate::openapi::AckDoc),
        (status = 409, description = "Name already used", body = crate::openapi::AckDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewLocation>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let loc = location_service::create_location(&state.db, input).await?;
    Ok(created(format!("/api/v1/locations/{}", loc.id), format!("Location {} created.", loc.id)))
}

#[utoipa::path(
    get, path = "/api/v1/locations/{id}", tag = "locations",
    params(("id" = i32, Path, description = "Location id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::LocationDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<models::location::Model>, ApiError> {
    Ok(Json(location_service::get_location(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/v1/locations/{id}", tag = "locations",
    params(("id" = i32, Path, description = "Location id")),
    request_body = crate::openapi::LocationPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AckDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc),
        (status = 409, description = "Name already used", body = crate::openapi::AckDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<LocationPatch>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(patch) = payload?;
    location_service::update_location(&state.db, id, patch).await?;
    Ok(Json(Ack::ok(format!("Location {} updated.", id))))
}

#[utoipa::path(
    delete, path = "/api/v1/locations/{id}", tag = "locations",
    params(("id" = i32, Path, description = "Location id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::AckDoc),
        (status = 400, description = "Barbers still assigned", body = crate::openapi::AckDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Ack>, ApiError> {
    location_service::delete_location(&state.db, id).await?;
    Ok(Json(Ack::ok(format!("Location {} deleted.", id))))
}

#[utoipa::path(
    get, path = "/api/v1/locations/{id}/barbers", tag = "locations",
    params(("id" = i32, Path, description = "Location id")),
    responses(
        (status = 200, description = "Barbers working at the location", body = [crate::openapi::BarberDoc]),
        (status = 404, description = "Location not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn barbers(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Vec<models::barber::Model>>, ApiError> {
    Ok(Json(barber_service::list_barbers_by_location(&state.db, id).await?))
}
