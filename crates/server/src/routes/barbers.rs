use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use common::types::Ack;
use service::barber_service::{self, BarberPatch, NewBarber};

use super::created;
use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/v1/barbers", tag = "barbers",
    responses((status = 200, description = "All barbers by surname, then name", body = [crate::openapi::BarberDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<models::barber::Model>>, ApiError> {
    Ok(Json(barber_service::list_barbers(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/v1/barbers", tag = "barbers",
    request_body = crate::openapi::NewBarberDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AckDoc),
        (status = 400, description = "Missing or invalid field", body = crate::openapi::AckDoc),
        (status = 404, description = "Location not found", body = crate::openapi::AckDoc),
        (status = 409, description = "Name and surname already used", body = crate::openapi::AckDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewBarber>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let b = barber_service::create_barber(&state.db, input).await?;
    Ok(created(format!("/api/v1/barbers/{}", b.id), format!("Barber {} created.", b.id)))
}

#[utoipa::path(
    get, path = "/api/v1/barbers/{id}", tag = "barbers",
    params(("id" = i32, Path, description = "Barber id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::BarberDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<models::barber::Model>, ApiError> {
    Ok(Json(barber_service::get_barber(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/v1/barbers/{id}", tag = "barbers",
    params(("id" = i32, Path, description = "Barber id")),
    request_body = crate::openapi::BarberPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AckDoc),
        (status = 404, description = "Barber or location not found", body = crate::openapi::AckDoc),
        (status = 409, description = "Name and surname already used", body = crate::openapi::AckDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<BarberPatch>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(patch) = payload?;
    barber_service::update_barber(&state.db, id, patch).await?;
    Ok(Json(Ack::ok(format!("Barber {} updated.", id))))
}

#[utoipa::path(
    delete, path = "/api/v1/barbers/{id}", tag = "barbers",
    params(("id" = i32, Path, description = "Barber id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::AckDoc),
        (status = 400, description = "Barber still has appointments", body = crate::openapi::AckDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Ack>, ApiError> {
    barber_service::delete_barber(&state.db, id).await?;
    Ok(Json(Ack::ok(format!("Barber {} deleted.", id))))
}
