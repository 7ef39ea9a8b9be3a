use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use common::types::Ack;
use service::appointment::domain::Appointment;
use service::client_service::{self, ClientPatch, NewClient};

use super::created;
use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/v1/clients", tag = "clients",
    responses((status = 200, description = "All clients, oldest registration first", body = [crate::openapi::ClientDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<models::client::Model>>, ApiError> {
    Ok(Json(client_service::list_clients(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/v1/clients", tag = "clients",
    request_body = crate::openapi::NewClientDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AckDoc),
        (status = 400, description = "Missing or invalid field", body = crate::openapi::AckDoc),
        (status = 409, description = "Phone already registered", body = crate::openapi::AckDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewClient>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let c = client_service::create_client(&state.db, input).await?;
    Ok(created(format!("/api/v1/clients/{}", c.id), format!("Client {} registered.", c.id)))
}

#[utoipa::path(
    get, path = "/api/v1/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::ClientDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<models::client::Model>, ApiError> {
    Ok(Json(client_service::get_client(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/v1/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    request_body = crate::openapi::ClientPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AckDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc),
        (status = 409, description = "Phone already registered", body = crate::openapi::AckDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<ClientPatch>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(patch) = payload?;
    client_service::update_client(&state.db, id, patch).await?;
    Ok(Json(Ack::ok(format!("Client {} updated.", id))))
}

#[utoipa::path(
    delete, path = "/api/v1/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::AckDoc),
        (status = 400, description = "Client still has appointments", body = crate::openapi::AckDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Ack>, ApiError> {
    client_service::delete_client(&state.db, id).await?;
    Ok(Json(Ack::ok(format!("Client {} deleted.", id))))
}

#[utoipa::path(
    get, path = "/api/v1/clients/{id}/appointments", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "The client's appointments, most recent first", body = [crate::openapi::AppointmentDoc]),
        (status = 404, description = "Client not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn appointments(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Vec<Appointment>>, ApiError> {
    Ok(Json(state.appointments.list_by_client(id).await?))
}
