use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use common::types::Ack;
use service::catalog_service::{self, NewService, ServicePatch};

use super::created;
use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/v1/services", tag = "services",
    responses((status = 200, description = "The service catalog", body = [crate::openapi::ServiceDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<models::service_item::Model>>, ApiError> {
    Ok(Json(catalog_service::list_services(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/v1/services", tag = "services",
    request_body = crate::openapi::NewServiceDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AckDoc),
        (status = 400, description = "Missing field or negative price", body = crate::openapi::AckDoc),
        (status = 409, description = "Name already used", body = crate::openapi::AckDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewService>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let s = catalog_service::create_service(&state.db, input).await?;
    Ok(created(format!("/api/v1/services/{}", s.id), format!("Service {} created.", s.id)))
}

#[utoipa::path(
    get, path = "/api/v1/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::ServiceDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<models::service_item::Model>, ApiError> {
    Ok(Json(catalog_service::get_service(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/v1/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service id")),
    request_body = crate::openapi::ServicePatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AckDoc),
        (status = 400, description = "Negative price", body = crate::openapi::AckDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc),
        (status = 409, description = "Name already used", body = crate::openapi::AckDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<ServicePatch>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(patch) = payload?;
    catalog_service::update_service(&state.db, id, patch).await?;
    Ok(Json(Ack::ok(format!("Service {} updated.", id))))
}

#[utoipa::path(
    delete, path = "/api/v1/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::AckDoc),
        (status = 400, description = "Service still booked", body = crate::openapi::AckDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Ack>, ApiError> {
    catalog_service::delete_service(&state.db, id).await?;
    Ok(Json(Ack::ok(format!("Service {} deleted.", id))))
}
