use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use common::types::Ack;
use serde::Deserialize;
use service::appointment::domain::{Appointment, AppointmentPatch, NewAppointment};

use super::created;
use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ByBarberQuery {
    pub barber_id: i32,
    /// `YYYY-MM-DD`
    #[param(value_type = String, format = Date)]
    pub date: NaiveDate,
}

#[utoipa::path(
    get, path = "/api/v1/appointments", tag = "appointments",
    responses((status = 200, description = "All appointments by date, then time", body = [crate::openapi::AppointmentDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Appointment>>, ApiError> {
    Ok(Json(state.appointments.list().await?))
}

#[utoipa::path(
    post, path = "/api/v1/appointments", tag = "appointments",
    request_body = crate::openapi::NewAppointmentDoc,
    responses(
        (status = 201, description = "Booked", body = crate::openapi::AckDoc),
        (status = 400, description = "Missing field or slot in the past", body = crate::openapi::AckDoc),
        (status = 404, description = "Client, barber or service not found", body = crate::openapi::AckDoc),
        (status = 409, description = "Barber already booked at that date and time", body = crate::openapi::AckDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewAppointment>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let booked = state.appointments.book(input).await?;
    Ok(created(format!("/api/v1/appointments/{}", booked.id), format!("Appointment {} booked.", booked.id)))
}

#[utoipa::path(
    get, path = "/api/v1/appointments/by-barber", tag = "appointments",
    params(ByBarberQuery),
    responses(
        (status = 200, description = "The barber's day, by time", body = [crate::openapi::AppointmentDoc]),
        (status = 400, description = "Missing or malformed query", body = crate::openapi::AckDoc),
        (status = 404, description = "Barber not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn by_barber(
    State(state): State<ServerState>,
    query: Result<Query<ByBarberQuery>, QueryRejection>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let Query(q) = query?;
    Ok(Json(state.appointments.list_by_barber_and_date(q.barber_id, q.date).await?))
}

#[utoipa::path(
    get, path = "/api/v1/appointments/{id}", tag = "appointments",
    params(("id" = i32, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::AppointmentDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Appointment>, ApiError> {
    Ok(Json(state.appointments.get(id).await?))
}

#[utoipa::path(
    put, path = "/api/v1/appointments/{id}", tag = "appointments",
    params(("id" = i32, Path, description = "Appointment id")),
    request_body = crate::openapi::AppointmentPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AckDoc),
        (status = 400, description = "Slot in the past", body = crate::openapi::AckDoc),
        (status = 404, description = "Appointment or reference not found", body = crate::openapi::AckDoc),
        (status = 409, description = "Target slot already booked", body = crate::openapi::AckDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<AppointmentPatch>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(patch) = payload?;
    Ok(Json(state.appointments.update(id, patch).await?))
}

#[utoipa::path(
    delete, path = "/api/v1/appointments/{id}", tag = "appointments",
    params(("id" = i32, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Withdrawn", body = crate::openapi::AckDoc),
        (status = 400, description = "Payments still reference it", body = crate::openapi::AckDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Ack>, ApiError> {
    Ok(Json(state.appointments.delete(id).await?))
}
