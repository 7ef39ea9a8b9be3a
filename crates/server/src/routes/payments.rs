use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use common::types::Ack;
use models::payment::PaymentMethod;
use serde::Deserialize;
use service::payment_service::{self, DateRange, NewPayment, PaymentPatch};

use super::created;
use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MethodQuery {
    /// `cash`, `card` or `transfer`
    #[param(value_type = String)]
    pub method: PaymentMethod,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RangeQuery {
    #[param(value_type = Option<String>, format = Date)]
    pub start: Option<chrono::NaiveDate>,
    #[param(value_type = Option<String>, format = Date)]
    pub end: Option<chrono::NaiveDate>,
}

type Payments = Json<Vec<models::payment::Model>>;

#[utoipa::path(
    get, path = "/api/v1/payments", tag = "payments",
    responses((status = 200, description = "All payments", body = [crate::openapi::PaymentDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Payments, ApiError> {
    Ok(Json(payment_service::list_payments(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/v1/payments", tag = "payments",
    request_body = crate::openapi::NewPaymentDoc,
    responses(
        (status = 201, description = "Recorded", body = crate::openapi::AckDoc),
        (status = 400, description = "Missing field or non-positive amount", body = crate::openapi::AckDoc),
        (status = 404, description = "Appointment not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewPayment>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let p = payment_service::create_payment(&state.db, input).await?;
    Ok(created(format!("/api/v1/payments/{}", p.id), format!("Payment {} recorded.", p.id)))
}

#[utoipa::path(
    get, path = "/api/v1/payments/by-method", tag = "payments",
    params(MethodQuery),
    responses(
        (status = 200, description = "Payments made with the method", body = [crate::openapi::PaymentDoc]),
        (status = 400, description = "Unknown method", body = crate::openapi::AckDoc)
    )
)]
pub async fn by_method(
    State(state): State<ServerState>,
    query: Result<Query<MethodQuery>, QueryRejection>,
) -> Result<Payments, ApiError> {
    let Query(q) = query?;
    Ok(Json(payment_service::list_payments_by_method(&state.db, q.method).await?))
}

#[utoipa::path(
    get, path = "/api/v1/payments/by-date-range", tag = "payments",
    params(RangeQuery),
    responses(
        (status = 200, description = "Payments inside the inclusive range", body = [crate::openapi::PaymentDoc]),
        (status = 400, description = "Missing bound or end before start", body = crate::openapi::AckDoc)
    )
)]
pub async fn by_date_range(
    State(state): State<ServerState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Payments, ApiError> {
    let Query(q) = query?;
    let range = DateRange { start: q.start, end: q.end };
    Ok(Json(payment_service::list_payments_by_date_range(&state.db, range).await?))
}

#[utoipa::path(
    get, path = "/api/v1/payments/{id}", tag = "payments",
    params(("id" = i32, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::PaymentDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<models::payment::Model>, ApiError> {
    Ok(Json(payment_service::get_payment(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/v1/payments/{id}", tag = "payments",
    params(("id" = i32, Path, description = "Payment id")),
    request_body = crate::openapi::PaymentPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AckDoc),
        (status = 400, description = "Negative amount", body = crate::openapi::AckDoc),
        (status = 404, description = "Payment or appointment not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<PaymentPatch>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(patch) = payload?;
    payment_service::update_payment(&state.db, id, patch).await?;
    Ok(Json(Ack::ok(format!("Payment {} updated.", id))))
}

#[utoipa::path(
    delete, path = "/api/v1/payments/{id}", tag = "payments",
    params(("id" = i32, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::AckDoc),
        (status = 404, description = "Not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Ack>, ApiError> {
    payment_service::delete_payment(&state.db, id).await?;
    Ok(Json(Ack::ok(format!("Payment {} deleted.", id))))
}

#[utoipa::path(
    get, path = "/api/v1/appointments/{id}/payments", tag = "payments",
    params(("id" = i32, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Payments for the appointment", body = [crate::openapi::PaymentDoc]),
        (status = 404, description = "Appointment not found", body = crate::openapi::AckDoc)
    )
)]
pub async fn for_appointment(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Payments, ApiError> {
    Ok(Json(payment_service::list_payments_by_appointment(&state.db, id).await?))
}
