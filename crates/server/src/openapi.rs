//! OpenAPI document. The `*Doc` structs describe wire shapes only; the
//! handlers deserialize into the service-layer types.

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct AckDoc {
    pub success: bool,
    pub message: String,
}

#[derive(ToSchema)]
pub struct LocationDoc { pub id: i32, pub name: String, pub address: String, pub phone: String }

#[derive(ToSchema)]
pub struct NewLocationDoc { pub name: String, pub address: String, pub phone: String }

#[derive(ToSchema)]
pub struct LocationPatchDoc { pub name: Option<String>, pub address: Option<String>, pub phone: Option<String> }

#[derive(ToSchema)]
pub struct BarberDoc {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub specialty: Option<String>,
    pub location_id: i32,
}

#[derive(ToSchema)]
pub struct NewBarberDoc { pub name: String, pub surname: String, pub specialty: Option<String>, pub location_id: i32 }

/// `specialty: null` clears it; leaving the key out keeps it.
#[derive(ToSchema)]
pub struct BarberPatchDoc {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub specialty: Option<String>,
    pub location_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct ClientDoc {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub email: Option<String>,
    #[schema(format = Date, example = "2024-03-01")]
    pub registered_on: String,
}

#[derive(ToSchema)]
pub struct NewClientDoc {
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub email: Option<String>,
    /// Defaults to today.
    #[schema(format = Date)]
    pub registered_on: Option<String>,
}

/// `email: null` clears it; leaving the key out keeps it.
#[derive(ToSchema)]
pub struct ClientPatchDoc {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[schema(format = Date)]
    pub registered_on: Option<String>,
}

#[derive(ToSchema)]
pub struct ServiceDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "15.00")]
    pub price: String,
}

#[derive(ToSchema)]
pub struct NewServiceDoc {
    pub name: String,
    pub description: Option<String>,
    /// Zero or positive, two decimals.
    #[schema(example = "15.00")]
    pub price: String,
}

#[derive(ToSchema)]
pub struct ServicePatchDoc { pub name: Option<String>, pub description: Option<String>, pub price: Option<String> }

#[derive(ToSchema)]
pub struct AppointmentDoc {
    pub id: i32,
    #[schema(format = Date, example = "2030-05-02")]
    pub date: String,
    #[schema(example = "10:00:00")]
    pub time: String,
    pub client_id: i32,
    pub barber_id: i32,
    pub service_id: i32,
}

#[derive(ToSchema)]
pub struct NewAppointmentDoc {
    #[schema(format = Date, example = "2030-05-02")]
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`.
    #[schema(example = "10:00")]
    pub time: String,
    pub client_id: i32,
    pub barber_id: i32,
    pub service_id: i32,
}

#[derive(ToSchema)]
pub struct AppointmentPatchDoc {
    #[schema(format = Date)]
    pub date: Option<String>,
    pub time: Option<String>,
    pub client_id: Option<i32>,
    pub barber_id: Option<i32>,
    pub service_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct PaymentDoc {
    pub id: i32,
    #[schema(example = "15.00")]
    pub amount: String,
    #[schema(format = Date)]
    pub paid_on: String,
    #[schema(example = "card")]
    pub method: String,
    pub appointment_id: i32,
}

#[derive(ToSchema)]
pub struct NewPaymentDoc {
    /// Strictly positive.
    #[schema(example = "15.00")]
    pub amount: String,
    #[schema(format = Date)]
    pub paid_on: String,
    /// `cash`, `card` or `transfer`.
    pub method: String,
    pub appointment_id: i32,
}

#[derive(ToSchema)]
pub struct PaymentPatchDoc {
    pub amount: Option<String>,
    #[schema(format = Date)]
    pub paid_on: Option<String>,
    pub method: Option<String>,
    pub appointment_id: Option<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::locations::list,
        crate::routes::locations::create,
        crate::routes::locations::get,
        crate::routes::locations::update,
        crate::routes::locations::delete,
        crate::routes::locations::barbers,
        crate::routes::barbers::list,
        crate::routes::barbers::create,
        crate::routes::barbers::get,
        crate::routes::barbers::update,
        crate::routes::barbers::delete,
        crate::routes::clients::list,
        crate::routes::clients::create,
        crate::routes::clients::get,
        crate::routes::clients::update,
        crate::routes::clients::delete,
        crate::routes::clients::appointments,
        crate::routes::services::list,
        crate::routes::services::create,
        crate::routes::services::get,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::appointments::list,
        crate::routes::appointments::create,
        crate::routes::appointments::by_barber,
        crate::routes::appointments::get,
        crate::routes::appointments::update,
        crate::routes::appointments::delete,
        crate::routes::payments::list,
        crate::routes::payments::create,
        crate::routes::payments::by_method,
        crate::routes::payments::by_date_range,
        crate::routes::payments::get,
        crate::routes::payments::update,
        crate::routes::payments::delete,
        crate::routes::payments::for_appointment,
    ),
    components(
        schemas(
            HealthResponse,
            AckDoc,
            LocationDoc,
            NewLocationDoc,
            LocationPatchDoc,
            BarberDoc,
            NewBarberDoc,
            BarberPatchDoc,
            ClientDoc,
            NewClientDoc,
            ClientPatchDoc,
            ServiceDoc,
            NewServiceDoc,
            ServicePatchDoc,
            AppointmentDoc,
            NewAppointmentDoc,
            AppointmentPatchDoc,
            PaymentDoc,
            NewPaymentDoc,
            PaymentPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "locations"),
        (name = "barbers"),
        (name = "clients"),
        (name = "services"),
        (name = "appointments"),
        (name = "payments")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_booking_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/appointments"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/appointments/by-barber"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/payments/by-date-range"));
    }
}
