//! Payment ledger. Payments are recorded facts tied to an appointment; no
//! money moves through here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use models::payment::{self, PaymentMethod};
use crate::errors::{db_err, map_write_err, model_write_err, ServiceError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPayment {
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub paid_on: Option<NaiveDate>,
    #[serde(default)]
    pub method: Option<PaymentMethod>,
    #[serde(default)]
    pub appointment_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentPatch {
    pub amount: Option<Decimal>,
    pub paid_on: Option<NaiveDate>,
    pub method: Option<PaymentMethod>,
    pub appointment_id: Option<i32>,
}

/// Inclusive date window; both ends are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

async fn ensure_appointment(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let found = models::appointment::Entity::find_by_id(id).one(db).await.map_err(db_err)?;
    found.map(|_| ()).ok_or_else(|| ServiceError::not_found_id("appointment", id))
}

pub async fn create_payment(db: &DatabaseConnection, input: NewPayment) -> Result<payment::Model, ServiceError> {
    let amount = input.amount.ok_or_else(|| ServiceError::required("amount"))?;
    let paid_on = input.paid_on.ok_or_else(|| ServiceError::required("paid_on"))?;
    let method = input.method.ok_or_else(|| ServiceError::required("method"))?;
    let appointment_id = input.appointment_id.ok_or_else(|| ServiceError::required("appointment_id"))?;
    if amount <= Decimal::ZERO {
        return Err(ServiceError::Validation("amount must be greater than zero".into()));
    }

    ensure_appointment(db, appointment_id).await?;
    let created = payment::create(db, amount, paid_on, method, appointment_id)
        .await
        .map_err(|e| model_write_err(e, "payment"))?;
    info!(payment_id = created.id, appointment_id, amount = %created.amount, method = %method, "payment_recorded");
    Ok(created)
}

pub async fn get_payment(db: &DatabaseConnection, id: i32) -> Result<payment::Model, ServiceError> {
    payment::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found_id("payment", id))
}

pub async fn list_payments(db: &DatabaseConnection) -> Result<Vec<payment::Model>, ServiceError> {
    payment::Entity::find().order_by_asc(payment::Column::Id).all(db).await.map_err(db_err)
}

pub async fn update_payment(db: &DatabaseConnection, id: i32, patch: PaymentPatch) -> Result<payment::Model, ServiceError> {
    if let Some(amount) = patch.amount {
        payment::validate_amount(amount)?;
    }
    let current = get_payment(db, id).await?;
    if let Some(appointment_id) = patch.appointment_id.filter(|a| *a != current.appointment_id) {
        ensure_appointment(db, appointment_id).await?;
    }

    let mut am: payment::ActiveModel = current.into();
    if let Some(amount) = patch.amount {
        am.amount = Set(amount.round_dp(2));
    }
    if let Some(paid_on) = patch.paid_on {
        am.paid_on = Set(paid_on);
    }
    if let Some(method) = patch.method {
        am.method = Set(method);
    }
    if let Some(appointment_id) = patch.appointment_id {
        am.appointment_id = Set(appointment_id);
    }
    let updated = am.update(db).await.map_err(|e| map_write_err(e, "payment"))?;
    info!(payment_id = id, "payment_updated");
    Ok(updated)
}

pub async fn delete_payment(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    get_payment(db, id).await?;
    payment::Entity::delete_by_id(id).exec(db).await.map_err(|e| map_write_err(e, "payment"))?;
    info!(payment_id = id, "payment_deleted");
    Ok(())
}

pub async fn list_payments_by_appointment(db: &DatabaseConnection, appointment_id: i32) -> Result<Vec<payment::Model>, ServiceError> {
    ensure_appointment(db, appointment_id).await?;
    let rows = payment::Entity::find()
        .filter(payment::Column::AppointmentId.eq(appointment_id))
        .order_by_asc(payment::Column::PaidOn)
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await
        .map_err(db_err)?;
    if rows.is_empty() {
        debug!(appointment_id, "no payments for appointment");
    }
    Ok(rows)
}

pub async fn list_payments_by_method(db: &DatabaseConnection, method: PaymentMethod) -> Result<Vec<payment::Model>, ServiceError> {
    payment::Entity::find()
        .filter(payment::Column::Method.eq(method))
        .order_by_asc(payment::Column::PaidOn)
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await
        .map_err(db_err)
}

/// Validate a range and return its `(start, end)` bounds.
pub fn check_range(range: &DateRange) -> Result<(NaiveDate, NaiveDate), ServiceError> {
    let start = range.start.ok_or_else(|| ServiceError::required("start"))?;
    let end = range.end.ok_or_else(|| ServiceError::required("end"))?;
    if end < start {
        return Err(ServiceError::Validation(format!("end date {} is before start date {}", end, start)));
    }
    Ok((start, end))
}

pub async fn list_payments_by_date_range(db: &DatabaseConnection, range: DateRange) -> Result<Vec<payment::Model>, ServiceError> {
    let (start, end) = check_range(&range)?;
    let rows = payment::Entity::find()
        .filter(payment::Column::PaidOn.between(start, end))
        .order_by_asc(payment::Column::PaidOn)
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await
        .map_err(db_err)?;
    if rows.is_empty() {
        debug!(%start, %end, "no payments in range");
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::domain::NewAppointment;
    use crate::appointment::repo::SeaOrmAppointmentRepository;
    use crate::appointment::AppointmentService;
    use crate::barber_service::{create_barber, delete_barber, NewBarber};
    use crate::catalog_service::{create_service, delete_service, NewService};
    use crate::client_service::{create_client, delete_client, NewClient};
    use crate::location_service::{create_location, delete_location, NewLocation};
    use crate::test_support::{get_db, tag};
    use chrono::{Duration, Local, NaiveTime};
    use std::sync::Arc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, day).unwrap() }

    #[test]
    fn range_needs_both_ends_in_order() {
        assert!(check_range(&DateRange { start: Some(d(2030, 1, 2)), end: Some(d(2030, 1, 1)) }).is_err());
        assert!(check_range(&DateRange { start: None, end: Some(d(2030, 1, 1)) }).is_err());
        assert_eq!(
            check_range(&DateRange { start: Some(d(2030, 1, 1)), end: Some(d(2030, 1, 1)) }).unwrap(),
            (d(2030, 1, 1), d(2030, 1, 1))
        );
    }

    #[tokio::test]
    async fn non_positive_amount_rejected_before_db() {
        let db = DatabaseConnection::Disconnected;
        let input = NewPayment {
            amount: Some(Decimal::ZERO),
            paid_on: Some(d(2030, 1, 1)),
            method: Some(PaymentMethod::Cash),
            appointment_id: Some(1),
        };
        assert!(matches!(create_payment(&db, input).await, Err(ServiceError::Validation(_))));
        let patch = PaymentPatch { amount: Some(Decimal::new(-1, 0)), ..Default::default() };
        assert!(matches!(update_payment(&db, 1, patch).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn payment_ledger_over_a_real_booking() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };

        let loc = create_location(&db, NewLocation {
            name: Some(format!("Sede {}", tag())),
            address: Some("Calle 9".into()),
            phone: Some("5550009".into()),
        })
        .await?;
        let b = create_barber(&db, NewBarber {
            name: Some("Eva".into()),
            surname: Some(format!("Soto {}", tag())),
            specialty: None,
            location_id: Some(loc.id),
        })
        .await?;
        let c = create_client(&db, NewClient {
            name: Some("Mar".into()),
            surname: Some("Gil".into()),
            phone: Some(format!("8{}", tag())),
            ..Default::default()
        })
        .await?;
        let s = create_service(&db, NewService { name: Some(format!("Barba {}", tag())), description: None, price: Some(Decimal::new(800, 2)) }).await?;

        let bookings = AppointmentService::new(Arc::new(SeaOrmAppointmentRepository::new(db.clone())));
        let day = Local::now().date_naive() + Duration::days(60);
        let appt = bookings
            .book(NewAppointment {
                date: Some(day),
                time: NaiveTime::from_hms_opt(10, 0, 0),
                client_id: Some(c.id),
                barber_id: Some(b.id),
                service_id: Some(s.id),
            })
            .await?;

        let p = create_payment(&db, NewPayment {
            amount: Some(Decimal::new(800, 2)),
            paid_on: Some(day),
            method: Some(PaymentMethod::Card),
            appointment_id: Some(appt.id),
        })
        .await?;

        let for_appt = list_payments_by_appointment(&db, appt.id).await?;
        assert_eq!(for_appt.len(), 1);
        let by_card = list_payments_by_method(&db, PaymentMethod::Card).await?;
        assert!(by_card.iter().any(|x| x.id == p.id));
        let in_range = list_payments_by_date_range(&db, DateRange { start: Some(day), end: Some(day) }).await?;
        assert!(in_range.iter().any(|x| x.id == p.id));

        // a paid appointment cannot be withdrawn
        assert!(matches!(bookings.delete(appt.id).await, Err(ServiceError::OperationFailed(_))));

        let zeroed = update_payment(&db, p.id, PaymentPatch { amount: Some(Decimal::ZERO), ..Default::default() }).await?;
        assert_eq!(zeroed.amount, Decimal::ZERO);

        delete_payment(&db, p.id).await?;
        bookings.delete(appt.id).await?;
        delete_service(&db, s.id).await?;
        delete_client(&db, c.id).await?;
        delete_barber(&db, b.id).await?;
        delete_location(&db, loc.id).await?;
        Ok(())
    }
}
