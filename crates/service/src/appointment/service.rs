use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use common::types::Ack;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::clock::{Clock, SystemClock};
use super::domain::{Appointment, AppointmentDraft, AppointmentPatch, NewAppointment};
use super::repository::AppointmentRepository;
use crate::errors::ServiceError;

/// Booking rules over an [`AppointmentRepository`].
///
/// The check-then-write part of create and update runs under `booking_lock`,
/// so two requests in this process never validate the same slot at once.
/// Across processes the unique index on `(barber_id, date, time)` is the
/// backstop and surfaces as [`ServiceError::Conflict`] from the repository.
pub struct AppointmentService<R: AppointmentRepository + ?Sized> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    booking_lock: Mutex<()>,
}

impl<R: AppointmentRepository + ?Sized> AppointmentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self::with_clock(repo, Arc::new(SystemClock)) }

    pub fn with_clock(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock, booking_lock: Mutex::new(()) }
    }

    /// Book a new appointment and return the stored record.
    ///
    /// Checks run in this order and the first failure wins: required fields,
    /// not in the past, client / barber / service exist, slot is free.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use service::appointment::{AppointmentService, FixedClock};
    /// use service::appointment::domain::NewAppointment;
    /// use service::appointment::repository::mock::MockAppointmentRepository;
    ///
    /// let repo = Arc::new(MockAppointmentRepository::seeded(&[1], &[1], &[1]));
    /// let today = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
    /// let clock = FixedClock::at(today, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    /// let svc = AppointmentService::with_clock(repo, Arc::new(clock));
    /// let input = NewAppointment {
    ///     date: Some(today),
    ///     time: NaiveTime::from_hms_opt(10, 0, 0),
    ///     client_id: Some(1),
    ///     barber_id: Some(1),
    ///     service_id: Some(1),
    /// };
    /// let booked = tokio_test::block_on(svc.book(input)).unwrap();
    /// assert_eq!(booked.barber_id, 1);
    /// ```
    #[instrument(skip(self, input), fields(barber_id = ?input.barber_id, date = ?input.date, time = ?input.time))]
    pub async fn book(&self, input: NewAppointment) -> Result<Appointment, ServiceError> {
        let date = input.date.ok_or_else(|| ServiceError::required("date"))?;
        let time = input.time.ok_or_else(|| ServiceError::required("time"))?;
        let client_id = input.client_id.ok_or_else(|| ServiceError::required("client_id"))?;
        let barber_id = input.barber_id.ok_or_else(|| ServiceError::required("barber_id"))?;
        let service_id = input.service_id.ok_or_else(|| ServiceError::required("service_id"))?;

        self.ensure_not_past(date, time)?;

        let _guard = self.booking_lock.lock().await;
        self.ensure_client(client_id).await?;
        self.ensure_barber(barber_id).await?;
        self.ensure_service(service_id).await?;

        if let Some(existing) = self.repo.find_by_barber_date_time(barber_id, date, time).await? {
            debug!(existing_id = existing.id, "slot already booked");
            return Err(slot_conflict(barber_id, date, time));
        }

        let created = self.repo.insert(AppointmentDraft { date, time, client_id, barber_id, service_id }).await?;
        info!(appointment_id = created.id, barber_id, client_id, %date, %time, "appointment_created");
        Ok(created)
    }

    /// [`book`](Self::book), acknowledged.
    pub async fn create(&self, input: NewAppointment) -> Result<Ack, ServiceError> {
        let created = self.book(input).await?;
        Ok(Ack::ok(format!("Appointment {} booked.", created.id)))
    }

    /// Apply a partial update and return the stored record.
    ///
    /// Order: target lookup, changed references, slot conflict (only when
    /// barber, date or time move), then the temporal rule on the resulting
    /// date and time.
    #[instrument(skip(self, patch), fields(appointment_id = id))]
    pub async fn reschedule(&self, id: i32, patch: AppointmentPatch) -> Result<Appointment, ServiceError> {
        let _guard = self.booking_lock.lock().await;
        let current = self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found_id("appointment", id))?;

        if let Some(client_id) = patch.client_id.filter(|c| *c != current.client_id) {
            self.ensure_client(client_id).await?;
        }
        if let Some(barber_id) = patch.barber_id.filter(|b| *b != current.barber_id) {
            self.ensure_barber(barber_id).await?;
        }
        if let Some(service_id) = patch.service_id.filter(|s| *s != current.service_id) {
            self.ensure_service(service_id).await?;
        }

        let next = Appointment {
            id,
            date: patch.date.unwrap_or(current.date),
            time: patch.time.unwrap_or(current.time),
            client_id: patch.client_id.unwrap_or(current.client_id),
            barber_id: patch.barber_id.unwrap_or(current.barber_id),
            service_id: patch.service_id.unwrap_or(current.service_id),
        };

        let slot_moved = next.date != current.date || next.time != current.time || next.barber_id != current.barber_id;
        if slot_moved {
            if let Some(other) = self.repo.find_by_barber_date_time(next.barber_id, next.date, next.time).await? {
                if other.id != id {
                    debug!(existing_id = other.id, "target slot already booked");
                    return Err(slot_conflict(next.barber_id, next.date, next.time));
                }
            }
        }

        self.ensure_not_past(next.date, next.time)?;

        let updated = self.repo.update(&next).await?;
        info!(appointment_id = id, barber_id = updated.barber_id, date = %updated.date, time = %updated.time, "appointment_updated");
        Ok(updated)
    }

    /// [`reschedule`](Self::reschedule), acknowledged.
    pub async fn update(&self, id: i32, patch: AppointmentPatch) -> Result<Ack, ServiceError> {
        self.reschedule(id, patch).await?;
        Ok(Ack::ok(format!("Appointment {} updated.", id)))
    }

    #[instrument(skip(self), fields(appointment_id = id))]
    pub async fn delete(&self, id: i32) -> Result<Ack, ServiceError> {
        if !self.repo.exists(id).await? {
            return Err(ServiceError::not_found_id("appointment", id));
        }
        self.repo.delete(id).await.map_err(|e| {
            warn!(error = %e, "appointment delete refused");
            e
        })?;
        info!(appointment_id = id, "appointment_deleted");
        Ok(Ack::ok(format!("Appointment {} deleted.", id)))
    }

    pub async fn get(&self, id: i32) -> Result<Appointment, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found_id("appointment", id))
    }

    pub async fn list(&self) -> Result<Vec<Appointment>, ServiceError> {
        let all = self.repo.list_all().await?;
        if all.is_empty() {
            debug!("no appointments booked");
        }
        Ok(all)
    }

    pub async fn list_by_barber_and_date(&self, barber_id: i32, date: NaiveDate) -> Result<Vec<Appointment>, ServiceError> {
        self.ensure_barber(barber_id).await?;
        let day = self.repo.list_by_barber_and_date(barber_id, date).await?;
        if day.is_empty() {
            debug!(barber_id, %date, "no appointments for barber on date");
        }
        Ok(day)
    }

    pub async fn list_by_client(&self, client_id: i32) -> Result<Vec<Appointment>, ServiceError> {
        self.ensure_client(client_id).await?;
        let mine = self.repo.list_by_client(client_id).await?;
        if mine.is_empty() {
            debug!(client_id, "client has no appointments");
        }
        Ok(mine)
    }

    fn ensure_not_past(&self, date: NaiveDate, time: NaiveTime) -> Result<(), ServiceError> {
        let today = self.clock.today();
        if date < today {
            return Err(ServiceError::Validation(format!("date {} is in the past", date)));
        }
        if date == today && time < self.clock.time_of_day() {
            return Err(ServiceError::Validation(format!("time {} has already passed today", time)));
        }
        Ok(())
    }

    async fn ensure_client(&self, id: i32) -> Result<(), ServiceError> {
        if self.repo.client_exists(id).await? { Ok(()) } else { Err(ServiceError::not_found_id("client", id)) }
    }

    async fn ensure_barber(&self, id: i32) -> Result<(), ServiceError> {
        if self.repo.barber_exists(id).await? { Ok(()) } else { Err(ServiceError::not_found_id("barber", id)) }
    }

    async fn ensure_service(&self, id: i32) -> Result<(), ServiceError> {
        if self.repo.service_exists(id).await? { Ok(()) } else { Err(ServiceError::not_found_id("service", id)) }
    }
}

fn slot_conflict(barber_id: i32, date: NaiveDate, time: NaiveTime) -> ServiceError {
    ServiceError::Conflict(format!("barber {} already has an appointment on {} at {}", barber_id, date, time))
}
