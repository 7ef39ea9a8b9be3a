use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use super::domain::{Appointment, AppointmentDraft};
use crate::errors::ServiceError;

/// Persistence the booking rules run against.
///
/// `insert` and `update` must refuse a second row for the same
/// `(barber_id, date, time)` with [`ServiceError::Conflict`]; `delete` must
/// report a row still referenced by payments as
/// [`ServiceError::OperationFailed`].
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn client_exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn barber_exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn service_exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn exists(&self, id: i32) -> Result<bool, ServiceError>;

    async fn get(&self, id: i32) -> Result<Option<Appointment>, ServiceError>;
    async fn find_by_barber_date_time(&self, barber_id: i32, date: NaiveDate, time: NaiveTime) -> Result<Option<Appointment>, ServiceError>;

    async fn insert(&self, draft: AppointmentDraft) -> Result<Appointment, ServiceError>;
    async fn update(&self, appointment: &Appointment) -> Result<Appointment, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;

    /// Ordered by date, then time.
    async fn list_all(&self) -> Result<Vec<Appointment>, ServiceError>;
    /// Ordered by time.
    async fn list_by_barber_and_date(&self, barber_id: i32, date: NaiveDate) -> Result<Vec<Appointment>, ServiceError>;
    /// Most recent first.
    async fn list_by_client(&self, client_id: i32) -> Result<Vec<Appointment>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashSet};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockAppointmentRepository {
        clients: Mutex<HashSet<i32>>,
        barbers: Mutex<HashSet<i32>>,
        services: Mutex<HashSet<i32>>,
        appointments: Mutex<BTreeMap<i32, Appointment>>, // key: appointment id
        paid: Mutex<HashSet<i32>>,                       // appointment ids with payments
        next_id: Mutex<i32>,
    }

    // a panicked test must not cascade into unrelated lock failures
    fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
        m.lock().unwrap_or_else(|e| e.into_inner())
    }

    impl MockAppointmentRepository {
        /// Repository already holding the given clients, barbers and services.
        pub fn seeded(clients: &[i32], barbers: &[i32], services: &[i32]) -> Self {
            let repo = Self::default();
            lock(&repo.clients).extend(clients);
            lock(&repo.barbers).extend(barbers);
            lock(&repo.services).extend(services);
            repo
        }

        /// Pretend a payment references this appointment, so deleting it fails.
        pub fn mark_paid(&self, appointment_id: i32) {
            lock(&self.paid).insert(appointment_id);
        }

        pub fn len(&self) -> usize {
            lock(&self.appointments).len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn slot_taken(map: &BTreeMap<i32, Appointment>, barber_id: i32, date: NaiveDate, time: NaiveTime, except: Option<i32>) -> bool {
            map.values()
                .any(|a| a.barber_id == barber_id && a.date == date && a.time == time && Some(a.id) != except)
        }
    }

    #[async_trait]
    impl AppointmentRepository for MockAppointmentRepository {
        async fn client_exists(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(lock(&self.clients).contains(&id))
        }

        async fn barber_exists(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(lock(&self.barbers).contains(&id))
        }

        async fn service_exists(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(lock(&self.services).contains(&id))
        }

        async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(lock(&self.appointments).contains_key(&id))
        }

        async fn get(&self, id: i32) -> Result<Option<Appointment>, ServiceError> {
            Ok(lock(&self.appointments).get(&id).cloned())
        }

        async fn find_by_barber_date_time(&self, barber_id: i32, date: NaiveDate, time: NaiveTime) -> Result<Option<Appointment>, ServiceError> {
            Ok(lock(&self.appointments)
                .values()
                .find(|a| a.barber_id == barber_id && a.date == date && a.time == time)
                .cloned())
        }

        async fn insert(&self, draft: AppointmentDraft) -> Result<Appointment, ServiceError> {
            let mut map = lock(&self.appointments);
            if Self::slot_taken(&map, draft.barber_id, draft.date, draft.time, None) {
                return Err(ServiceError::Conflict("appointment slot already exists".into()));
            }
            let mut next = lock(&self.next_id);
            *next += 1;
            let a = Appointment {
                id: *next,
                date: draft.date,
                time: draft.time,
                client_id: draft.client_id,
                barber_id: draft.barber_id,
                service_id: draft.service_id,
            };
            map.insert(a.id, a.clone());
            Ok(a)
        }

        async fn update(&self, appointment: &Appointment) -> Result<Appointment, ServiceError> {
            let mut map = lock(&self.appointments);
            if !map.contains_key(&appointment.id) {
                return Err(ServiceError::not_found_id("appointment", appointment.id));
            }
            if Self::slot_taken(&map, appointment.barber_id, appointment.date, appointment.time, Some(appointment.id)) {
                return Err(ServiceError::Conflict("appointment slot already exists".into()));
            }
            map.insert(appointment.id, appointment.clone());
            Ok(appointment.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            if lock(&self.paid).contains(&id) {
                return Err(ServiceError::OperationFailed("appointment is still referenced by other records".into()));
            }
            lock(&self.appointments).remove(&id);
            Ok(())
        }

        async fn list_all(&self) -> Result<Vec<Appointment>, ServiceError> {
            let mut all: Vec<Appointment> = lock(&self.appointments).values().cloned().collect();
            all.sort_by_key(|a| (a.date, a.time));
            Ok(all)
        }

        async fn list_by_barber_and_date(&self, barber_id: i32, date: NaiveDate) -> Result<Vec<Appointment>, ServiceError> {
            let mut day: Vec<Appointment> = lock(&self.appointments)
                .values()
                .filter(|a| a.barber_id == barber_id && a.date == date)
                .cloned()
                .collect();
            day.sort_by_key(|a| a.time);
            Ok(day)
        }

        async fn list_by_client(&self, client_id: i32) -> Result<Vec<Appointment>, ServiceError> {
            let mut mine: Vec<Appointment> = lock(&self.appointments)
                .values()
                .filter(|a| a.client_id == client_id)
                .cloned()
                .collect();
            mine.sort_by_key(|a| std::cmp::Reverse((a.date, a.time)));
            Ok(mine)
        }
    }
}
