use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::appointment::repo::SeaOrmAppointmentRepository;
use service::appointment::repository::AppointmentRepository;
use service::appointment::AppointmentService;

pub type Appointments = Arc<AppointmentService<dyn AppointmentRepository>>;

/// Shared by every handler. The booking service is held behind a trait
/// object so tests can swap in an in-memory repository.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub appointments: Appointments,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo: Arc<dyn AppointmentRepository> = Arc::new(SeaOrmAppointmentRepository::new(db.clone()));
        Self { db, appointments: Arc::new(AppointmentService::new(repo)) }
    }

    pub fn with_appointments(db: DatabaseConnection, appointments: Appointments) -> Self {
        Self { db, appointments }
    }
}
