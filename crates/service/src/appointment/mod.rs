//! Appointment booking: the validation and double-booking rules that guard
//! every create and update, layered as domain, repository and service.

pub mod clock;
pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use clock::{Clock, FixedClock, SystemClock};
pub use service::AppointmentService;
