//! Business layer for the barbershop backend.
//! - `appointment` holds the booking rules (required fields, no past slots,
//!   referenced records exist, no double-booking) behind a repository trait.
//! - The `*_service` modules are plain async CRUD functions over the SeaORM
//!   entities in `models`, with uniqueness and reference checks.

pub mod errors;
pub mod appointment;
pub mod location_service;
pub mod barber_service;
pub mod client_service;
pub mod catalog_service;
pub mod payment_service;
#[cfg(test)]
pub mod test_support;
