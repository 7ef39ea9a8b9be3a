//! SeaORM entities for the barbershop schema plus the row-level helpers
//! (field validation, inserts) the service layer builds on.

pub mod errors;
pub mod validation;
pub mod db;
pub mod location;
pub mod barber;
pub mod client;
pub mod service_item;
pub mod appointment;
pub mod payment;

#[cfg(test)]
mod tests;
