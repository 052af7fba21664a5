//! Business logic services

pub mod validation_service;

pub use validation_service::{ValidationOutcome, ValidationService};
