//! Utility functions

pub mod validation;

pub use validation::{is_blank, is_sql_identifier, is_valid_email};
