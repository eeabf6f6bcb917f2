//! FILENAME: core/insight-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid year range: min {min} is greater than max {max}")]
    InvalidYearRange { min: i32, max: i32 },

    #[error("Invalid sales range: min {min} is greater than max {max}")]
    InvalidSalesRange { min: f64, max: f64 },

    #[error("Sales range bounds must be finite numbers")]
    NonFiniteSalesBound,
}
