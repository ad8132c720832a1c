//! Price Value Object

use kernel::error::app_error::{AppError, AppResult};

/// Non-negative price with at most two decimal places
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> AppResult<Self> {
        if !value.is_finite() {
            return Err(AppError::bad_request("price must be a number"));
        }

        if value < 0.0 {
            return Err(AppError::bad_request("price must not be less than 0"));
        }

        // Tolerate binary representation noise (0.1 + 0.2), not a third decimal
        let cents = value * 100.0;
        if (cents - cents.round()).abs() > 1e-6 {
            return Err(AppError::bad_request(
                "price must have at most 2 decimal places",
            ));
        }

        Ok(Self(cents.round() / 100.0))
    }

    pub fn from_db(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}
