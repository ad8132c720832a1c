//! Quantity Value Object

use kernel::error::app_error::{AppError, AppResult};

pub const MIN_QUANTITY: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(i32);

impl Quantity {
    pub fn new(value: i32) -> AppResult<Self> {
        if value < MIN_QUANTITY {
            return Err(AppError::bad_request(format!(
                "quantity must not be less than {}",
                MIN_QUANTITY
            )));
        }
        Ok(Self(value))
    }

    pub fn from_db(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_bounds() {
        assert!(Quantity::new(1).is_ok());
        assert!(Quantity::new(250).is_ok());
        assert!(Quantity::new(0).is_err());
        assert!(Quantity::new(-3).is_err());
    }
}
