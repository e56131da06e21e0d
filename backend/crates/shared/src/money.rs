//! Money Amounts
//!
//! Unit prices are stored as `NUMERIC(12, 2)`: at most two decimal places
//! and strictly below 10^10. Line and order totals are computed with checked
//! arithmetic so an oversized amount surfaces as a validation error.

use rust_decimal::Decimal;

use crate::error::validation::ValidationError;

/// Decimal places a price may carry
pub const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound for a unit price (10^10)
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// Validate a unit price
///
/// Trailing zeros do not count towards the scale, so `19.990` is accepted.
pub fn checked_price(price: Decimal) -> Result<Decimal, ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("price", "Price cannot be negative"));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(ValidationError::new(
            "price",
            "Price cannot have more than two decimal places",
        ));
    }
    if price >= PRICE_LIMIT {
        return Err(ValidationError::new("price", "Price is too large"));
    }
    Ok(price)
}

/// `price * quantity`, or an error if it is not representable
pub fn line_total(price: Decimal, quantity: u32) -> Result<Decimal, ValidationError> {
    price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| ValidationError::new("price", "Line total is too large"))
}

/// Sum of amounts, or an error if it is not representable
pub fn checked_sum(
    amounts: impl IntoIterator<Item = Decimal>,
) -> Result<Decimal, ValidationError> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or_else(|| ValidationError::new("price", "Total is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_limit_is_ten_billion() {
        assert_eq!(PRICE_LIMIT, Decimal::from(10_000_000_000_i64));
    }

    #[test]
    fn test_checked_price() {
        assert!(checked_price(Decimal::ZERO).is_ok());
        assert!(checked_price(Decimal::new(9999, 2)).is_ok());
        assert!(checked_price(Decimal::from_str("19.990").unwrap()).is_ok());
        assert!(checked_price(Decimal::from_str("9999999999.99").unwrap()).is_ok());

        for rejected in ["-0.01", "19.999", "10000000000", "123456789012"] {
            let err = checked_price(Decimal::from_str(rejected).unwrap()).unwrap_err();
            assert_eq!(err.field(), "price", "{rejected}");
        }
    }

    #[test]
    fn test_line_total_overflow() {
        assert_eq!(line_total(Decimal::new(1250, 2), 2).unwrap(), Decimal::new(25, 0));
        assert!(line_total(Decimal::MAX, 2).is_err());
    }

    #[test]
    fn test_checked_sum_overflow() {
        assert_eq!(checked_sum([Decimal::ONE, Decimal::TWO]).unwrap(), Decimal::from(3));
        assert_eq!(checked_sum([]).unwrap(), Decimal::ZERO);
        assert!(checked_sum([Decimal::MAX, Decimal::ONE]).is_err());
    }
}
