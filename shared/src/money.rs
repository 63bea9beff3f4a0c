//! Fixed-point currency helpers
//!
//! All monetary amounts are `Decimal` values quantized to 3 decimal places
//! (KWD-style sub-unit precision). Rounding is half-up, away from zero, and
//! happens at well-defined points only: line totals, the discount amount,
//! and the final total. Intermediate arithmetic keeps full precision.

use crate::error::{AppError, AppResult, ErrorCode};
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places carried by every stored amount
pub const DECIMAL_PLACES: u32 = 3;

/// Upper bound for a single unit price
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Upper bound for a line item quantity
pub const MAX_QUANTITY: i32 = 9999;

/// Round an amount to the canonical 3 decimal places, half-up
#[inline]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate a unit price: finite, non-negative, within bounds
pub fn validate_price(price: Decimal, field: &str) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(
            AppError::with_message(ErrorCode::ValueOutOfRange, format!("{field} cannot be negative"))
                .with_detail("field", field),
        );
    }
    if price > Decimal::from_f64(MAX_PRICE).unwrap_or(Decimal::MAX) {
        return Err(
            AppError::with_message(ErrorCode::ValueOutOfRange, format!("{field} exceeds maximum"))
                .with_detail("field", field)
                .with_detail("max", MAX_PRICE),
        );
    }
    Ok(())
}

/// Validate a line item quantity: strictly positive, within bounds
pub fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity <= 0 {
        return Err(AppError::with_message(
            ErrorCode::ValidationFailed,
            "quantity must be a positive integer",
        )
        .with_detail("field", "quantity"));
    }
    if quantity > MAX_QUANTITY {
        return Err(
            AppError::with_message(ErrorCode::ValueOutOfRange, "quantity exceeds maximum")
                .with_detail("field", "quantity")
                .with_detail("max", MAX_QUANTITY),
        );
    }
    Ok(())
}

/// Render an amount as its canonical database text form (always 3 dp)
pub fn to_db_string(amount: Decimal) -> String {
    format!("{:.3}", round_money(amount))
}

/// Parse an amount from its database text form
pub fn from_db_string(raw: &str) -> AppResult<Decimal> {
    Decimal::from_str(raw).map_err(|_| {
        AppError::database(format!("stored amount is not a valid decimal: {raw:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(d("1.2345")), d("1.235"));
        assert_eq!(round_money(d("1.2344")), d("1.234"));
        assert_eq!(round_money(d("0.0005")), d("0.001"));
        assert_eq!(round_money(d("2.6665")), d("2.667"));
    }

    #[test]
    fn test_round_money_idempotent() {
        let amount = round_money(d("3.14159"));
        assert_eq!(round_money(amount), amount);
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO, "unit_price").is_ok());
        assert!(validate_price(d("1.500"), "unit_price").is_ok());

        let err = validate_price(d("-0.001"), "unit_price").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        let err = validate_price(d("1000001"), "unit_price").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(9999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(10000).is_err());
    }

    #[test]
    fn test_db_string_roundtrip() {
        assert_eq!(to_db_string(d("6.6")), "6.600");
        assert_eq!(to_db_string(Decimal::ZERO), "0.000");
        assert_eq!(to_db_string(d("1.2345")), "1.235");

        assert_eq!(from_db_string("6.600").unwrap(), d("6.600"));
        assert!(from_db_string("not-a-number").is_err());
    }
}
