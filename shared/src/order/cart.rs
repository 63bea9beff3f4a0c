//! Cart input and totals types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of an incoming cart, referencing catalog entries by id.
/// Prices are resolved server-side; clients never send amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    /// Menu item being ordered
    pub menu_item_id: Uuid,
    /// Number of units
    pub quantity: i32,
    /// Selected modifiers, applied per unit
    #[serde(default)]
    pub modifier_ids: Vec<Uuid>,
    /// Free-text note for the kitchen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A priced cart line, input to the totals calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    pub quantity: i32,
    /// Per-unit modifier prices, added to the base price
    #[serde(default)]
    pub modifier_prices: Vec<Decimal>,
}

/// Tenant charge configuration, both expressed as percentages
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChargeRates {
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub service_charge_rate: Decimal,
}

/// Computed totals for an order, every field rounded to 3 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of rounded line totals
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    /// Charged for QSR orders only
    #[serde(with = "rust_decimal::serde::float")]
    pub service_charge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    /// Charged for delivery orders only
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_fee: Decimal,
    /// subtotal + tax + service charge - discount + delivery fee
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_order_item_input_deserialize_defaults() {
        let json = r#"{"menu_item_id":"550e8400-e29b-41d4-a716-446655440000","quantity":2}"#;
        let line: OrderItemInput = serde_json::from_str(json).unwrap();
        assert_eq!(line.quantity, 2);
        assert!(line.modifier_ids.is_empty());
        assert!(line.notes.is_none());
    }

    #[test]
    fn test_charge_rates_deserialize() {
        let rates: ChargeRates =
            serde_json::from_str(r#"{"tax_rate":5,"service_charge_rate":10}"#).unwrap();
        assert_eq!(rates.tax_rate, Decimal::from(5));
        assert_eq!(rates.service_charge_rate, Decimal::from(10));
    }

    #[test]
    fn test_totals_serialize_as_floats() {
        let totals = OrderTotals {
            subtotal: Decimal::from_str("6.600").unwrap(),
            tax_amount: Decimal::from_str("0.330").unwrap(),
            service_charge: Decimal::from_str("0.660").unwrap(),
            discount_amount: Decimal::ZERO,
            delivery_fee: Decimal::ZERO,
            total_amount: Decimal::from_str("7.590").unwrap(),
        };
        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["subtotal"], 6.6);
        assert_eq!(json["tax_amount"], 0.33);
        assert_eq!(json["service_charge"], 0.66);
        assert_eq!(json["total_amount"], 7.59);
    }
}
