//! Order records: the order row, its line items, state history, payments

use crate::order::{Channel, OrderStatus, OrderType, PaymentMethod, PaymentStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The order row. Item names and prices on child records are snapshots
/// taken at creation time; later menu edits never touch past orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub branch_id: Uuid,
    /// `ORD-YYYYMMDD-###`, unique per branch per UTC day
    pub order_number: String,
    pub order_type: OrderType,
    pub channel: Channel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub service_charge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub item_id: Uuid,
    /// Name snapshot at creation time
    pub item_name: String,
    pub quantity: i32,
    /// Base price plus per-unit modifier prices, snapshot
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// unit_price * quantity, rounded
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Modifier snapshot attached to a line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemModifier {
    pub id: Uuid,
    pub order_item_id: Uuid,
    pub modifier_id: Uuid,
    pub modifier_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// One entry of the append-only status history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderState {
    pub id: Uuid,
    pub order_id: Uuid,
    /// None only for the creation record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_status: Option<OrderStatus>,
    pub to_status: OrderStatus,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub method: PaymentMethod,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub received_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub change_amount: Decimal,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_order_state_creation_record_serialization() {
        let state = OrderState {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            from_status: None,
            to_status: OrderStatus::Pending,
            notes: "Order created".to_string(),
            changed_by: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("from_status").is_none());
        assert_eq!(json["to_status"], "pending");
        assert_eq!(json["notes"], "Order created");
    }

    #[test]
    fn test_order_serializes_money_as_floats() {
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            branch_id: Uuid::new_v4(),
            order_number: "ORD-20260830-001".to_string(),
            order_type: OrderType::Qsr,
            channel: Channel::Pos,
            customer_name: None,
            customer_phone: None,
            subtotal: Decimal::from_str("6.600").unwrap(),
            tax_amount: Decimal::ZERO,
            service_charge: Decimal::from_str("0.660").unwrap(),
            discount_amount: Decimal::ZERO,
            delivery_fee: Decimal::ZERO,
            total_amount: Decimal::from_str("7.260").unwrap(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            notes: None,
            created_at: now,
            accepted_at: None,
            completed_at: None,
            cancelled_at: None,
            updated_at: now,
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["subtotal"], 6.6);
        assert_eq!(json["total_amount"], 7.26);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["order_number"], "ORD-20260830-001");
        assert!(json.get("accepted_at").is_none());
    }
}
