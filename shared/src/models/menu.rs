//! Menu catalog records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// A per-unit add-on (extra cheese, large size, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modifier {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}
