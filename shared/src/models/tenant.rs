//! Tenant and branch records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A restaurant brand. Charge rates are percentages applied by the
/// totals calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    /// ISO 4217 code, e.g. "KWD"
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub service_charge_rate: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A physical location of a tenant. Order numbers are scoped per branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
