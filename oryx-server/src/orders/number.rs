//! Order number generation
//!
//! Numbers look like `ORD-20260830-001`: the UTC calendar day plus a
//! per-branch daily sequence. The sequence lives in the `order_counters`
//! table and is reserved with a single UPSERT inside the order-creation
//! transaction, so concurrent creates for the same branch and day always
//! get distinct consecutive values, and an aborted create never leaves a
//! visible number behind.

use crate::db::orders::reserve_order_seq;
use crate::utils::time;
use chrono::{DateTime, Utc};
use shared::error::AppResult;
use sqlx::SqliteConnection;
use uuid::Uuid;

/// Render an order number from a day key and sequence. The sequence is
/// zero-padded to 3 digits and widens naturally past 999.
pub fn format_order_number(day_key: &str, seq: i64) -> String {
    format!("ORD-{day_key}-{seq:03}")
}

/// Reserve the next number for this branch on the UTC day of `at`.
/// Must be the first write of the enclosing transaction.
pub async fn allocate(
    conn: &mut SqliteConnection,
    branch_id: Uuid,
    at: DateTime<Utc>,
) -> AppResult<String> {
    let day_key = time::order_day(at);
    let seq = reserve_order_seq(conn, branch_id, &day_key).await?;
    Ok(format_order_number(&day_key, seq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padding() {
        assert_eq!(format_order_number("20260830", 1), "ORD-20260830-001");
        assert_eq!(format_order_number("20260830", 42), "ORD-20260830-042");
        assert_eq!(format_order_number("20260830", 999), "ORD-20260830-999");
    }

    #[test]
    fn test_widens_past_999() {
        assert_eq!(format_order_number("20260830", 1000), "ORD-20260830-1000");
        assert_eq!(format_order_number("20260830", 12345), "ORD-20260830-12345");
    }
}
