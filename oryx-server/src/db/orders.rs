//! Order persistence: inserts share the caller's transaction, reads go
//! through the pool

use crate::db::map_db_err;
use crate::utils::time;
use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};
use shared::models::{Order, OrderItem, OrderItemModifier, OrderState, Payment};
use shared::money;
use shared::order::{OrderStatus, PaymentStatus};
use sqlx::{SqliteConnection, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

fn parse_uuid(raw: &str, column: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::database(format!("stored {column} is not a UUID: {raw:?}")))
}

fn parse_enum<T: FromStr<Err = String>>(raw: &str) -> AppResult<T> {
    raw.parse().map_err(AppError::database)
}

/// Reserve the next order sequence for a branch/day. Must run inside the
/// order-creation transaction, and as its first write, so SQLite's writer
/// serialization hands out distinct consecutive values.
pub async fn reserve_order_seq(
    conn: &mut SqliteConnection,
    branch_id: Uuid,
    order_day: &str,
) -> AppResult<i64> {
    let seq: i64 = sqlx::query_scalar(
        "INSERT INTO order_counters (branch_id, order_day, next_seq) VALUES (?, ?, 1) \
         ON CONFLICT(branch_id, order_day) DO UPDATE SET next_seq = next_seq + 1 \
         RETURNING next_seq",
    )
    .bind(branch_id.to_string())
    .bind(order_day)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_db_err)?;
    Ok(seq)
}

pub async fn insert_order(conn: &mut SqliteConnection, order: &Order) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, tenant_id, branch_id, order_number, order_type, channel, \
         customer_name, customer_phone, subtotal, tax_amount, service_charge, discount_amount, \
         delivery_fee, total_amount, status, payment_status, notes, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order.id.to_string())
    .bind(order.tenant_id.to_string())
    .bind(order.branch_id.to_string())
    .bind(&order.order_number)
    .bind(order.order_type.as_str())
    .bind(order.channel.as_str())
    .bind(&order.customer_name)
    .bind(&order.customer_phone)
    .bind(money::to_db_string(order.subtotal))
    .bind(money::to_db_string(order.tax_amount))
    .bind(money::to_db_string(order.service_charge))
    .bind(money::to_db_string(order.discount_amount))
    .bind(money::to_db_string(order.delivery_fee))
    .bind(money::to_db_string(order.total_amount))
    .bind(order.status.as_str())
    .bind(order.payment_status.as_str())
    .bind(&order.notes)
    .bind(time::to_db(order.created_at))
    .bind(time::to_db(order.updated_at))
    .execute(&mut *conn)
    .await
    .map_err(map_db_err)?;
    Ok(())
}

pub async fn insert_order_item(conn: &mut SqliteConnection, item: &OrderItem) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO order_items (id, order_id, item_id, item_name, quantity, unit_price, \
         total_price, notes) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(item.id.to_string())
    .bind(item.order_id.to_string())
    .bind(item.item_id.to_string())
    .bind(&item.item_name)
    .bind(item.quantity)
    .bind(money::to_db_string(item.unit_price))
    .bind(money::to_db_string(item.total_price))
    .bind(&item.notes)
    .execute(&mut *conn)
    .await
    .map_err(map_db_err)?;
    Ok(())
}

pub async fn insert_order_item_modifier(
    conn: &mut SqliteConnection,
    modifier: &OrderItemModifier,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO order_item_modifiers (id, order_item_id, modifier_id, modifier_name, price) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(modifier.id.to_string())
    .bind(modifier.order_item_id.to_string())
    .bind(modifier.modifier_id.to_string())
    .bind(&modifier.modifier_name)
    .bind(money::to_db_string(modifier.price))
    .execute(&mut *conn)
    .await
    .map_err(map_db_err)?;
    Ok(())
}

pub async fn insert_order_state(conn: &mut SqliteConnection, state: &OrderState) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO order_states (id, order_id, from_status, to_status, notes, changed_by, \
         created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(state.id.to_string())
    .bind(state.order_id.to_string())
    .bind(state.from_status.map(|s| s.as_str()))
    .bind(state.to_status.as_str())
    .bind(&state.notes)
    .bind(&state.changed_by)
    .bind(time::to_db(state.created_at))
    .execute(&mut *conn)
    .await
    .map_err(map_db_err)?;
    Ok(())
}

pub async fn insert_payment(conn: &mut SqliteConnection, payment: &Payment) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO payments (id, order_id, method, amount, received_amount, change_amount, \
         status, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(payment.id.to_string())
    .bind(payment.order_id.to_string())
    .bind(payment.method.as_str())
    .bind(money::to_db_string(payment.amount))
    .bind(money::to_db_string(payment.received_amount))
    .bind(money::to_db_string(payment.change_amount))
    .bind(payment.status.as_str())
    .bind(time::to_db(payment.created_at))
    .execute(&mut *conn)
    .await
    .map_err(map_db_err)?;
    Ok(())
}

/// Compare-and-swap status update. Returns false when another writer moved
/// the order away from `expected` first; the caller maps that to a conflict.
pub async fn cas_update_status(
    conn: &mut SqliteConnection,
    order_id: Uuid,
    expected: OrderStatus,
    target: OrderStatus,
    now: DateTime<Utc>,
) -> AppResult<bool> {
    let stamp_col = match target {
        OrderStatus::Accepted => Some("accepted_at"),
        OrderStatus::Completed => Some("completed_at"),
        OrderStatus::Cancelled => Some("cancelled_at"),
        _ => None,
    };

    let now_db = time::to_db(now);
    let result = match stamp_col {
        Some(col) => {
            let sql = format!(
                "UPDATE orders SET status = ?, updated_at = ?, {col} = ? \
                 WHERE id = ? AND status = ?"
            );
            sqlx::query(&sql)
                .bind(target.as_str())
                .bind(&now_db)
                .bind(&now_db)
                .bind(order_id.to_string())
                .bind(expected.as_str())
                .execute(&mut *conn)
                .await
        }
        None => {
            sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
                .bind(target.as_str())
                .bind(&now_db)
                .bind(order_id.to_string())
                .bind(expected.as_str())
                .execute(&mut *conn)
                .await
        }
    }
    .map_err(map_db_err)?;

    Ok(result.rows_affected() == 1)
}

pub async fn update_payment_status(
    conn: &mut SqliteConnection,
    order_id: Uuid,
    status: PaymentStatus,
    now: DateTime<Utc>,
) -> AppResult<()> {
    sqlx::query("UPDATE orders SET payment_status = ?, updated_at = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(time::to_db(now))
        .bind(order_id.to_string())
        .execute(&mut *conn)
        .await
        .map_err(map_db_err)?;
    Ok(())
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: String,
    tenant_id: String,
    branch_id: String,
    order_number: String,
    order_type: String,
    channel: String,
    customer_name: Option<String>,
    customer_phone: Option<String>,
    subtotal: String,
    tax_amount: String,
    service_charge: String,
    discount_amount: String,
    delivery_fee: String,
    total_amount: String,
    status: String,
    payment_status: String,
    notes: Option<String>,
    created_at: String,
    accepted_at: Option<String>,
    completed_at: Option<String>,
    cancelled_at: Option<String>,
    updated_at: String,
}

const ORDER_COLUMNS: &str = "id, tenant_id, branch_id, order_number, order_type, channel, \
    customer_name, customer_phone, subtotal, tax_amount, service_charge, discount_amount, \
    delivery_fee, total_amount, status, payment_status, notes, created_at, accepted_at, \
    completed_at, cancelled_at, updated_at";

impl OrderRow {
    fn into_model(self) -> AppResult<Order> {
        Ok(Order {
            id: parse_uuid(&self.id, "orders.id")?,
            tenant_id: parse_uuid(&self.tenant_id, "orders.tenant_id")?,
            branch_id: parse_uuid(&self.branch_id, "orders.branch_id")?,
            order_number: self.order_number,
            order_type: parse_enum(&self.order_type)?,
            channel: parse_enum(&self.channel)?,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            subtotal: money::from_db_string(&self.subtotal)?,
            tax_amount: money::from_db_string(&self.tax_amount)?,
            service_charge: money::from_db_string(&self.service_charge)?,
            discount_amount: money::from_db_string(&self.discount_amount)?,
            delivery_fee: money::from_db_string(&self.delivery_fee)?,
            total_amount: money::from_db_string(&self.total_amount)?,
            status: parse_enum(&self.status)?,
            payment_status: parse_enum(&self.payment_status)?,
            notes: self.notes,
            created_at: time::from_db(&self.created_at)?,
            accepted_at: self.accepted_at.as_deref().map(time::from_db).transpose()?,
            completed_at: self.completed_at.as_deref().map(time::from_db).transpose()?,
            cancelled_at: self.cancelled_at.as_deref().map(time::from_db).transpose()?,
            updated_at: time::from_db(&self.updated_at)?,
        })
    }
}

pub async fn get_order(pool: &SqlitePool, id: Uuid) -> AppResult<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?");
    let row: Option<OrderRow> = sqlx::query_as(&sql)
        .bind(id.to_string())
        .fetch_optional(pool)
        .await
        .map_err(map_db_err)?;

    row.map(OrderRow::into_model).transpose()
}

/// List orders newest first, optionally filtered by branch and/or status
pub async fn list_orders(
    pool: &SqlitePool,
    branch_id: Option<Uuid>,
    status: Option<OrderStatus>,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<Order>> {
    let mut sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE 1 = 1");
    if branch_id.is_some() {
        sql.push_str(" AND branch_id = ?");
    }
    if status.is_some() {
        sql.push_str(" AND status = ?");
    }
    sql.push_str(" ORDER BY created_at DESC, rowid DESC LIMIT ? OFFSET ?");

    let mut query = sqlx::query_as::<_, OrderRow>(&sql);
    if let Some(branch_id) = branch_id {
        query = query.bind(branch_id.to_string());
    }
    if let Some(status) = status {
        query = query.bind(status.as_str());
    }
    let rows = query
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(map_db_err)?;

    rows.into_iter().map(OrderRow::into_model).collect()
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: String,
    order_id: String,
    item_id: String,
    item_name: String,
    quantity: i32,
    unit_price: String,
    total_price: String,
    notes: Option<String>,
}

pub async fn items_for_order(pool: &SqlitePool, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
    let rows: Vec<OrderItemRow> = sqlx::query_as(
        "SELECT id, order_id, item_id, item_name, quantity, unit_price, total_price, notes \
         FROM order_items WHERE order_id = ? ORDER BY rowid",
    )
    .bind(order_id.to_string())
    .fetch_all(pool)
    .await
    .map_err(map_db_err)?;

    rows.into_iter()
        .map(|row| {
            Ok(OrderItem {
                id: parse_uuid(&row.id, "order_items.id")?,
                order_id: parse_uuid(&row.order_id, "order_items.order_id")?,
                item_id: parse_uuid(&row.item_id, "order_items.item_id")?,
                item_name: row.item_name,
                quantity: row.quantity,
                unit_price: money::from_db_string(&row.unit_price)?,
                total_price: money::from_db_string(&row.total_price)?,
                notes: row.notes,
            })
        })
        .collect()
}

#[derive(sqlx::FromRow)]
struct OrderItemModifierRow {
    id: String,
    order_item_id: String,
    modifier_id: String,
    modifier_name: String,
    price: String,
}

/// All modifier snapshots for an order, across all of its line items
pub async fn modifiers_for_order(
    pool: &SqlitePool,
    order_id: Uuid,
) -> AppResult<Vec<OrderItemModifier>> {
    let rows: Vec<OrderItemModifierRow> = sqlx::query_as(
        "SELECT m.id, m.order_item_id, m.modifier_id, m.modifier_name, m.price \
         FROM order_item_modifiers m \
         JOIN order_items i ON i.id = m.order_item_id \
         WHERE i.order_id = ? ORDER BY m.rowid",
    )
    .bind(order_id.to_string())
    .fetch_all(pool)
    .await
    .map_err(map_db_err)?;

    rows.into_iter()
        .map(|row| {
            Ok(OrderItemModifier {
                id: parse_uuid(&row.id, "order_item_modifiers.id")?,
                order_item_id: parse_uuid(&row.order_item_id, "order_item_modifiers.order_item_id")?,
                modifier_id: parse_uuid(&row.modifier_id, "order_item_modifiers.modifier_id")?,
                modifier_name: row.modifier_name,
                price: money::from_db_string(&row.price)?,
            })
        })
        .collect()
}

#[derive(sqlx::FromRow)]
struct OrderStateRow {
    id: String,
    order_id: String,
    from_status: Option<String>,
    to_status: String,
    notes: String,
    changed_by: Option<String>,
    created_at: String,
}

/// Status history in insertion order (rowid breaks same-instant ties)
pub async fn states_for_order(pool: &SqlitePool, order_id: Uuid) -> AppResult<Vec<OrderState>> {
    let rows: Vec<OrderStateRow> = sqlx::query_as(
        "SELECT id, order_id, from_status, to_status, notes, changed_by, created_at \
         FROM order_states WHERE order_id = ? ORDER BY rowid",
    )
    .bind(order_id.to_string())
    .fetch_all(pool)
    .await
    .map_err(map_db_err)?;

    rows.into_iter()
        .map(|row| {
            Ok(OrderState {
                id: parse_uuid(&row.id, "order_states.id")?,
                order_id: parse_uuid(&row.order_id, "order_states.order_id")?,
                from_status: row.from_status.as_deref().map(parse_enum).transpose()?,
                to_status: parse_enum(&row.to_status)?,
                notes: row.notes,
                changed_by: row.changed_by,
                created_at: time::from_db(&row.created_at)?,
            })
        })
        .collect()
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: String,
    order_id: String,
    method: String,
    amount: String,
    received_amount: String,
    change_amount: String,
    status: String,
    created_at: String,
}

pub async fn payments_for_order(pool: &SqlitePool, order_id: Uuid) -> AppResult<Vec<Payment>> {
    let rows: Vec<PaymentRow> = sqlx::query_as(
        "SELECT id, order_id, method, amount, received_amount, change_amount, status, created_at \
         FROM payments WHERE order_id = ? ORDER BY rowid",
    )
    .bind(order_id.to_string())
    .fetch_all(pool)
    .await
    .map_err(map_db_err)?;

    rows.into_iter()
        .map(|row| {
            Ok(Payment {
                id: parse_uuid(&row.id, "payments.id")?,
                order_id: parse_uuid(&row.order_id, "payments.order_id")?,
                method: parse_enum(&row.method)?,
                amount: money::from_db_string(&row.amount)?,
                received_amount: money::from_db_string(&row.received_amount)?,
                change_amount: money::from_db_string(&row.change_amount)?,
                status: parse_enum(&row.status)?,
                created_at: time::from_db(&row.created_at)?,
            })
        })
        .collect()
}
