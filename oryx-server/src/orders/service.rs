//! Order lifecycle controller
//!
//! Create, transition, fetch, and list operations. Every write path runs
//! inside a single transaction: either the order row, its children, and
//! the history record all land, or none do.

use crate::db::{audit, catalog, map_db_err, orders as orders_db};
use crate::orders::{calculator, number};
use crate::utils::time;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MenuItem, Modifier, Order, OrderItem, OrderItemModifier, OrderState, Payment};
use shared::order::{
    CartLine, Channel, ChargeRates, OrderItemInput, OrderStatus, OrderTotals, OrderType,
    PaymentMethod, PaymentStatus,
};
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;
use validator::Validate;

// ==================== Request / response types ====================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub tenant_id: Uuid,
    pub branch_id: Uuid,
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub channel: Channel,
    #[validate(length(max = 120))]
    pub customer_name: Option<String>,
    #[validate(length(max = 32))]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub delivery_fee: Decimal,
    pub notes: Option<String>,
    pub payment: Option<PaymentInput>,
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentInput {
    pub method: PaymentMethod,
    /// Cash handed over; defaults to the exact total
    pub received_amount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub reason: Option<String>,
    pub changed_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub tenant_id: Uuid,
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub delivery_fee: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub branch_id: Option<Uuid>,
    pub status: Option<OrderStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,
    pub modifiers: Vec<OrderItemModifier>,
}

#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
    pub payments: Vec<Payment>,
    pub history: Vec<OrderState>,
    /// Derived live from the transition table, never stored
    pub allowed_transitions: Vec<OrderStatus>,
}

#[derive(Debug, Serialize)]
pub struct OrderList {
    pub orders: Vec<Order>,
    pub page: u32,
    pub per_page: u32,
}

// ==================== Catalog resolution ====================

struct ResolvedCart {
    lines: Vec<CartLine>,
    items: Vec<(OrderItemInput, MenuItem)>,
    modifiers: HashMap<Uuid, Modifier>,
}

/// Resolve every referenced menu item and modifier, scoped to the tenant.
/// Any dangling id fails the whole request; a cart must never price with
/// a silently-missing modifier.
async fn resolve_cart(
    pool: &SqlitePool,
    tenant_id: Uuid,
    inputs: &[OrderItemInput],
) -> AppResult<ResolvedCart> {
    let item_ids: Vec<Uuid> = inputs
        .iter()
        .map(|i| i.menu_item_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let modifier_ids: Vec<Uuid> = inputs
        .iter()
        .flat_map(|i| i.modifier_ids.iter().copied())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let menu_items: HashMap<Uuid, MenuItem> = catalog::menu_items_by_ids(pool, tenant_id, &item_ids)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();
    let modifiers: HashMap<Uuid, Modifier> =
        catalog::modifiers_by_ids(pool, tenant_id, &modifier_ids)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

    let mut lines = Vec::with_capacity(inputs.len());
    let mut items = Vec::with_capacity(inputs.len());
    for input in inputs {
        let item = menu_items.get(&input.menu_item_id).ok_or_else(|| {
            AppError::new(ErrorCode::ItemNotFound)
                .with_detail("menu_item_id", input.menu_item_id.to_string())
        })?;
        if !item.is_available {
            return Err(AppError::new(ErrorCode::ItemUnavailable)
                .with_detail("menu_item_id", item.id.to_string())
                .with_detail("name", item.name.clone()));
        }

        let mut modifier_prices = Vec::with_capacity(input.modifier_ids.len());
        for modifier_id in &input.modifier_ids {
            let modifier = modifiers.get(modifier_id).ok_or_else(|| {
                AppError::new(ErrorCode::ModifierNotFound)
                    .with_detail("modifier_id", modifier_id.to_string())
            })?;
            modifier_prices.push(modifier.price);
        }

        lines.push(CartLine {
            base_price: item.base_price,
            quantity: input.quantity,
            modifier_prices,
        });
        items.push((input.clone(), item.clone()));
    }

    Ok(ResolvedCart {
        lines,
        items,
        modifiers,
    })
}

async fn require_tenant(pool: &SqlitePool, tenant_id: Uuid) -> AppResult<shared::models::Tenant> {
    catalog::get_tenant(pool, tenant_id).await?.ok_or_else(|| {
        AppError::new(ErrorCode::TenantNotFound).with_detail("tenant_id", tenant_id.to_string())
    })
}

// ==================== Operations ====================

/// Price a cart without persisting anything
pub async fn preview_totals(pool: &SqlitePool, req: PreviewRequest) -> AppResult<OrderTotals> {
    let tenant = require_tenant(pool, req.tenant_id).await?;
    let cart = resolve_cart(pool, req.tenant_id, &req.items).await?;

    calculator::calculate_totals(
        &cart.lines,
        req.order_type,
        ChargeRates {
            tax_rate: tenant.tax_rate,
            service_charge_rate: tenant.service_charge_rate,
        },
        req.discount_amount,
        req.delivery_fee,
    )
}

/// Create an order: resolve the catalog, price the cart, allocate the
/// order number, and persist everything in one transaction.
pub async fn create_order(pool: &SqlitePool, req: CreateOrderRequest) -> AppResult<OrderDetail> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    if req.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    let tenant = require_tenant(pool, req.tenant_id).await?;
    let branch = catalog::get_branch(pool, req.branch_id).await?.ok_or_else(|| {
        AppError::new(ErrorCode::BranchNotFound).with_detail("branch_id", req.branch_id.to_string())
    })?;
    if branch.tenant_id != tenant.id {
        return Err(AppError::new(ErrorCode::BranchNotFound)
            .with_detail("branch_id", branch.id.to_string())
            .with_detail("tenant_id", tenant.id.to_string()));
    }

    let cart = resolve_cart(pool, req.tenant_id, &req.items).await?;
    let totals = calculator::calculate_totals(
        &cart.lines,
        req.order_type,
        ChargeRates {
            tax_rate: tenant.tax_rate,
            service_charge_rate: tenant.service_charge_rate,
        },
        req.discount_amount,
        req.delivery_fee,
    )?;

    if let Some(payment) = &req.payment
        && let Some(received) = payment.received_amount
        && received < totals.total_amount
    {
        return Err(AppError::new(ErrorCode::PaymentInvalidAmount)
            .with_detail("received_amount", received.to_string())
            .with_detail("total_amount", totals.total_amount.to_string()));
    }

    let now = time::now();
    let order_id = Uuid::new_v4();

    let mut tx = pool.begin().await.map_err(map_db_err)?;

    // Counter reservation is the first write so the transaction takes the
    // write lock up front and concurrent creates serialize cleanly.
    let order_number = number::allocate(&mut *tx, branch.id, now).await?;

    let payment_status = req
        .payment
        .as_ref()
        .map(|p| p.method.initial_payment_status())
        .unwrap_or_default();

    let order = Order {
        id: order_id,
        tenant_id: tenant.id,
        branch_id: branch.id,
        order_number: order_number.clone(),
        order_type: req.order_type,
        channel: req.channel,
        customer_name: req.customer_name.clone(),
        customer_phone: req.customer_phone.clone(),
        subtotal: totals.subtotal,
        tax_amount: totals.tax_amount,
        service_charge: totals.service_charge,
        discount_amount: totals.discount_amount,
        delivery_fee: totals.delivery_fee,
        total_amount: totals.total_amount,
        status: OrderStatus::Pending,
        payment_status,
        notes: req.notes.clone(),
        created_at: now,
        accepted_at: None,
        completed_at: None,
        cancelled_at: None,
        updated_at: now,
    };
    orders_db::insert_order(&mut *tx, &order).await?;

    for ((input, item), line) in cart.items.iter().zip(&cart.lines) {
        let (unit_price, total_price) = calculator::line_totals(line)?;
        let order_item = OrderItem {
            id: Uuid::new_v4(),
            order_id,
            item_id: item.id,
            item_name: item.name.clone(),
            quantity: input.quantity,
            unit_price,
            total_price,
            notes: input.notes.clone(),
        };
        orders_db::insert_order_item(&mut *tx, &order_item).await?;

        for modifier_id in &input.modifier_ids {
            // resolve_cart already guaranteed presence
            let Some(modifier) = cart.modifiers.get(modifier_id) else {
                return Err(AppError::new(ErrorCode::ModifierNotFound)
                    .with_detail("modifier_id", modifier_id.to_string()));
            };
            orders_db::insert_order_item_modifier(
                &mut *tx,
                &OrderItemModifier {
                    id: Uuid::new_v4(),
                    order_item_id: order_item.id,
                    modifier_id: modifier.id,
                    modifier_name: modifier.name.clone(),
                    price: modifier.price,
                },
            )
            .await?;
        }
    }

    orders_db::insert_order_state(
        &mut *tx,
        &OrderState {
            id: Uuid::new_v4(),
            order_id,
            from_status: None,
            to_status: OrderStatus::Pending,
            notes: "Order created".to_string(),
            changed_by: req.created_by.clone(),
            created_at: now,
        },
    )
    .await?;

    if let Some(payment) = &req.payment {
        let received = payment.received_amount.unwrap_or(totals.total_amount);
        orders_db::insert_payment(
            &mut *tx,
            &Payment {
                id: Uuid::new_v4(),
                order_id,
                method: payment.method,
                amount: totals.total_amount,
                received_amount: received,
                change_amount: shared::money::round_money(received - totals.total_amount),
                status: payment_status,
                created_at: now,
            },
        )
        .await?;
    }

    audit::log(
        &mut *tx,
        tenant.id,
        req.created_by.as_deref(),
        "order.create",
        "order",
        &order_id.to_string(),
        Some(&serde_json::json!({
            "order_number": order_number,
            "total_amount": totals.total_amount.to_string(),
        })),
    )
    .await?;

    tx.commit().await.map_err(map_db_err)?;

    tracing::info!(order_id = %order_id, order_number = %order_number, "Order created");

    fetch_order_detail(pool, order_id).await
}

/// Request a status transition and/or a payment status update.
///
/// A same-status request is an idempotent no-op: success, no history row.
/// An invalid target fails with the allowed set in the error details. The
/// status update is a compare-and-swap; losing the race to another writer
/// is a conflict the caller resolves by re-fetching.
pub async fn transition_order(
    pool: &SqlitePool,
    order_id: Uuid,
    req: TransitionRequest,
) -> AppResult<OrderDetail> {
    if req.status.is_none() && req.payment_status.is_none() {
        return Err(AppError::invalid_request(
            "nothing to update: provide status and/or payment_status",
        ));
    }

    let order = orders_db::get_order(pool, order_id).await?.ok_or_else(|| {
        AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", order_id.to_string())
    })?;

    let target = match req.status {
        Some(target) if target != order.status => {
            if !order.status.can_transition_to(target) {
                let allowed: Vec<&str> = order
                    .status
                    .allowed_next()
                    .iter()
                    .map(|s| s.as_str())
                    .collect();
                return Err(AppError::invalid_transition(
                    order.status.as_str(),
                    target.as_str(),
                    &allowed,
                ));
            }
            Some(target)
        }
        // Same status: idempotent retry, nothing to write
        _ => None,
    };

    let now = time::now();
    let mut tx = pool.begin().await.map_err(map_db_err)?;

    if let Some(target) = target {
        let swapped =
            orders_db::cas_update_status(&mut *tx, order_id, order.status, target, now).await?;
        if !swapped {
            return Err(AppError::order_conflict(order_id.to_string()));
        }

        orders_db::insert_order_state(
            &mut *tx,
            &OrderState {
                id: Uuid::new_v4(),
                order_id,
                from_status: Some(order.status),
                to_status: target,
                notes: req
                    .reason
                    .clone()
                    .unwrap_or_else(|| format!("Status changed to {target}")),
                changed_by: req.changed_by.clone(),
                created_at: now,
            },
        )
        .await?;
    }

    let payment_target = req
        .payment_status
        .filter(|status| *status != order.payment_status);
    if let Some(payment_status) = payment_target {
        orders_db::update_payment_status(&mut *tx, order_id, payment_status, now).await?;
    }

    if target.is_some() || payment_target.is_some() {
        audit::log(
            &mut *tx,
            order.tenant_id,
            req.changed_by.as_deref(),
            "order.update",
            "order",
            &order_id.to_string(),
            Some(&serde_json::json!({
                "from_status": order.status.as_str(),
                "to_status": target.map(|t| t.as_str()),
                "payment_status": payment_target.map(|p| p.as_str()),
            })),
        )
        .await?;
    }

    tx.commit().await.map_err(map_db_err)?;

    if let Some(target) = target {
        tracing::info!(
            order_id = %order_id,
            from = %order.status,
            to = %target,
            "Order status changed"
        );
    }

    fetch_order_detail(pool, order_id).await
}

/// Full order detail: items with modifier snapshots, payments, ordered
/// history, and the live allowed-transition set.
pub async fn fetch_order_detail(pool: &SqlitePool, order_id: Uuid) -> AppResult<OrderDetail> {
    let order = orders_db::get_order(pool, order_id).await?.ok_or_else(|| {
        AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", order_id.to_string())
    })?;

    let items = orders_db::items_for_order(pool, order_id).await?;
    let mut modifiers_by_item: HashMap<Uuid, Vec<OrderItemModifier>> = HashMap::new();
    for modifier in orders_db::modifiers_for_order(pool, order_id).await? {
        modifiers_by_item
            .entry(modifier.order_item_id)
            .or_default()
            .push(modifier);
    }

    let items = items
        .into_iter()
        .map(|item| {
            let modifiers = modifiers_by_item.remove(&item.id).unwrap_or_default();
            OrderItemDetail { item, modifiers }
        })
        .collect();

    let payments = orders_db::payments_for_order(pool, order_id).await?;
    let history = orders_db::states_for_order(pool, order_id).await?;
    let allowed_transitions = order.status.allowed_next().to_vec();

    Ok(OrderDetail {
        order,
        items,
        payments,
        history,
        allowed_transitions,
    })
}

/// Order summaries, newest first
pub async fn list_orders(pool: &SqlitePool, query: ListOrdersQuery) -> AppResult<OrderList> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = i64::from(page - 1) * i64::from(per_page);

    let orders = orders_db::list_orders(
        pool,
        query.branch_id,
        query.status,
        i64::from(per_page),
        offset,
    )
    .await?;

    Ok(OrderList {
        orders,
        page,
        per_page,
    })
}
