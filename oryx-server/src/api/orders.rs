//! Order endpoints
//!
//! Thin handlers over the order service; all payloads travel in the
//! shared `ApiResponse` envelope.

use crate::core::AppState;
use crate::orders::service::{
    self, CreateOrderRequest, ListOrdersQuery, OrderDetail, OrderList, PreviewRequest,
    TransitionRequest,
};
use axum::Json;
use axum::extract::{Path, Query, State};
use shared::error::{ApiResponse, AppResult};
use shared::order::OrderTotals;
use uuid::Uuid;

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let detail = service::create_order(&state.db.pool, req).await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// POST /api/orders/preview
pub async fn preview(
    State(state): State<AppState>,
    Json(req): Json<PreviewRequest>,
) -> AppResult<Json<ApiResponse<OrderTotals>>> {
    let totals = service::preview_totals(&state.db.pool, req).await?;
    Ok(Json(ApiResponse::success(totals)))
}

/// GET /api/orders/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let detail = service::fetch_order_detail(&state.db.pool, id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// PATCH /api/orders/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TransitionRequest>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let detail = service::transition_order(&state.db.pool, id, req).await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// GET /api/orders
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let orders = service::list_orders(&state.db.pool, query).await?;
    Ok(Json(ApiResponse::success(orders)))
}
