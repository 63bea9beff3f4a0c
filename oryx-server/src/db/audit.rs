//! Audit log operations

use crate::db::map_db_err;
use crate::utils::time;
use shared::error::AppResult;
use sqlx::SqliteConnection;
use uuid::Uuid;

/// Write an audit log entry inside the caller's transaction
#[allow(clippy::too_many_arguments)]
pub async fn log(
    conn: &mut SqliteConnection,
    tenant_id: Uuid,
    actor_id: Option<&str>,
    action: &str,
    resource_type: &str,
    resource_id: &str,
    detail: Option<&serde_json::Value>,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO audit_logs (id, tenant_id, actor_id, action, resource_type, resource_id, \
         detail, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(tenant_id.to_string())
    .bind(actor_id)
    .bind(action)
    .bind(resource_type)
    .bind(resource_id)
    .bind(detail.map(|d| d.to_string()))
    .bind(time::to_db(time::now()))
    .execute(&mut *conn)
    .await
    .map_err(map_db_err)?;
    Ok(())
}
