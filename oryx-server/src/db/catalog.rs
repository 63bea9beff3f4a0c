//! Catalog queries: tenants, branches, menu items, modifiers

use crate::db::map_db_err;
use crate::utils::time;
use shared::error::{AppError, AppResult};
use shared::models::{Branch, MenuItem, Modifier, Tenant};
use shared::money;
use sqlx::SqlitePool;
use uuid::Uuid;

fn parse_uuid(raw: &str, column: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::database(format!("stored {column} is not a UUID: {raw:?}")))
}

#[derive(sqlx::FromRow)]
struct TenantRow {
    id: String,
    name: String,
    currency: String,
    tax_rate: String,
    service_charge_rate: String,
    created_at: String,
}

impl TenantRow {
    fn into_model(self) -> AppResult<Tenant> {
        Ok(Tenant {
            id: parse_uuid(&self.id, "tenants.id")?,
            name: self.name,
            currency: self.currency,
            tax_rate: money::from_db_string(&self.tax_rate)?,
            service_charge_rate: money::from_db_string(&self.service_charge_rate)?,
            created_at: time::from_db(&self.created_at)?,
        })
    }
}

pub async fn get_tenant(pool: &SqlitePool, id: Uuid) -> AppResult<Option<Tenant>> {
    let row: Option<TenantRow> = sqlx::query_as(
        "SELECT id, name, currency, tax_rate, service_charge_rate, created_at \
         FROM tenants WHERE id = ?",
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await
    .map_err(map_db_err)?;

    row.map(TenantRow::into_model).transpose()
}

#[derive(sqlx::FromRow)]
struct BranchRow {
    id: String,
    tenant_id: String,
    name: String,
    created_at: String,
}

impl BranchRow {
    fn into_model(self) -> AppResult<Branch> {
        Ok(Branch {
            id: parse_uuid(&self.id, "branches.id")?,
            tenant_id: parse_uuid(&self.tenant_id, "branches.tenant_id")?,
            name: self.name,
            created_at: time::from_db(&self.created_at)?,
        })
    }
}

pub async fn get_branch(pool: &SqlitePool, id: Uuid) -> AppResult<Option<Branch>> {
    let row: Option<BranchRow> =
        sqlx::query_as("SELECT id, tenant_id, name, created_at FROM branches WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?;

    row.map(BranchRow::into_model).transpose()
}

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: String,
    tenant_id: String,
    name: String,
    base_price: String,
    is_available: bool,
    created_at: String,
}

impl MenuItemRow {
    fn into_model(self) -> AppResult<MenuItem> {
        Ok(MenuItem {
            id: parse_uuid(&self.id, "menu_items.id")?,
            tenant_id: parse_uuid(&self.tenant_id, "menu_items.tenant_id")?,
            name: self.name,
            base_price: money::from_db_string(&self.base_price)?,
            is_available: self.is_available,
            created_at: time::from_db(&self.created_at)?,
        })
    }
}

/// Fetch a set of menu items by id, scoped to one tenant. Missing ids are
/// simply absent from the result; the caller decides what that means.
pub async fn menu_items_by_ids(
    pool: &SqlitePool,
    tenant_id: Uuid,
    ids: &[Uuid],
) -> AppResult<Vec<MenuItem>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT id, tenant_id, name, base_price, is_available, created_at \
         FROM menu_items WHERE tenant_id = ? AND id IN ({placeholders})"
    );

    let mut query = sqlx::query_as::<_, MenuItemRow>(&sql).bind(tenant_id.to_string());
    for id in ids {
        query = query.bind(id.to_string());
    }

    let rows = query.fetch_all(pool).await.map_err(map_db_err)?;
    rows.into_iter().map(MenuItemRow::into_model).collect()
}

#[derive(sqlx::FromRow)]
struct ModifierRow {
    id: String,
    tenant_id: String,
    name: String,
    price: String,
    created_at: String,
}

impl ModifierRow {
    fn into_model(self) -> AppResult<Modifier> {
        Ok(Modifier {
            id: parse_uuid(&self.id, "modifiers.id")?,
            tenant_id: parse_uuid(&self.tenant_id, "modifiers.tenant_id")?,
            name: self.name,
            price: money::from_db_string(&self.price)?,
            created_at: time::from_db(&self.created_at)?,
        })
    }
}

/// Fetch a set of modifiers by id, scoped to one tenant
pub async fn modifiers_by_ids(
    pool: &SqlitePool,
    tenant_id: Uuid,
    ids: &[Uuid],
) -> AppResult<Vec<Modifier>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT id, tenant_id, name, price, created_at \
         FROM modifiers WHERE tenant_id = ? AND id IN ({placeholders})"
    );

    let mut query = sqlx::query_as::<_, ModifierRow>(&sql).bind(tenant_id.to_string());
    for id in ids {
        query = query.bind(id.to_string());
    }

    let rows = query.fetch_all(pool).await.map_err(map_db_err)?;
    rows.into_iter().map(ModifierRow::into_model).collect()
}

// Seed helpers, used by tests and local bootstrapping

pub async fn insert_tenant(pool: &SqlitePool, tenant: &Tenant) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO tenants (id, name, currency, tax_rate, service_charge_rate, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(tenant.id.to_string())
    .bind(&tenant.name)
    .bind(&tenant.currency)
    .bind(money::to_db_string(tenant.tax_rate))
    .bind(money::to_db_string(tenant.service_charge_rate))
    .bind(time::to_db(tenant.created_at))
    .execute(pool)
    .await
    .map_err(map_db_err)?;
    Ok(())
}

pub async fn insert_branch(pool: &SqlitePool, branch: &Branch) -> AppResult<()> {
    sqlx::query("INSERT INTO branches (id, tenant_id, name, created_at) VALUES (?, ?, ?, ?)")
        .bind(branch.id.to_string())
        .bind(branch.tenant_id.to_string())
        .bind(&branch.name)
        .bind(time::to_db(branch.created_at))
        .execute(pool)
        .await
        .map_err(map_db_err)?;
    Ok(())
}

pub async fn insert_menu_item(pool: &SqlitePool, item: &MenuItem) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO menu_items (id, tenant_id, name, base_price, is_available, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(item.id.to_string())
    .bind(item.tenant_id.to_string())
    .bind(&item.name)
    .bind(money::to_db_string(item.base_price))
    .bind(item.is_available)
    .bind(time::to_db(item.created_at))
    .execute(pool)
    .await
    .map_err(map_db_err)?;
    Ok(())
}

pub async fn insert_modifier(pool: &SqlitePool, modifier: &Modifier) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO modifiers (id, tenant_id, name, price, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(modifier.id.to_string())
    .bind(modifier.tenant_id.to_string())
    .bind(&modifier.name)
    .bind(money::to_db_string(modifier.price))
    .bind(time::to_db(modifier.created_at))
    .execute(pool)
    .await
    .map_err(map_db_err)?;
    Ok(())
}
