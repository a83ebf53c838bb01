//! `PostgreSQL` implementation of the `AllowListStore` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use portal_core::employee_id::EmployeeId;
use portal_core::error::DomainError;
use portal_core::store::{AllowListEntry, AllowListStore};

use crate::infrastructure;
use crate::schema::{
    DELETE_ALLOW_LIST_ENTRY, SELECT_ALLOW_LIST, SELECT_ALLOW_LIST_ENTRY, UPSERT_ALLOW_LIST_ENTRY,
};

/// `PostgreSQL`-backed registration allow-list.
#[derive(Debug, Clone)]
pub struct PgAllowListStore {
    pool: PgPool,
}

impl PgAllowListStore {
    /// Creates a new `PgAllowListStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AllowListStore for PgAllowListStore {
    async fn upsert(
        &self,
        employee_id: &EmployeeId,
        entry: AllowListEntry,
    ) -> Result<(), DomainError> {
        sqlx::query(UPSERT_ALLOW_LIST_ENTRY)
            .bind(employee_id.as_str())
            .bind(entry.active)
            .bind(entry.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;
        Ok(())
    }

    async fn remove(&self, employee_id: &EmployeeId) -> Result<(), DomainError> {
        sqlx::query(DELETE_ALLOW_LIST_ENTRY)
            .bind(employee_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;
        Ok(())
    }

    async fn get(&self, employee_id: &EmployeeId) -> Result<Option<AllowListEntry>, DomainError> {
        let row: Option<(bool, DateTime<Utc>)> = sqlx::query_as(SELECT_ALLOW_LIST_ENTRY)
            .bind(employee_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;
        Ok(row.map(|(active, created_at)| AllowListEntry { active, created_at }))
    }

    async fn list(&self) -> Result<Vec<(EmployeeId, AllowListEntry)>, DomainError> {
        let rows: Vec<(String, bool, DateTime<Utc>)> = sqlx::query_as(SELECT_ALLOW_LIST)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;
        rows.into_iter()
            .map(|(key, active, created_at)| {
                let employee_id = EmployeeId::normalize(&key).map_err(|e| {
                    DomainError::Infrastructure(format!("invalid allow-list key {key:?}: {e}"))
                })?;
                Ok((employee_id, AllowListEntry { active, created_at }))
            })
            .collect()
    }
}
