//! `PostgreSQL` implementation of the `RecordStore` trait.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::debug;

use portal_core::employee_id::EmployeeId;
use portal_core::error::DomainError;
use portal_core::patch::merge_patch;
use portal_core::store::{RecordStore, StoredRecord};

use crate::infrastructure;
use crate::schema::{
    SELECT_RECORD, SELECT_RECORD_BY_EMPLOYEE_ID, SELECT_RECORD_FOR_UPDATE, UPSERT_RECORD,
};

/// `PostgreSQL`-backed onboarding record store.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Creates a new `PgRecordStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn fetch(&self, id: &str) -> Result<Option<Value>, DomainError> {
        let body: Option<Json<Value>> = sqlx::query_scalar(SELECT_RECORD)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;
        Ok(body.map(|Json(body)| body))
    }

    async fn merge(&self, id: &str, patch: Value) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| infrastructure(&e))?;

        let current: Option<Json<Value>> = sqlx::query_scalar(SELECT_RECORD_FOR_UPDATE)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| infrastructure(&e))?;
        let created = current.is_none();
        let mut body = current.map_or_else(|| Value::Object(Map::new()), |Json(body)| body);
        merge_patch(&mut body, &patch);

        sqlx::query(UPSERT_RECORD)
            .bind(id)
            .bind(Json(&body))
            .execute(&mut *tx)
            .await
            .map_err(|e| infrastructure(&e))?;
        tx.commit().await.map_err(|e| infrastructure(&e))?;

        debug!(record_id = %id, created, "record patch merged");
        Ok(())
    }

    async fn find_by_employee_id(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Option<StoredRecord>, DomainError> {
        let row: Option<(String, Json<Value>)> = sqlx::query_as(SELECT_RECORD_BY_EMPLOYEE_ID)
            .bind(employee_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;
        Ok(row.map(|(id, Json(body))| StoredRecord { id, body }))
    }
}
