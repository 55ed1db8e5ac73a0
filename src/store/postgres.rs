use anyhow::Context;
use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::records::model::{CredentialRecord, RecordFields};
use crate::store::RecordStore;

/// Postgres-backed record store. Listing order follows insertion order via
/// the table's created_at column.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list(&self) -> anyhow::Result<Vec<CredentialRecord>> {
        let records = sqlx::query_as::<_, CredentialRecord>(
            r#"
            SELECT id, site, username, password
            FROM passwords
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("list passwords")?;
        Ok(records)
    }

    async fn create(&self, fields: RecordFields) -> anyhow::Result<CredentialRecord> {
        let record = sqlx::query_as::<_, CredentialRecord>(
            r#"
            INSERT INTO passwords (site, username, password)
            VALUES ($1, $2, $3)
            RETURNING id, site, username, password
            "#,
        )
        .bind(&fields.site)
        .bind(&fields.username)
        .bind(&fields.password)
        .fetch_one(&self.pool)
        .await
        .context("insert password")?;
        Ok(record)
    }

    async fn update(&self, id: Uuid, fields: RecordFields) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE passwords
            SET site = $2, username = $3, password = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&fields.site)
        .bind(&fields.username)
        .bind(&fields.password)
        .execute(&self.pool)
        .await
        .context("update password")?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<u64> {
        let result = sqlx::query(r#"DELETE FROM passwords WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete password")?;
        Ok(result.rows_affected())
    }
}
