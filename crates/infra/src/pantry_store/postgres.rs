//! Postgres-backed pantry store.
//!
//! ## Error mapping
//!
//! SQLx errors are wrapped into [`PantryStoreError::Database`] with the
//! failing operation name. A unique violation on `pantry_entry.name` (two
//! concurrent writers racing to create the same name) surfaces the same way —
//! it is an infrastructure error, not a domain one; the writer funnel in the
//! service keeps it out of normal operation.
//!
//! ## Thread safety
//!
//! `PostgresPantryStore` is `Send + Sync`; all operations go through the SQLx
//! connection pool.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use larder_core::EntryId;
use larder_pantry::PantryEntry;

use super::{PantryStore, PantryStoreError};

#[derive(Debug, Clone)]
pub struct PostgresPantryStore {
    pool: PgPool,
}

impl PostgresPantryStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotently create the pantry table and its unique name index.
    pub async fn init_schema(pool: &PgPool) -> Result<(), PantryStoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pantry_entry (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                quantity DOUBLE PRECISION NOT NULL,
                unit TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("init_schema", e))?;
        Ok(())
    }
}

fn map_sqlx_error(operation: &'static str, e: sqlx::Error) -> PantryStoreError {
    PantryStoreError::database(operation, e.to_string())
}

fn entry_from_row(row: &PgRow) -> Result<PantryEntry, sqlx::Error> {
    Ok(PantryEntry {
        id: EntryId::from_uuid(row.try_get::<Uuid, _>("id")?),
        name: row.try_get("name")?,
        amount: row.try_get("quantity")?,
        unit: row.try_get("unit")?,
    })
}

#[async_trait]
impl PantryStore for PostgresPantryStore {
    async fn find_all(&self) -> Result<Vec<PantryEntry>, PantryStoreError> {
        let rows = sqlx::query("SELECT id, name, quantity, unit FROM pantry_entry")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.iter()
            .map(|row| entry_from_row(row).map_err(|e| map_sqlx_error("find_all", e)))
            .collect()
    }

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<PantryEntry>, PantryStoreError> {
        if names.is_empty() {
            return Ok(vec![]);
        }

        let rows =
            sqlx::query("SELECT id, name, quantity, unit FROM pantry_entry WHERE name = ANY($1)")
                .bind(names)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("find_by_names", e))?;

        rows.iter()
            .map(|row| entry_from_row(row).map_err(|e| map_sqlx_error("find_by_names", e)))
            .collect()
    }

    async fn save_all(
        &self,
        entries: Vec<PantryEntry>,
    ) -> Result<Vec<PantryEntry>, PantryStoreError> {
        if entries.is_empty() {
            return Ok(vec![]);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        for entry in &entries {
            sqlx::query(
                r#"
                INSERT INTO pantry_entry (id, name, quantity, unit)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id)
                DO UPDATE SET
                    name = EXCLUDED.name,
                    quantity = EXCLUDED.quantity,
                    unit = EXCLUDED.unit
                "#,
            )
            .bind(entry.id.as_uuid())
            .bind(&entry.name)
            .bind(entry.amount)
            .bind(&entry.unit)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("save_all", e))?;
        }

        // Return the persisted form of exactly the written rows, read inside
        // the same transaction, in input order.
        let ids: Vec<Uuid> = entries.iter().map(|e| *e.id.as_uuid()).collect();
        let rows = sqlx::query("SELECT id, name, quantity, unit FROM pantry_entry WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("save_all", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        let mut by_id: HashMap<Uuid, PantryEntry> = HashMap::with_capacity(rows.len());
        for row in &rows {
            let entry = entry_from_row(row).map_err(|e| map_sqlx_error("save_all", e))?;
            by_id.insert(*entry.id.as_uuid(), entry);
        }

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}
