use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use super::{CatalogStore, Perfume, PerfumeDraft, StoreError};

/// Catalog store over a pooled Postgres connection. Every operation is a
/// single autocommit statement; there is no transaction scope to manage.
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Connect and ensure the `perfumes` table exists. Failure here is meant
    /// to be fatal to startup: the service must not serve without its table.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new().connect(database_url).await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS perfumes (
                id SERIAL PRIMARY KEY,
                nome TEXT NOT NULL,
                descricao TEXT,
                preco NUMERIC(10,2) NOT NULL DEFAULT 0,
                img TEXT,
                categoria TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Tabela 'perfumes' pronta.");
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Perfume>, StoreError> {
        let rows = sqlx::query_as::<_, Perfume>(
            "SELECT id, nome, categoria, img, descricao, preco FROM perfumes ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, draft: PerfumeDraft) -> Result<Perfume, StoreError> {
        let row = sqlx::query_as::<_, Perfume>(
            "INSERT INTO perfumes (nome, categoria, img, descricao, preco) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, nome, categoria, img, descricao, preco",
        )
        .bind(draft.nome)
        .bind(draft.categoria)
        .bind(draft.img)
        .bind(draft.descricao)
        .bind(draft.preco.unwrap_or(Decimal::ZERO))
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i32, draft: PerfumeDraft) -> Result<Option<Perfume>, StoreError> {
        // Full-row replace; fetch_optional keeps the missing-id case a
        // plain None instead of an error.
        let row = sqlx::query_as::<_, Perfume>(
            "UPDATE perfumes SET nome=$1, categoria=$2, img=$3, descricao=$4, preco=$5 \
             WHERE id=$6 \
             RETURNING id, nome, categoria, img, descricao, preco",
        )
        .bind(draft.nome)
        .bind(draft.categoria)
        .bind(draft.img)
        .bind(draft.descricao)
        .bind(draft.preco.unwrap_or(Decimal::ZERO))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM perfumes WHERE id=$1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
