use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

/// One row of the `perfumes` table: a sellable item with descriptive and
/// pricing fields. `id` is the only stable identity; nothing else is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Perfume {
    pub id: i32,
    pub nome: String,
    pub categoria: Option<String>,
    pub img: Option<String>,
    pub descricao: Option<String>,
    pub preco: Decimal,
}

/// Caller-supplied fields for create and update. The store enforces nothing
/// beyond the table's own constraints; field presence is the admin UI's
/// concern. A missing `preco` is written as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerfumeDraft {
    pub nome: Option<String>,
    pub categoria: Option<String>,
    pub img: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<Decimal>,
}

/// Errors from the catalog store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence seam for catalog entries. The Postgres implementation backs
/// the service; an in-memory one backs the tests.
///
/// Semantics shared by all implementations:
/// - `list` returns every entry in ascending `id` order
/// - `update` is a full-row replace; a missing `id` yields `Ok(None)`,
///   not an error (last-write-wins, no not-found signal)
/// - `delete` of a missing `id` still succeeds
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Pings the underlying storage; used by the health endpoint
    async fn health_check(&self) -> Result<(), StoreError>;

    async fn list(&self) -> Result<Vec<Perfume>, StoreError>;
    async fn create(&self, draft: PerfumeDraft) -> Result<Perfume, StoreError>;
    async fn update(&self, id: i32, draft: PerfumeDraft) -> Result<Option<Perfume>, StoreError>;
    async fn delete(&self, id: i32) -> Result<(), StoreError>;
}
