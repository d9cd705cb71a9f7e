use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Mutex;

use super::{CatalogStore, Perfume, PerfumeDraft, StoreError};

/// In-memory catalog store with the same observable semantics as the
/// Postgres one, including the NOT NULL constraint on `nome`. Backs the
/// integration tests so they run without a live database.
#[derive(Default)]
pub struct MemoryCatalogStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: Vec<Perfume>,
    next_id: i32,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn materialize(id: i32, draft: PerfumeDraft) -> Result<Perfume, StoreError> {
    let nome = draft.nome.ok_or(StoreError::MissingColumn("nome"))?;
    Ok(Perfume {
        id,
        nome,
        categoria: draft.categoria,
        img: draft.img,
        descricao: draft.descricao,
        preco: draft.preco.unwrap_or(Decimal::ZERO),
    })
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Perfume>, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let mut rows = inner.rows.clone();
        rows.sort_by_key(|p| p.id);
        Ok(rows)
    }

    async fn create(&self, draft: PerfumeDraft) -> Result<Perfume, StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.next_id += 1;
        let row = materialize(inner.next_id, draft)?;
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, draft: PerfumeDraft) -> Result<Option<Perfume>, StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match inner.rows.iter_mut().find(|p| p.id == id) {
            Some(existing) => {
                let row = materialize(id, draft)?;
                *existing = row.clone();
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.rows.retain(|p| p.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(nome: &str) -> PerfumeDraft {
        PerfumeDraft {
            nome: Some(nome.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn ids_ascend_and_list_is_ordered() {
        let store = MemoryCatalogStore::new();
        let a = store.create(draft("a")).await.unwrap();
        let b = store.create(draft("b")).await.unwrap();
        assert!(b.id > a.id);

        let rows = store.list().await.unwrap();
        let ids: Vec<i32> = rows.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn update_missing_id_yields_none() {
        let store = MemoryCatalogStore::new();
        assert!(store.update(9999, draft("x")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryCatalogStore::new();
        let row = store.create(draft("a")).await.unwrap();
        store.delete(row.id).await.unwrap();
        store.delete(row.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_nome_is_a_constraint_violation() {
        let store = MemoryCatalogStore::new();
        let result = store.create(PerfumeDraft::default()).await;
        assert!(matches!(result, Err(StoreError::MissingColumn("nome"))));
    }

    #[tokio::test]
    async fn missing_preco_defaults_to_zero() {
        let store = MemoryCatalogStore::new();
        let row = store.create(draft("a")).await.unwrap();
        assert_eq!(row.preco, Decimal::ZERO);
    }
}
