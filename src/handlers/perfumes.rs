use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{Perfume, PerfumeDraft};

/// GET /perfumes - every entry, ascending id. Filtering and pagination are
/// the storefront's concern, not the API's.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Perfume>>, ApiError> {
    state
        .store
        .list()
        .await
        .map(Json)
        .map_err(|e| ApiError::storage(e, "Erro ao buscar perfumes"))
}

/// POST /perfumes - insert with store-assigned id, echoing the created row.
/// Field presence is enforced by the admin UI, not here; a missing `nome`
/// only fails at the table constraint.
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<PerfumeDraft>,
) -> Result<Json<Perfume>, ApiError> {
    state
        .store
        .create(draft)
        .await
        .map(Json)
        .map_err(|e| ApiError::storage(e, "Erro ao adicionar perfume"))
}

/// PUT /perfumes/:id - full-row replace. A nonexistent id answers 200 with
/// a null body rather than 404; last write wins and there is no
/// not-found signal.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(draft): Json<PerfumeDraft>,
) -> Result<Json<Option<Perfume>>, ApiError> {
    state
        .store
        .update(id, draft)
        .await
        .map(Json)
        .map_err(|e| ApiError::storage(e, "Erro ao editar perfume"))
}

/// DELETE /perfumes/:id - reports success whether or not the row existed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    state
        .store
        .delete(id)
        .await
        .map(|_| Json(json!({ "success": true })))
        .map_err(|e| ApiError::storage(e, "Erro ao remover perfume"))
}
