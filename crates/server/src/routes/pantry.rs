//! Pantry CRUD route handlers.
//!
//! Form input arrives raw and is normalized here before anything touches
//! the store; a single invalid entry fails the whole request with 400 since
//! form submissions are caller-correctable. Batch persistence reports
//! per-item outcomes instead of swallowing partial failures.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shelfsense_core::{PantryItem, RawItemInput, UserId};

use crate::db::{AddOutcome, PantryRepository};
use crate::error::Result;
use crate::state::AppState;

/// Query parameters for pantry listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub user_id: String,
}

/// Request body for adding items.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRequest {
    pub user_id: UserId,
    pub food_items: Vec<RawItemInput>,
}

/// Per-item outcome report for a batch add.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResponse {
    /// Items that landed in the store.
    pub inserted: usize,
    /// Items that failed to persist, with reasons.
    pub failed: Vec<FailedEntry>,
}

/// A single item that could not be persisted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedEntry {
    pub food_item: String,
    pub reason: String,
}

impl From<AddOutcome> for AddResponse {
    fn from(outcome: AddOutcome) -> Self {
        Self {
            inserted: outcome.inserted,
            failed: outcome
                .failed
                .into_iter()
                .map(|f| FailedEntry {
                    food_item: f.item.food_item.into_inner(),
                    reason: f.error.to_string(),
                })
                .collect(),
        }
    }
}

/// Request body for removing an item by name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    pub user_id: UserId,
    pub food_item_name: String,
}

/// Response for a removal: how many entries matched.
#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub removed: u64,
}

/// Request body for editing an item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub user_id: UserId,
    pub food_item_name: String,
    pub updated_item: RawItemInput,
}

/// List a user's pantry, soonest-expiring first.
#[instrument(skip(state), fields(user = %params.user_id))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PantryItem>>> {
    let repo = PantryRepository::new(state.pool());
    let pantry = repo.list_pantry(&UserId::new(params.user_id)).await?;
    Ok(Json(pantry))
}

/// Add a batch of items to a user's pantry.
#[instrument(skip(state, request), fields(user = %request.user_id, count = request.food_items.len()))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddRequest>,
) -> Result<Json<AddResponse>> {
    let mut items = Vec::with_capacity(request.food_items.len());
    for raw in &request.food_items {
        items.push(PantryItem::normalize(raw)?);
    }

    let repo = PantryRepository::new(state.pool());
    let outcome = repo.add_items(&request.user_id, &items).await?;

    tracing::info!(
        user = %request.user_id,
        inserted = outcome.inserted,
        failed = outcome.failed.len(),
        "Pantry items added"
    );
    Ok(Json(outcome.into()))
}

/// Remove every pantry entry matching a name. A no-op when nothing matches.
#[instrument(skip(state, request), fields(user = %request.user_id))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveRequest>,
) -> Result<Json<RemoveResponse>> {
    let repo = PantryRepository::new(state.pool());
    let removed = repo
        .remove_item(&request.user_id, &request.food_item_name)
        .await?;

    tracing::info!(user = %request.user_id, removed, "Pantry item removal");
    Ok(Json(RemoveResponse { removed }))
}

/// Replace the fields of the earliest item matching a name.
#[instrument(skip(state, request), fields(user = %request.user_id))]
pub async fn edit(
    State(state): State<AppState>,
    Json(request): Json<EditRequest>,
) -> Result<Json<PantryItem>> {
    let updated = PantryItem::normalize(&request.updated_item)?;

    let repo = PantryRepository::new(state.pool());
    repo.edit_item(&request.user_id, &request.food_item_name, &updated)
        .await?;

    Ok(Json(updated))
}
