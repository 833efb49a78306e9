//! Recipe lookup route.
//!
//! Derives the ingredient list from the user's pantry and forwards the item
//! names to the recipe-search collaborator.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use shelfsense_core::UserId;

use crate::db::PantryRepository;
use crate::error::{AppError, Result};
use crate::services::recipes::Recipe;
use crate::state::AppState;

/// Query parameters for recipe lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeParams {
    pub user_id: String,
    pub number_of_recipes: u32,
}

/// Find recipes that use what's currently in the pantry.
///
/// An empty pantry short-circuits to an empty list without calling the
/// collaborator.
#[instrument(skip(state), fields(user = %params.user_id, count = params.number_of_recipes))]
pub async fn find(
    State(state): State<AppState>,
    Query(params): Query<RecipeParams>,
) -> Result<Json<Vec<Recipe>>> {
    let client = state
        .recipes()
        .ok_or(AppError::NotConfigured("recipe search"))?;

    let repo = PantryRepository::new(state.pool());
    let pantry = repo.list_pantry(&UserId::new(params.user_id)).await?;

    if pantry.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let ingredients: Vec<&str> = pantry.iter().map(|item| item.food_item.as_str()).collect();
    let recipes = client
        .find_by_ingredients(&ingredients.join(","), params.number_of_recipes)
        .await?;

    Ok(Json(recipes))
}
