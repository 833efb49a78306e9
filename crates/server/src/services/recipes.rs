//! Spoonacular client for recipe lookup by ingredients.
//!
//! The core never calls this directly; the HTTP layer derives the
//! ingredient list from the pantry and forwards the names here.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::RecipeConfig;

/// Spoonacular API base URL.
const BASE_URL: &str = "https://api.spoonacular.com";

/// Errors that can occur when searching for recipes.
#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },
}

/// A recipe suggestion returned by the search.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Spoonacular recipe id.
    pub id: i64,
    /// Recipe title.
    pub title: String,
    /// Image URL, when available.
    pub image: Option<String>,
    /// How many pantry ingredients the recipe uses.
    pub used_ingredient_count: Option<u32>,
    /// How many additional ingredients the recipe needs.
    pub missed_ingredient_count: Option<u32>,
}

/// Client for the recipe-search collaborator.
#[derive(Clone)]
pub struct RecipeClient {
    client: reqwest::Client,
    api_key: SecretString,
}

impl RecipeClient {
    /// Create a new recipe search client.
    #[must_use]
    pub fn new(config: &RecipeConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
        }
    }

    /// Find recipes using the given ingredients (comma-separated names).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with an
    /// error status.
    #[instrument(skip(self, ingredients), fields(count = number))]
    pub async fn find_by_ingredients(
        &self,
        ingredients: &str,
        number: u32,
    ) -> Result<Vec<Recipe>, RecipeError> {
        let url = format!("{BASE_URL}/recipes/findByIngredients");
        let number = number.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ingredients", ingredients),
                ("number", number.as_str()),
                ("apiKey", self.api_key.expose_secret()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RecipeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
