//! HTTP route handlers.
//!
//! The HTTP layer is thin glue: request shapes in, typed errors out. All
//! pantry semantics live in `shelfsense-core` and the repository.

pub mod pantry;
pub mod recipes;
pub mod voice;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/pantry",
            get(pantry::list)
                .post(pantry::add)
                .put(pantry::edit)
                .delete(pantry::remove),
        )
        .route("/interpret-voice", post(voice::interpret))
        .route("/recipes", get(recipes::find))
}
