//! Voice transcript interpretation route.
//!
//! Mirrors the two-step flow of the original UI: this endpoint interprets
//! and validates, the client then submits the returned items via
//! `POST /pantry`. Nothing is stored here.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use shelfsense_core::{DroppedCandidate, PantryItem, validate_candidates};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Request body carrying the raw transcript.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretRequest {
    pub speech_input: String,
}

/// Validated items plus the candidates dropped during normalization.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretResponse {
    pub items: Vec<PantryItem>,
    pub dropped: Vec<DroppedCandidate>,
}

/// Interpret a voice transcript into validated pantry items.
///
/// The language model's output is untrusted; the core extractor validates
/// it before anything is returned. Per-candidate failures are logged and
/// reported, not fatal - a bad entry doesn't block the rest of a multi-item
/// transcript.
#[instrument(skip(state, request))]
pub async fn interpret(
    State(state): State<AppState>,
    Json(request): Json<InterpretRequest>,
) -> Result<Json<InterpretResponse>> {
    let transcript = request.speech_input.trim();
    if transcript.is_empty() {
        return Err(AppError::BadRequest("speechInput is required".to_owned()));
    }

    let interpreter = state
        .interpreter()
        .ok_or(AppError::NotConfigured("transcript interpreter"))?;

    let today = Utc::now().date_naive();
    let candidates = interpreter.interpret(transcript, today).await?;
    let extraction = validate_candidates(&candidates)?;

    for dropped in &extraction.dropped {
        warn!(
            index = dropped.index,
            food_item = dropped.food_item.as_deref().unwrap_or("<unknown>"),
            reason = %dropped.reason,
            "Dropped transcript candidate"
        );
    }

    tracing::info!(
        accepted = extraction.items.len(),
        dropped = extraction.dropped.len(),
        "Transcript interpreted"
    );

    Ok(Json(InterpretResponse {
        items: extraction.items,
        dropped: extraction.dropped,
    }))
}
