//! Note handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use service_core::error::AppError;

use crate::middleware::ActorContext;
use crate::models::{CreateNote, Note};
use crate::startup::AppState;

/// Create a note.
#[instrument(skip(state, input), fields(user_id = %actor.user_id))]
pub async fn create_note(
    State(state): State<AppState>,
    actor: ActorContext,
    Json(input): Json<CreateNote>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    actor.require_admin()?;
    input.validate()?;

    let note = state
        .db
        .create_note(actor.user_id, actor.user_id, &input)
        .await?;

    info!(note_id = %note.note_id, "Note created");

    Ok((StatusCode::CREATED, Json(note)))
}

/// List notes for the calling landlord.
#[instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn list_notes(
    State(state): State<AppState>,
    actor: ActorContext,
) -> Result<Json<Vec<Note>>, AppError> {
    actor.require_admin()?;

    let notes = state.db.list_notes(actor.user_id).await?;

    Ok(Json(notes))
}

/// Delete a note.
#[instrument(skip(state), fields(user_id = %actor.user_id, note_id = %note_id))]
pub async fn delete_note(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(note_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    actor.require_admin()?;

    let deleted = state.db.delete_note(actor.user_id, note_id).await?;
    if !deleted {
        return Err(AppError::NotFound(anyhow::anyhow!("Note not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
