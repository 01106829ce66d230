//! Expense handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use service_core::error::AppError;

use crate::middleware::ActorContext;
use crate::models::{CreateExpense, Expense};
use crate::startup::AppState;

/// Record an expense.
#[instrument(skip(state, input), fields(user_id = %actor.user_id))]
pub async fn create_expense(
    State(state): State<AppState>,
    actor: ActorContext,
    Json(input): Json<CreateExpense>,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    actor.require_admin()?;
    input.validate()?;

    if input.amount <= Decimal::ZERO {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Expense amount must be a positive amount"
        )));
    }

    let expense = state
        .db
        .create_expense(actor.user_id, actor.user_id, &input)
        .await?;

    info!(expense_id = %expense.expense_id, "Expense recorded");

    Ok((StatusCode::CREATED, Json(expense)))
}

/// List expenses for the calling landlord.
#[instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn list_expenses(
    State(state): State<AppState>,
    actor: ActorContext,
) -> Result<Json<Vec<Expense>>, AppError> {
    actor.require_admin()?;

    let expenses = state.db.list_expenses(actor.user_id).await?;

    Ok(Json(expenses))
}

/// Delete an expense.
#[instrument(skip(state), fields(user_id = %actor.user_id, expense_id = %expense_id))]
pub async fn delete_expense(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(expense_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    actor.require_admin()?;

    let deleted = state.db.delete_expense(actor.user_id, expense_id).await?;
    if !deleted {
        return Err(AppError::NotFound(anyhow::anyhow!("Expense not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
