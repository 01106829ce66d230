//! Dashboard handler.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use service_core::error::AppError;

use crate::middleware::ActorContext;
use crate::models::DashboardSummary;
use crate::startup::AppState;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct DashboardQuery {
    #[validate(range(min = 1, max = 12))]
    pub month: Option<i32>,
    #[validate(range(min = 2020, max = 2100))]
    pub year: Option<i32>,
}

/// Landlord dashboard: income, expenses, tenant counts, pending bills.
/// Defaults to the current calendar month.
#[instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn summary(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    actor.require_admin()?;
    query.validate()?;

    let today = Utc::now().date_naive();
    let month = query.month.unwrap_or(today.month() as i32);
    let year = query.year.unwrap_or(today.year());

    let summary = state
        .db
        .dashboard_summary(actor.user_id, month, year)
        .await?;

    Ok(Json(summary))
}
