//! Meter reading handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use service_core::error::AppError;

use crate::middleware::ActorContext;
use crate::models::{MeterReading, RecordMeterReading};
use crate::services::{billing, metrics};
use crate::startup::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ReadingListQuery {
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    #[validate(range(min = 2020, max = 2100))]
    pub year: i32,
}

/// Response for a recorded reading. `bill_exists` tells the caller that a
/// bill for this period was already generated, so the new value will not be
/// reflected in it.
#[derive(Debug, Serialize)]
pub struct ReadingResponse {
    #[serde(flatten)]
    pub reading: MeterReading,
    pub bill_exists: bool,
}

/// Record (or correct) a meter reading for a tenant and period.
///
/// Consumption is derived from the most recent reading of any earlier
/// period. A backward reading is rejected before anything is written.
#[instrument(
    skip(state, input),
    fields(user_id = %actor.user_id, tenant_id = %input.tenant_id, month = input.month, year = input.year)
)]
pub async fn record_reading(
    State(state): State<AppState>,
    actor: ActorContext,
    Json(input): Json<RecordMeterReading>,
) -> Result<(StatusCode, Json<ReadingResponse>), AppError> {
    actor.require_admin()?;
    input.validate()?;

    // Scope check: the tenant must belong to the calling landlord.
    state
        .db
        .get_tenant(actor.user_id, input.tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Tenant not found")))?;

    let previous = state
        .db
        .get_previous_reading(input.tenant_id, input.month, input.year)
        .await?;

    let units_consumed = billing::compute_consumption(
        input.reading_value,
        previous.map(|r| r.reading_value),
    )
    .map_err(|e| {
        metrics::record_error("invalid_reading", "record_reading");
        AppError::from(e)
    })?;

    let reading = state
        .db
        .upsert_reading(actor.user_id, actor.user_id, &input, units_consumed)
        .await?;

    let bill_exists = state
        .db
        .get_bill_for_period(input.tenant_id, input.month, input.year)
        .await?
        .is_some();

    if bill_exists {
        info!(
            reading_id = %reading.reading_id,
            "Reading recorded after bill generation; existing bill is unchanged"
        );
    }

    metrics::record_reading_recorded(&actor.user_id.to_string());

    Ok((
        StatusCode::CREATED,
        Json(ReadingResponse {
            reading,
            bill_exists,
        }),
    ))
}

/// List readings for a period across the landlord's tenants.
#[instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn list_readings(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<ReadingListQuery>,
) -> Result<Json<Vec<MeterReading>>, AppError> {
    actor.require_admin()?;
    query.validate()?;

    let readings = state
        .db
        .list_readings(actor.user_id, query.month, query.year)
        .await?;

    Ok(Json(readings))
}
