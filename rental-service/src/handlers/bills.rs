//! Bill handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use service_core::error::AppError;

use crate::middleware::ActorContext;
use crate::models::{Bill, GenerateBill, PaymentStatus};
use crate::services::{billing, metrics};
use crate::startup::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct BillListQuery {
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    #[validate(range(min = 2020, max = 2100))]
    pub year: i32,
}

#[derive(Debug, Deserialize)]
pub struct MarkPaid {
    pub payment_date: Option<NaiveDate>,
    pub payment_notes: Option<String>,
}

/// Generate the bill for a tenant and period.
///
/// Requires that the period's meter reading already exists. At most one bill
/// per (tenant, period) can ever be created; a duplicate attempt returns 409
/// with the existing bill's id and changes nothing.
#[instrument(
    skip(state, input),
    fields(user_id = %actor.user_id, tenant_id = %input.tenant_id, month = input.month, year = input.year)
)]
pub async fn generate_bill(
    State(state): State<AppState>,
    actor: ActorContext,
    Json(input): Json<GenerateBill>,
) -> Result<Response, AppError> {
    actor.require_admin()?;
    input.validate()?;

    let tenant = state
        .db
        .get_tenant(actor.user_id, input.tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Tenant not found")))?;

    let reading = state
        .db
        .get_reading_for_period(input.tenant_id, input.month, input.year)
        .await?
        .ok_or_else(|| {
            metrics::record_error("missing_reading", "generate_bill");
            AppError::from(billing::BillingError::MissingReading {
                month: input.month,
                year: input.year,
            })
        })?;

    let new_bill = billing::build_bill(
        &tenant,
        &reading,
        &state.config.billing,
        input.water_amount,
        input.other_charges.unwrap_or_default(),
        input.other_charges_description.as_deref(),
        actor.user_id,
    )?;

    match state.db.create_bill(actor.user_id, &new_bill).await {
        Ok(bill) => {
            metrics::record_bill_generated(&actor.user_id.to_string());
            info!(bill_id = %bill.bill_id, bill_number = %bill.bill_number, "Bill generated");
            Ok((StatusCode::CREATED, Json(bill)).into_response())
        }
        Err(AppError::Conflict(_)) => {
            metrics::record_error("duplicate_bill", "generate_bill");
            let existing = state
                .db
                .get_bill_for_period(input.tenant_id, input.month, input.year)
                .await?;
            Ok((
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "A bill already exists for this tenant and period",
                    "existing_bill_id": existing.map(|b| b.bill_id),
                })),
            )
                .into_response())
        }
        Err(e) => Err(e),
    }
}

/// List bills for a period across the landlord's tenants.
#[instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn list_bills(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<BillListQuery>,
) -> Result<Json<Vec<Bill>>, AppError> {
    actor.require_admin()?;
    query.validate()?;

    let bills = state
        .db
        .list_bills(actor.user_id, query.month, query.year)
        .await?;

    Ok(Json(bills))
}

/// Get a single bill.
#[instrument(skip(state), fields(user_id = %actor.user_id, bill_id = %bill_id))]
pub async fn get_bill(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(bill_id): Path<Uuid>,
) -> Result<Json<Bill>, AppError> {
    actor.require_admin()?;

    let bill = state
        .db
        .get_bill(actor.user_id, bill_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Bill not found")))?;

    Ok(Json(bill))
}

/// Mark a bill as paid. Idempotent: re-marking keeps the original payment
/// date.
#[instrument(skip(state, input), fields(user_id = %actor.user_id, bill_id = %bill_id))]
pub async fn mark_bill_paid(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(bill_id): Path<Uuid>,
    Json(input): Json<MarkPaid>,
) -> Result<Json<Bill>, AppError> {
    actor.require_admin()?;

    let bill = state
        .db
        .get_bill(actor.user_id, bill_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Bill not found")))?;

    let paid_on = input
        .payment_date
        .unwrap_or_else(|| Utc::now().date_naive());
    let paid = billing::mark_paid(bill, paid_on);

    let updated = state
        .db
        .update_bill_payment(
            actor.user_id,
            bill_id,
            PaymentStatus::from_string(&paid.payment_status),
            paid.payment_date,
            input.payment_notes.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Bill not found")))?;

    info!(bill_id = %updated.bill_id, "Bill marked paid");

    Ok(Json(updated))
}

/// Bills for the calling tenant user, newest period first.
#[instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn my_bills(
    State(state): State<AppState>,
    actor: ActorContext,
) -> Result<Json<Vec<Bill>>, AppError> {
    let tenant = state
        .db
        .find_tenant_by_user(actor.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!("No tenant record is linked to this user"))
        })?;

    let bills = state.db.list_bills_for_tenant(tenant.tenant_id).await?;

    Ok(Json(bills))
}
