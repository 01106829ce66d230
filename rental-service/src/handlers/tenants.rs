//! Tenant handlers.
//!
//! The plaintext Aadhaar number exists only inside the create and reveal
//! handlers. Everything that leaves this module carries the encrypted
//! envelope (storage) or the masked string (display), never both roles in
//! one field.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use service_core::error::AppError;

use crate::middleware::ActorContext;
use crate::models::{CreateTenant, NewTenant, TenantView, UpdateTenant};
use crate::services::{metrics, vault};
use crate::startup::AppState;

use rust_decimal::Decimal;

#[derive(Debug, Deserialize)]
pub struct TenantListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Serialize)]
pub struct RevealedAadhaar {
    pub tenant_id: Uuid,
    pub aadhaar_number: String,
}

/// Create a tenant. The Aadhaar number is validated, encrypted, and masked
/// before the record touches the store.
#[instrument(skip(state, input), fields(user_id = %actor.user_id, flat = %input.flat_number))]
pub async fn create_tenant(
    State(state): State<AppState>,
    actor: ActorContext,
    Json(input): Json<CreateTenant>,
) -> Result<(StatusCode, Json<TenantView>), AppError> {
    actor.require_admin()?;
    input.validate()?;

    if input.monthly_rent <= Decimal::ZERO {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Monthly rent must be a positive amount"
        )));
    }

    if !vault::is_valid_aadhaar(&input.aadhaar_number) {
        metrics::record_error("invalid_aadhaar", "create_tenant");
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Aadhaar number must be exactly 12 digits"
        )));
    }

    let aadhaar_encrypted = state.vault.encrypt(&input.aadhaar_number)?;
    let aadhaar_masked = vault::mask(&input.aadhaar_number);

    let record = NewTenant {
        landlord_id: actor.user_id,
        user_id: input.user_id,
        full_name: input.full_name,
        mobile_number: input.mobile_number,
        email: input.email,
        flat_number: input.flat_number,
        floor_number: input.floor_number,
        bhk_type: input.bhk_type.as_str().to_string(),
        monthly_rent: input.monthly_rent,
        rent_start_date: input.rent_start_date,
        aadhaar_encrypted,
        aadhaar_masked,
    };

    let tenant = state.db.create_tenant(&record).await?;

    info!(tenant_id = %tenant.tenant_id, "Tenant onboarded");

    Ok((StatusCode::CREATED, Json(TenantView::from(tenant))))
}

/// List tenants for the calling landlord.
#[instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn list_tenants(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<TenantListQuery>,
) -> Result<Json<Vec<TenantView>>, AppError> {
    actor.require_admin()?;

    let tenants = state
        .db
        .list_tenants(actor.user_id, !query.include_inactive)
        .await?;

    Ok(Json(tenants.into_iter().map(TenantView::from).collect()))
}

/// Get a single tenant.
#[instrument(skip(state), fields(user_id = %actor.user_id, tenant_id = %tenant_id))]
pub async fn get_tenant(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<TenantView>, AppError> {
    actor.require_admin()?;

    let tenant = state
        .db
        .get_tenant(actor.user_id, tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Tenant not found")))?;

    Ok(Json(TenantView::from(tenant)))
}

/// Update a tenant. Aadhaar is not updatable through this path.
#[instrument(skip(state, input), fields(user_id = %actor.user_id, tenant_id = %tenant_id))]
pub async fn update_tenant(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(tenant_id): Path<Uuid>,
    Json(input): Json<UpdateTenant>,
) -> Result<Json<TenantView>, AppError> {
    actor.require_admin()?;
    input.validate()?;

    if let Some(rent) = input.monthly_rent {
        if rent <= Decimal::ZERO {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Monthly rent must be a positive amount"
            )));
        }
    }

    let tenant = state
        .db
        .update_tenant(actor.user_id, tenant_id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Tenant not found")))?;

    Ok(Json(TenantView::from(tenant)))
}

/// Reveal a tenant's full Aadhaar number. On-demand decryption only; the
/// plaintext is returned in this response and nowhere else. Every access
/// is logged.
#[instrument(skip(state), fields(user_id = %actor.user_id, tenant_id = %tenant_id))]
pub async fn reveal_aadhaar(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<RevealedAadhaar>, AppError> {
    actor.require_admin()?;

    let tenant = state
        .db
        .get_tenant(actor.user_id, tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Tenant not found")))?;

    let aadhaar_number = state.vault.decrypt(&tenant.aadhaar_encrypted).map_err(|e| {
        metrics::record_error("decryption_failed", "reveal_aadhaar");
        warn!(tenant_id = %tenant_id, "Aadhaar decryption failed");
        AppError::from(e)
    })?;

    info!(tenant_id = %tenant_id, accessed_by = %actor.user_id, "Aadhaar revealed");

    Ok(Json(RevealedAadhaar {
        tenant_id,
        aadhaar_number,
    }))
}
