//! Meter reading model for rental-service.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// One electricity meter reading for a tenant's billing period.
///
/// At most one row exists per (tenant, month, year); recording a value for an
/// already-recorded period updates that row in place. Rows are never deleted,
/// so the full reading history stays available for billing disputes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MeterReading {
    pub reading_id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub reading_value: Decimal,
    pub reading_date: NaiveDate,
    pub month: i32,
    pub year: i32,
    /// Derived consumption: current minus the previous period's reading.
    /// Zero for a tenant's first-ever reading.
    pub units_consumed: Option<Decimal>,
    pub recorded_by: Uuid,
    pub notes: Option<String>,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// Request payload for recording a meter reading.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordMeterReading {
    pub tenant_id: Uuid,
    pub reading_value: Decimal,
    pub reading_date: NaiveDate,
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    #[validate(range(min = 2020, max = 2100))]
    pub year: i32,
    pub notes: Option<String>,
}
