//! Bill model for rental-service.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Payment status of a bill.
///
/// `pending` is the initial state set at generation; `paid` is terminal for
/// the normal flow. `partial` and `overdue` are set by administrative action;
/// nothing in this service transitions into them automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Partial,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Overdue => "overdue",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "paid" => PaymentStatus::Paid,
            "partial" => PaymentStatus::Partial,
            "overdue" => PaymentStatus::Overdue,
            _ => PaymentStatus::Pending,
        }
    }
}

/// One line on a bill, e.g. "Electricity, ₹1200 (120 units × ₹10)".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLineItem {
    pub description: String,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Bill row. A bill is an immutable snapshot of one billing period: editing
/// the underlying meter reading afterwards never recomputes it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bill {
    pub bill_id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub meter_reading_id: Option<Uuid>,
    pub month: i32,
    pub year: i32,
    pub rent_amount: Decimal,
    pub electricity_units: Decimal,
    pub electricity_rate: Decimal,
    pub electricity_amount: Decimal,
    pub water_amount: Decimal,
    pub other_charges: Decimal,
    pub total_amount: Decimal,
    pub payment_status: String,
    pub payment_date: Option<NaiveDate>,
    pub payment_notes: Option<String>,
    pub bill_number: String,
    pub generated_by: Uuid,
    pub line_items: serde_json::Value,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// A computed bill that has not been persisted yet. Produced by the billing
/// engine; the store is responsible for inserting it (and for detecting a
/// duplicate period via the unique constraint).
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub tenant_id: Uuid,
    pub meter_reading_id: Option<Uuid>,
    pub month: i32,
    pub year: i32,
    pub rent_amount: Decimal,
    pub electricity_units: Decimal,
    pub electricity_rate: Decimal,
    pub electricity_amount: Decimal,
    pub water_amount: Decimal,
    pub other_charges: Decimal,
    pub total_amount: Decimal,
    pub bill_number: String,
    pub generated_by: Uuid,
    pub line_items: Vec<BillLineItem>,
}

/// Request payload for generating a bill.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateBill {
    pub tenant_id: Uuid,
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    #[validate(range(min = 2020, max = 2100))]
    pub year: i32,
    pub water_amount: Option<Decimal>,
    pub other_charges: Option<Decimal>,
    pub other_charges_description: Option<String>,
}
