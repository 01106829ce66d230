//! Meter billing engine.
//!
//! Pure calculation: converts a meter reading plus billing-period context
//! into a consumption figure and a fully itemized bill. Persistence is the
//! store's job; nothing here touches the database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use service_core::error::AppError;

use crate::config::BillingPolicy;
use crate::models::{Bill, BillLineItem, MeterReading, NewBill, PaymentStatus, Tenant};

/// Bill number prefix ("Ghar Lekha").
pub const BILL_NUMBER_PREFIX: &str = "GL";

#[derive(Debug, Error, PartialEq)]
pub enum BillingError {
    /// Meters are monotonically increasing counters; a reading below the
    /// previous period's value is a data-entry error, never clamped.
    #[error("Meter reading {current} is lower than the previous reading {previous}")]
    InvalidReading { current: Decimal, previous: Decimal },

    /// Meter counters start at zero; a negative value cannot come from a
    /// real meter.
    #[error("Meter reading {value} is negative")]
    NegativeReading { value: Decimal },

    #[error("No meter reading is recorded for period {month}/{year}")]
    MissingReading { month: i32, year: i32 },

    #[error("A bill already exists for this tenant and period")]
    DuplicateBill,

    #[error("{charge} amount {amount} is negative")]
    NegativeCharge {
        charge: &'static str,
        amount: Decimal,
    },
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        match &err {
            BillingError::DuplicateBill => AppError::Conflict(anyhow::Error::new(err)),
            _ => AppError::BadRequest(anyhow::Error::new(err)),
        }
    }
}

/// Consumption units for a billing period.
///
/// A tenant's first-ever reading has no basis for consumption and yields
/// zero by policy. Otherwise the result is `current - previous`, and a
/// current reading below the previous one is rejected before anything is
/// persisted.
pub fn compute_consumption(
    current: Decimal,
    previous: Option<Decimal>,
) -> Result<Decimal, BillingError> {
    if current < Decimal::ZERO {
        return Err(BillingError::NegativeReading { value: current });
    }

    let Some(previous) = previous else {
        return Ok(Decimal::ZERO);
    };

    if current < previous {
        return Err(BillingError::InvalidReading { current, previous });
    }

    Ok(current - previous)
}

/// Deterministic, human-readable bill number for a (flat, period) pair,
/// e.g. flat "A-101" for March 2024 -> "GL-A-101-202403".
pub fn bill_number(flat_number: &str, month: i32, year: i32) -> String {
    format!("{}-{}-{}{:02}", BILL_NUMBER_PREFIX, flat_number, year, month)
}

/// Build the itemized bill for one tenant and period.
///
/// Line items are ordered: rent, electricity (with the factors spelled out),
/// water, and other charges when present. The total is always the exact sum
/// of the line items; it is never stored independently of them.
pub fn build_bill(
    tenant: &Tenant,
    reading: &MeterReading,
    policy: &BillingPolicy,
    water_amount: Option<Decimal>,
    other_charges: Decimal,
    other_charges_description: Option<&str>,
    generated_by: Uuid,
) -> Result<NewBill, BillingError> {
    let units = reading
        .units_consumed
        .ok_or(BillingError::MissingReading {
            month: reading.month,
            year: reading.year,
        })?;

    let rate = policy.electricity_rate_per_unit;
    let electricity_amount = units * rate;
    let water_amount = water_amount.unwrap_or(policy.default_water_charges);

    if water_amount < Decimal::ZERO {
        return Err(BillingError::NegativeCharge {
            charge: "Water charges",
            amount: water_amount,
        });
    }
    if other_charges < Decimal::ZERO {
        return Err(BillingError::NegativeCharge {
            charge: "Other charges",
            amount: other_charges,
        });
    }

    let mut line_items = vec![
        BillLineItem {
            description: "Monthly Rent".to_string(),
            amount: tenant.monthly_rent,
            details: None,
        },
        BillLineItem {
            description: "Electricity".to_string(),
            amount: electricity_amount,
            details: Some(format!(
                "{} units × ₹{}",
                units.normalize(),
                rate.normalize()
            )),
        },
        BillLineItem {
            description: "Water Charges".to_string(),
            amount: water_amount,
            details: None,
        },
    ];

    if other_charges > Decimal::ZERO {
        line_items.push(BillLineItem {
            description: "Other Charges".to_string(),
            amount: other_charges,
            details: other_charges_description.map(str::to_string),
        });
    }

    let total_amount: Decimal = line_items.iter().map(|item| item.amount).sum();

    Ok(NewBill {
        tenant_id: tenant.tenant_id,
        meter_reading_id: Some(reading.reading_id),
        month: reading.month,
        year: reading.year,
        rent_amount: tenant.monthly_rent,
        electricity_units: units,
        electricity_rate: rate,
        electricity_amount,
        water_amount,
        other_charges,
        total_amount,
        bill_number: bill_number(&tenant.flat_number, reading.month, reading.year),
        generated_by,
        line_items,
    })
}

/// Transition a bill to `paid`, stamping the payment date.
///
/// Marking an already-paid bill paid again is a safe no-op that keeps the
/// original payment date. Reverting paid -> pending is not an operation of
/// this engine.
pub fn mark_paid(mut bill: Bill, paid_on: NaiveDate) -> Bill {
    if PaymentStatus::from_string(&bill.payment_status) == PaymentStatus::Paid {
        return bill;
    }

    bill.payment_status = PaymentStatus::Paid.as_str().to_string();
    bill.payment_date = Some(paid_on);
    bill
}
