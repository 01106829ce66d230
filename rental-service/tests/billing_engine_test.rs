//! Billing engine integration tests: reading-to-bill flow through the
//! public library API, without a database.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use rental_service::config::BillingPolicy;
use rental_service::models::{MeterReading, PaymentStatus, Tenant};
use rental_service::services::billing::{
    bill_number, build_bill, compute_consumption, mark_paid, BillingError,
};

fn dec(s: &str) -> Decimal {
    s.parse().expect("valid decimal literal")
}

fn tenant(flat: &str, rent: &str) -> Tenant {
    let now = Utc::now();
    Tenant {
        tenant_id: Uuid::new_v4(),
        landlord_id: Uuid::new_v4(),
        user_id: None,
        full_name: "Ravi Kumar".to_string(),
        mobile_number: "9812345670".to_string(),
        email: "ravi@example.com".to_string(),
        flat_number: flat.to_string(),
        floor_number: 2,
        bhk_type: "2BHK".to_string(),
        monthly_rent: dec(rent),
        rent_start_date: NaiveDate::from_ymd_opt(2023, 1, 15).expect("valid date"),
        aadhaar_encrypted: String::new(),
        aadhaar_masked: "XXXX XXXX 4321".to_string(),
        is_active: true,
        created_utc: now,
        updated_utc: now,
    }
}

fn reading_for(tenant: &Tenant, month: i32, year: i32, value: &str, units: &str) -> MeterReading {
    let now = Utc::now();
    MeterReading {
        reading_id: Uuid::new_v4(),
        tenant_id: tenant.tenant_id,
        landlord_id: tenant.landlord_id,
        reading_value: dec(value),
        reading_date: NaiveDate::from_ymd_opt(year, month as u32, 28).expect("valid date"),
        month,
        year,
        units_consumed: Some(dec(units)),
        recorded_by: Uuid::new_v4(),
        notes: None,
        created_utc: now,
        updated_utc: now,
    }
}

fn policy(rate: &str, water: &str) -> BillingPolicy {
    BillingPolicy {
        electricity_rate_per_unit: dec(rate),
        default_water_charges: dec(water),
    }
}

#[test]
fn reading_to_bill_end_to_end() {
    // March reading 620 against February's 500: 120 units.
    let units = compute_consumption(dec("620"), Some(dec("500"))).expect("valid consumption");
    assert_eq!(units, dec("120"));

    let t = tenant("A-101", "15000");
    let r = reading_for(&t, 3, 2024, "620", "120");

    let bill = build_bill(
        &t,
        &r,
        &policy("10", "200"),
        None,
        Decimal::ZERO,
        None,
        Uuid::new_v4(),
    )
    .expect("bill builds");

    // 15000 rent + 1200 electricity + 200 water.
    assert_eq!(bill.total_amount, dec("16400"));
    assert_eq!(bill.bill_number, "GL-A-101-202403");
    assert_eq!(bill.month, 3);
    assert_eq!(bill.year, 2024);
    assert_eq!(bill.meter_reading_id, Some(r.reading_id));

    let item_sum: Decimal = bill.line_items.iter().map(|i| i.amount).sum();
    assert_eq!(bill.total_amount, item_sum);
}

#[test]
fn zero_consumption_still_bills_rent_and_water() {
    let t = tenant("B-2", "12000");
    let r = reading_for(&t, 1, 2025, "500", "0");

    let bill = build_bill(
        &t,
        &r,
        &policy("10", "200"),
        None,
        Decimal::ZERO,
        None,
        Uuid::new_v4(),
    )
    .expect("bill builds");

    assert_eq!(bill.electricity_amount, Decimal::ZERO);
    assert_eq!(bill.total_amount, dec("12200"));
    assert_eq!(bill.line_items.len(), 3);
}

#[test]
fn water_override_replaces_the_default() {
    let t = tenant("A-101", "15000");
    let r = reading_for(&t, 3, 2024, "620", "120");

    let bill = build_bill(
        &t,
        &r,
        &policy("10", "200"),
        Some(dec("350")),
        Decimal::ZERO,
        None,
        Uuid::new_v4(),
    )
    .expect("bill builds");

    assert_eq!(bill.water_amount, dec("350"));
    assert_eq!(bill.total_amount, dec("16550"));
}

#[test]
fn fractional_rates_multiply_exactly() {
    let t = tenant("A-101", "10000");
    let r = reading_for(&t, 6, 2024, "843.5", "123.5");

    let bill = build_bill(
        &t,
        &r,
        &policy("8.50", "200"),
        None,
        Decimal::ZERO,
        None,
        Uuid::new_v4(),
    )
    .expect("bill builds");

    // 123.5 * 8.50 with no float drift.
    assert_eq!(bill.electricity_amount, dec("1049.750"));
}

#[test]
fn backward_reading_is_an_error_not_a_clamp() {
    let err = compute_consumption(dec("480"), Some(dec("500"))).expect_err("must reject");
    assert_eq!(
        err,
        BillingError::InvalidReading {
            current: dec("480"),
            previous: dec("500"),
        }
    );
}

#[test]
fn first_reading_has_zero_consumption() {
    assert_eq!(compute_consumption(dec("500"), None), Ok(Decimal::ZERO));
}

#[test]
fn negative_first_reading_is_rejected() {
    // A tenant's first reading has no previous value to compare against,
    // but a negative meter value is still impossible and must not persist.
    let err = compute_consumption(dec("-5"), None).expect_err("must reject");
    assert_eq!(err, BillingError::NegativeReading { value: dec("-5") });
}

#[test]
fn negative_charge_inputs_never_reach_a_bill() {
    let t = tenant("A-101", "15000");
    let r = reading_for(&t, 3, 2024, "620", "120");
    let p = policy("10", "200");

    let err = build_bill(&t, &r, &p, Some(dec("-1")), Decimal::ZERO, None, Uuid::new_v4())
        .expect_err("negative water override must reject");
    assert_eq!(
        err,
        BillingError::NegativeCharge {
            charge: "Water charges",
            amount: dec("-1"),
        }
    );

    let err = build_bill(&t, &r, &p, None, dec("-250"), None, Uuid::new_v4())
        .expect_err("negative other charges must reject");
    assert_eq!(
        err,
        BillingError::NegativeCharge {
            charge: "Other charges",
            amount: dec("-250"),
        }
    );
}

#[test]
fn bill_numbers_are_deterministic_per_flat_and_period() {
    assert_eq!(bill_number("A-101", 3, 2024), "GL-A-101-202403");
    assert_eq!(bill_number("A-101", 12, 2024), "GL-A-101-202412");
    assert_ne!(bill_number("A-101", 3, 2024), bill_number("A-102", 3, 2024));
}

#[test]
fn missing_consumption_blocks_generation() {
    let t = tenant("A-101", "15000");
    let mut r = reading_for(&t, 3, 2024, "620", "0");
    r.units_consumed = None;

    let err = build_bill(
        &t,
        &r,
        &policy("10", "200"),
        None,
        Decimal::ZERO,
        None,
        Uuid::new_v4(),
    )
    .expect_err("must reject");

    assert_eq!(
        err,
        BillingError::MissingReading {
            month: 3,
            year: 2024
        }
    );
}

#[test]
fn paying_a_bill_is_idempotent() {
    let t = tenant("A-101", "15000");
    let r = reading_for(&t, 3, 2024, "620", "120");
    let new_bill = build_bill(
        &t,
        &r,
        &policy("10", "200"),
        None,
        Decimal::ZERO,
        None,
        Uuid::new_v4(),
    )
    .expect("bill builds");

    // Simulate the persisted row.
    let now = Utc::now();
    let bill = rental_service::models::Bill {
        bill_id: Uuid::new_v4(),
        tenant_id: new_bill.tenant_id,
        landlord_id: t.landlord_id,
        meter_reading_id: new_bill.meter_reading_id,
        month: new_bill.month,
        year: new_bill.year,
        rent_amount: new_bill.rent_amount,
        electricity_units: new_bill.electricity_units,
        electricity_rate: new_bill.electricity_rate,
        electricity_amount: new_bill.electricity_amount,
        water_amount: new_bill.water_amount,
        other_charges: new_bill.other_charges,
        total_amount: new_bill.total_amount,
        payment_status: PaymentStatus::Pending.as_str().to_string(),
        payment_date: None,
        payment_notes: None,
        bill_number: new_bill.bill_number.clone(),
        generated_by: new_bill.generated_by,
        line_items: serde_json::to_value(&new_bill.line_items).expect("serializable"),
        created_utc: now,
        updated_utc: now,
    };

    let first_date = NaiveDate::from_ymd_opt(2024, 4, 2).expect("valid date");
    let later_date = NaiveDate::from_ymd_opt(2024, 4, 20).expect("valid date");

    let paid = mark_paid(bill, first_date);
    assert_eq!(paid.payment_status, "paid");
    assert_eq!(paid.payment_date, Some(first_date));

    let paid_again = mark_paid(paid, later_date);
    assert_eq!(paid_again.payment_date, Some(first_date));
}
