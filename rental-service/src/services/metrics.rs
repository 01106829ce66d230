//! Metrics module for rental-service.
//! Provides Prometheus metrics for store queries and billing operations.

use once_cell::sync::Lazy;
use prometheus::{
    histogram_opts, opts, register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec,
    IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;

/// Database query duration histogram
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        histogram_opts!(
            "rental_db_query_duration_seconds",
            "Database query duration"
        ),
        &["operation"]
    )
    .expect("Failed to register DB_QUERY_DURATION")
});

/// Bills generated counter (per-landlord)
pub static BILLS_GENERATED_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Meter readings recorded counter (per-landlord)
pub static READINGS_RECORDED_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Error counter for alerting
pub static ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() {
    BILLS_GENERATED_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "rental_bills_generated_total",
                "Total bills generated by landlord"
            ),
            &["landlord_id"]
        )
        .expect("Failed to register BILLS_GENERATED_TOTAL")
    });

    READINGS_RECORDED_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "rental_readings_recorded_total",
                "Total meter readings recorded by landlord"
            ),
            &["landlord_id"]
        )
        .expect("Failed to register READINGS_RECORDED_TOTAL")
    });

    ERRORS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!("rental_errors_total", "Total errors by type for alerting"),
            &["error_type", "operation"]
        )
        .expect("Failed to register ERRORS_TOTAL")
    });

    // Force initialization of lazy statics
    let _ = &*DB_QUERY_DURATION;
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Failed to convert metrics to string")
}

/// Record a generated bill.
pub fn record_bill_generated(landlord_id: &str) {
    if let Some(counter) = BILLS_GENERATED_TOTAL.get() {
        counter.with_label_values(&[landlord_id]).inc();
    }
}

/// Record a recorded meter reading.
pub fn record_reading_recorded(landlord_id: &str) {
    if let Some(counter) = READINGS_RECORDED_TOTAL.get() {
        counter.with_label_values(&[landlord_id]).inc();
    }
}

/// Record an error for alerting.
pub fn record_error(error_type: &str, operation: &str) {
    if let Some(counter) = ERRORS_TOTAL.get() {
        counter.with_label_values(&[error_type, operation]).inc();
    }
}
