//! Dashboard aggregates for rental-service.

use rust_decimal::Decimal;
use serde::Serialize;

/// Landlord dashboard summary built from store aggregation queries.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub current_month_income: Decimal,
    pub all_time_income: Decimal,
    pub total_expenses: Decimal,
    pub net_earnings: Decimal,
    pub total_tenants: i64,
    pub active_tenants: i64,
    pub pending_bills: i64,
    pub overdue_amount: Decimal,
}
