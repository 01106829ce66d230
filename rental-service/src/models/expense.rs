//! Expense model for rental-service.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Maintenance,
    Repair,
    Plumbing,
    Electrical,
    Painting,
    Cleaning,
    Security,
    Tax,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::Repair => "repair",
            ExpenseCategory::Plumbing => "plumbing",
            ExpenseCategory::Electrical => "electrical",
            ExpenseCategory::Painting => "painting",
            ExpenseCategory::Cleaning => "cleaning",
            ExpenseCategory::Security => "security",
            ExpenseCategory::Tax => "tax",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "maintenance" => ExpenseCategory::Maintenance,
            "repair" => ExpenseCategory::Repair,
            "plumbing" => ExpenseCategory::Plumbing,
            "electrical" => ExpenseCategory::Electrical,
            "painting" => ExpenseCategory::Painting,
            "cleaning" => ExpenseCategory::Cleaning,
            "security" => ExpenseCategory::Security,
            "tax" => ExpenseCategory::Tax,
            _ => ExpenseCategory::Other,
        }
    }
}

/// Property expense row, optionally tied to a flat or tenant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub expense_id: Uuid,
    pub landlord_id: Uuid,
    pub expense_date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub flat_number: Option<String>,
    pub tenant_id: Option<Uuid>,
    pub recorded_by: Uuid,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// Request payload for recording an expense.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExpense {
    pub expense_date: NaiveDate,
    pub category: ExpenseCategory,
    #[validate(length(min = 3, message = "Description must be at least 3 characters"))]
    pub description: String,
    pub amount: Decimal,
    pub flat_number: Option<String>,
    pub tenant_id: Option<Uuid>,
}
