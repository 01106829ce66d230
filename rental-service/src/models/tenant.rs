//! Tenant model for rental-service.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Flat configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BhkType {
    #[serde(rename = "1BHK")]
    OneBhk,
    #[serde(rename = "2BHK")]
    TwoBhk,
    #[serde(rename = "3BHK")]
    ThreeBhk,
}

impl BhkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BhkType::OneBhk => "1BHK",
            BhkType::TwoBhk => "2BHK",
            BhkType::ThreeBhk => "3BHK",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "2BHK" => BhkType::TwoBhk,
            "3BHK" => BhkType::ThreeBhk,
            _ => BhkType::OneBhk,
        }
    }
}

/// Tenant row. The Aadhaar number is stored only as an opaque encrypted
/// envelope plus a display-safe masked string; plaintext is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub mobile_number: String,
    pub email: String,
    pub flat_number: String,
    pub floor_number: i32,
    pub bhk_type: String,
    pub monthly_rent: Decimal,
    pub rent_start_date: NaiveDate,
    pub aadhaar_encrypted: String,
    pub aadhaar_masked: String,
    pub is_active: bool,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// Display-safe projection of a tenant. Excludes the encrypted envelope so
/// listings never carry ciphertext to clients.
#[derive(Debug, Clone, Serialize)]
pub struct TenantView {
    pub tenant_id: Uuid,
    pub full_name: String,
    pub mobile_number: String,
    pub email: String,
    pub flat_number: String,
    pub floor_number: i32,
    pub bhk_type: String,
    pub monthly_rent: Decimal,
    pub rent_start_date: NaiveDate,
    pub aadhaar_masked: String,
    pub is_active: bool,
    pub created_utc: DateTime<Utc>,
}

impl From<Tenant> for TenantView {
    fn from(t: Tenant) -> Self {
        Self {
            tenant_id: t.tenant_id,
            full_name: t.full_name,
            mobile_number: t.mobile_number,
            email: t.email,
            flat_number: t.flat_number,
            floor_number: t.floor_number,
            bhk_type: t.bhk_type,
            monthly_rent: t.monthly_rent,
            rent_start_date: t.rent_start_date,
            aadhaar_masked: t.aadhaar_masked,
            is_active: t.is_active,
            created_utc: t.created_utc,
        }
    }
}

/// Request payload for creating a tenant. Carries the plaintext Aadhaar
/// number exactly once; it is encrypted and masked before any persistence.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTenant {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub full_name: String,
    #[validate(length(equal = 10, message = "Mobile number must be 10 digits"))]
    pub mobile_number: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Flat number is required"))]
    pub flat_number: String,
    #[validate(range(min = 0, max = 50))]
    pub floor_number: i32,
    pub bhk_type: BhkType,
    pub monthly_rent: Decimal,
    pub rent_start_date: NaiveDate,
    pub aadhaar_number: String,
    pub user_id: Option<Uuid>,
}

/// Fully prepared tenant record: Aadhaar already encrypted and masked.
#[derive(Debug, Clone)]
pub struct NewTenant {
    pub landlord_id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub mobile_number: String,
    pub email: String,
    pub flat_number: String,
    pub floor_number: i32,
    pub bhk_type: String,
    pub monthly_rent: Decimal,
    pub rent_start_date: NaiveDate,
    pub aadhaar_encrypted: String,
    pub aadhaar_masked: String,
}

/// Partial update for a tenant. Aadhaar and flat assignment history are
/// deliberately not updatable through this path.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTenant {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub full_name: Option<String>,
    #[validate(length(equal = 10, message = "Mobile number must be 10 digits"))]
    pub mobile_number: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(range(min = 0, max = 50))]
    pub floor_number: Option<i32>,
    pub bhk_type: Option<BhkType>,
    pub monthly_rent: Option<Decimal>,
    pub is_active: Option<bool>,
}
