//! Database service for rental-service.
//!
//! The store enforces the uniqueness constraints the billing core relies on:
//! one meter reading and one bill per (tenant, month, year). Unique
//! violations on bill insert are mapped to `BillingError::DuplicateBill`
//! instead of leaking a raw database error.

use crate::models::{
    Bill, CreateExpense, CreateNote, DashboardSummary, Expense, MeterReading, NewBill, NewTenant,
    Note, PaymentStatus, RecordMeterReading, Tenant, UpdateTenant,
};
use crate::services::billing::BillingError;
use crate::services::metrics::DB_QUERY_DURATION;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

const TENANT_COLUMNS: &str = "tenant_id, landlord_id, user_id, full_name, mobile_number, email, \
    flat_number, floor_number, bhk_type, monthly_rent, rent_start_date, aadhaar_encrypted, \
    aadhaar_masked, is_active, created_utc, updated_utc";

const READING_COLUMNS: &str = "reading_id, tenant_id, landlord_id, reading_value, reading_date, \
    month, year, units_consumed, recorded_by, notes, created_utc, updated_utc";

const BILL_COLUMNS: &str = "bill_id, tenant_id, landlord_id, meter_reading_id, month, year, \
    rent_amount, electricity_units, electricity_rate, electricity_amount, water_amount, \
    other_charges, total_amount, payment_status, payment_date, payment_notes, bill_number, \
    generated_by, line_items, created_utc, updated_utc";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "rental-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Tenant Operations
    // -------------------------------------------------------------------------

    /// Create a tenant. The record arrives with the Aadhaar number already
    /// encrypted and masked; plaintext never reaches this layer.
    #[instrument(skip(self, input), fields(landlord_id = %input.landlord_id, flat = %input.flat_number))]
    pub async fn create_tenant(&self, input: &NewTenant) -> Result<Tenant, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_tenant"])
            .start_timer();

        let tenant_id = Uuid::new_v4();
        let tenant = sqlx::query_as::<_, Tenant>(&format!(
            r#"
            INSERT INTO tenants (
                tenant_id, landlord_id, user_id, full_name, mobile_number, email,
                flat_number, floor_number, bhk_type, monthly_rent, rent_start_date,
                aadhaar_encrypted, aadhaar_masked, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, TRUE)
            RETURNING {TENANT_COLUMNS}
            "#,
        ))
        .bind(tenant_id)
        .bind(input.landlord_id)
        .bind(input.user_id)
        .bind(&input.full_name)
        .bind(&input.mobile_number)
        .bind(&input.email)
        .bind(&input.flat_number)
        .bind(input.floor_number)
        .bind(&input.bhk_type)
        .bind(input.monthly_rent)
        .bind(input.rent_start_date)
        .bind(&input.aadhaar_encrypted)
        .bind(&input.aadhaar_masked)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create tenant: {}", e)))?;

        timer.observe_duration();

        info!(tenant_id = %tenant.tenant_id, flat = %tenant.flat_number, "Tenant created");

        Ok(tenant)
    }

    /// Get a tenant by ID within a landlord's scope.
    #[instrument(skip(self), fields(landlord_id = %landlord_id, tenant_id = %tenant_id))]
    pub async fn get_tenant(
        &self,
        landlord_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<Tenant>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_tenant"])
            .start_timer();

        let tenant = sqlx::query_as::<_, Tenant>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE landlord_id = $1 AND tenant_id = $2"
        ))
        .bind(landlord_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get tenant: {}", e)))?;

        timer.observe_duration();

        Ok(tenant)
    }

    /// Find the tenant record linked to an authenticated user.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn find_tenant_by_user(&self, user_id: Uuid) -> Result<Option<Tenant>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_tenant_by_user"])
            .start_timer();

        let tenant = sqlx::query_as::<_, Tenant>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to find tenant: {}", e)))?;

        timer.observe_duration();

        Ok(tenant)
    }

    /// List tenants for a landlord, ordered by flat number.
    #[instrument(skip(self), fields(landlord_id = %landlord_id))]
    pub async fn list_tenants(
        &self,
        landlord_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<Tenant>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_tenants"])
            .start_timer();

        let tenants = sqlx::query_as::<_, Tenant>(&format!(
            r#"
            SELECT {TENANT_COLUMNS}
            FROM tenants
            WHERE landlord_id = $1
              AND ($2::bool = FALSE OR is_active = TRUE)
            ORDER BY flat_number
            "#
        ))
        .bind(landlord_id)
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list tenants: {}", e)))?;

        timer.observe_duration();

        Ok(tenants)
    }

    /// Update a tenant.
    #[instrument(skip(self, input), fields(landlord_id = %landlord_id, tenant_id = %tenant_id))]
    pub async fn update_tenant(
        &self,
        landlord_id: Uuid,
        tenant_id: Uuid,
        input: &UpdateTenant,
    ) -> Result<Option<Tenant>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_tenant"])
            .start_timer();

        let bhk_type = input.bhk_type.map(|b| b.as_str().to_string());

        let tenant = sqlx::query_as::<_, Tenant>(&format!(
            r#"
            UPDATE tenants
            SET full_name = COALESCE($3, full_name),
                mobile_number = COALESCE($4, mobile_number),
                email = COALESCE($5, email),
                floor_number = COALESCE($6, floor_number),
                bhk_type = COALESCE($7, bhk_type),
                monthly_rent = COALESCE($8, monthly_rent),
                is_active = COALESCE($9, is_active),
                updated_utc = NOW()
            WHERE landlord_id = $1 AND tenant_id = $2
            RETURNING {TENANT_COLUMNS}
            "#
        ))
        .bind(landlord_id)
        .bind(tenant_id)
        .bind(&input.full_name)
        .bind(&input.mobile_number)
        .bind(&input.email)
        .bind(input.floor_number)
        .bind(bhk_type)
        .bind(input.monthly_rent)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update tenant: {}", e)))?;

        timer.observe_duration();

        if let Some(ref t) = tenant {
            info!(tenant_id = %t.tenant_id, "Tenant updated");
        }

        Ok(tenant)
    }

    // -------------------------------------------------------------------------
    // Meter Reading Operations
    // -------------------------------------------------------------------------

    /// Record a meter reading for a period, updating in place if the period
    /// already has one. Readings are never deleted.
    #[instrument(
        skip(self, input),
        fields(tenant_id = %input.tenant_id, month = input.month, year = input.year)
    )]
    pub async fn upsert_reading(
        &self,
        landlord_id: Uuid,
        recorded_by: Uuid,
        input: &RecordMeterReading,
        units_consumed: Decimal,
    ) -> Result<MeterReading, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["upsert_reading"])
            .start_timer();

        let reading_id = Uuid::new_v4();
        let reading = sqlx::query_as::<_, MeterReading>(&format!(
            r#"
            INSERT INTO meter_readings (
                reading_id, tenant_id, landlord_id, reading_value, reading_date,
                month, year, units_consumed, recorded_by, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (tenant_id, month, year) DO UPDATE
            SET reading_value = EXCLUDED.reading_value,
                reading_date = EXCLUDED.reading_date,
                units_consumed = EXCLUDED.units_consumed,
                recorded_by = EXCLUDED.recorded_by,
                notes = EXCLUDED.notes,
                updated_utc = NOW()
            RETURNING {READING_COLUMNS}
            "#
        ))
        .bind(reading_id)
        .bind(input.tenant_id)
        .bind(landlord_id)
        .bind(input.reading_value)
        .bind(input.reading_date)
        .bind(input.month)
        .bind(input.year)
        .bind(units_consumed)
        .bind(recorded_by)
        .bind(&input.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to record meter reading: {}", e))
        })?;

        timer.observe_duration();

        info!(
            reading_id = %reading.reading_id,
            units = %units_consumed,
            "Meter reading recorded"
        );

        Ok(reading)
    }

    /// The most recent reading strictly before the given period, if any.
    /// This is the consumption basis for the period's bill.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, month = month, year = year))]
    pub async fn get_previous_reading(
        &self,
        tenant_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Option<MeterReading>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_previous_reading"])
            .start_timer();

        let reading = sqlx::query_as::<_, MeterReading>(&format!(
            r#"
            SELECT {READING_COLUMNS}
            FROM meter_readings
            WHERE tenant_id = $1
              AND (year < $2 OR (year = $2 AND month < $3))
            ORDER BY year DESC, month DESC
            LIMIT 1
            "#
        ))
        .bind(tenant_id)
        .bind(year)
        .bind(month)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to get previous reading: {}", e))
        })?;

        timer.observe_duration();

        Ok(reading)
    }

    /// The reading recorded for exactly this period, if any.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, month = month, year = year))]
    pub async fn get_reading_for_period(
        &self,
        tenant_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Option<MeterReading>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_reading_for_period"])
            .start_timer();

        let reading = sqlx::query_as::<_, MeterReading>(&format!(
            r#"
            SELECT {READING_COLUMNS}
            FROM meter_readings
            WHERE tenant_id = $1 AND year = $2 AND month = $3
            "#
        ))
        .bind(tenant_id)
        .bind(year)
        .bind(month)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get reading: {}", e)))?;

        timer.observe_duration();

        Ok(reading)
    }

    /// List readings for a landlord and period.
    #[instrument(skip(self), fields(landlord_id = %landlord_id, month = month, year = year))]
    pub async fn list_readings(
        &self,
        landlord_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Vec<MeterReading>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_readings"])
            .start_timer();

        let readings = sqlx::query_as::<_, MeterReading>(&format!(
            r#"
            SELECT {READING_COLUMNS}
            FROM meter_readings
            WHERE landlord_id = $1 AND year = $2 AND month = $3
            ORDER BY created_utc
            "#
        ))
        .bind(landlord_id)
        .bind(year)
        .bind(month)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list readings: {}", e)))?;

        timer.observe_duration();

        Ok(readings)
    }

    // -------------------------------------------------------------------------
    // Bill Operations
    // -------------------------------------------------------------------------

    /// Insert a generated bill.
    ///
    /// The unique constraint on (tenant_id, month, year) is the arbiter for
    /// concurrent generation: a violation becomes `DuplicateBill`, never a
    /// second bill row.
    #[instrument(
        skip(self, bill),
        fields(landlord_id = %landlord_id, tenant_id = %bill.tenant_id, bill_number = %bill.bill_number)
    )]
    pub async fn create_bill(&self, landlord_id: Uuid, bill: &NewBill) -> Result<Bill, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_bill"])
            .start_timer();

        let line_items = serde_json::to_value(&bill.line_items)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Line item encoding: {}", e)))?;

        let bill_id = Uuid::new_v4();
        let created = sqlx::query_as::<_, Bill>(&format!(
            r#"
            INSERT INTO bills (
                bill_id, tenant_id, landlord_id, meter_reading_id, month, year,
                rent_amount, electricity_units, electricity_rate, electricity_amount,
                water_amount, other_charges, total_amount, payment_status,
                bill_number, generated_by, line_items
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 'pending', $14, $15, $16)
            RETURNING {BILL_COLUMNS}
            "#
        ))
        .bind(bill_id)
        .bind(bill.tenant_id)
        .bind(landlord_id)
        .bind(bill.meter_reading_id)
        .bind(bill.month)
        .bind(bill.year)
        .bind(bill.rent_amount)
        .bind(bill.electricity_units)
        .bind(bill.electricity_rate)
        .bind(bill.electricity_amount)
        .bind(bill.water_amount)
        .bind(bill.other_charges)
        .bind(bill.total_amount)
        .bind(&bill.bill_number)
        .bind(bill.generated_by)
        .bind(line_items)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::from(BillingError::DuplicateBill)
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to create bill: {}", e)),
        })?;

        timer.observe_duration();

        info!(bill_id = %created.bill_id, total = %created.total_amount, "Bill created");

        Ok(created)
    }

    /// Get a bill by ID within a landlord's scope.
    #[instrument(skip(self), fields(landlord_id = %landlord_id, bill_id = %bill_id))]
    pub async fn get_bill(
        &self,
        landlord_id: Uuid,
        bill_id: Uuid,
    ) -> Result<Option<Bill>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_bill"])
            .start_timer();

        let bill = sqlx::query_as::<_, Bill>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE landlord_id = $1 AND bill_id = $2"
        ))
        .bind(landlord_id)
        .bind(bill_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get bill: {}", e)))?;

        timer.observe_duration();

        Ok(bill)
    }

    /// The bill for exactly this (tenant, period), if one exists.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, month = month, year = year))]
    pub async fn get_bill_for_period(
        &self,
        tenant_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Option<Bill>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_bill_for_period"])
            .start_timer();

        let bill = sqlx::query_as::<_, Bill>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE tenant_id = $1 AND year = $2 AND month = $3"
        ))
        .bind(tenant_id)
        .bind(year)
        .bind(month)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to get bill for period: {}", e))
        })?;

        timer.observe_duration();

        Ok(bill)
    }

    /// List bills for a landlord and period.
    #[instrument(skip(self), fields(landlord_id = %landlord_id, month = month, year = year))]
    pub async fn list_bills(
        &self,
        landlord_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Vec<Bill>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_bills"])
            .start_timer();

        let bills = sqlx::query_as::<_, Bill>(&format!(
            r#"
            SELECT {BILL_COLUMNS}
            FROM bills
            WHERE landlord_id = $1 AND year = $2 AND month = $3
            ORDER BY bill_number
            "#
        ))
        .bind(landlord_id)
        .bind(year)
        .bind(month)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list bills: {}", e)))?;

        timer.observe_duration();

        Ok(bills)
    }

    /// List all bills for one tenant, newest period first.
    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn list_bills_for_tenant(&self, tenant_id: Uuid) -> Result<Vec<Bill>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_bills_for_tenant"])
            .start_timer();

        let bills = sqlx::query_as::<_, Bill>(&format!(
            r#"
            SELECT {BILL_COLUMNS}
            FROM bills
            WHERE tenant_id = $1
            ORDER BY year DESC, month DESC
            "#
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list tenant bills: {}", e))
        })?;

        timer.observe_duration();

        Ok(bills)
    }

    /// Persist a payment-status transition.
    #[instrument(skip(self), fields(landlord_id = %landlord_id, bill_id = %bill_id))]
    pub async fn update_bill_payment(
        &self,
        landlord_id: Uuid,
        bill_id: Uuid,
        status: PaymentStatus,
        payment_date: Option<NaiveDate>,
        payment_notes: Option<&str>,
    ) -> Result<Option<Bill>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_bill_payment"])
            .start_timer();

        let bill = sqlx::query_as::<_, Bill>(&format!(
            r#"
            UPDATE bills
            SET payment_status = $3,
                payment_date = $4,
                payment_notes = COALESCE($5, payment_notes),
                updated_utc = NOW()
            WHERE landlord_id = $1 AND bill_id = $2
            RETURNING {BILL_COLUMNS}
            "#
        ))
        .bind(landlord_id)
        .bind(bill_id)
        .bind(status.as_str())
        .bind(payment_date)
        .bind(payment_notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to update bill payment: {}", e))
        })?;

        timer.observe_duration();

        if let Some(ref b) = bill {
            info!(bill_id = %b.bill_id, status = %b.payment_status, "Bill payment updated");
        }

        Ok(bill)
    }

    // -------------------------------------------------------------------------
    // Expense Operations
    // -------------------------------------------------------------------------

    /// Record an expense.
    #[instrument(skip(self, input), fields(landlord_id = %landlord_id))]
    pub async fn create_expense(
        &self,
        landlord_id: Uuid,
        recorded_by: Uuid,
        input: &CreateExpense,
    ) -> Result<Expense, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_expense"])
            .start_timer();

        let expense_id = Uuid::new_v4();
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (
                expense_id, landlord_id, expense_date, category, description,
                amount, flat_number, tenant_id, recorded_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING expense_id, landlord_id, expense_date, category, description,
                amount, flat_number, tenant_id, recorded_by, created_utc, updated_utc
            "#,
        )
        .bind(expense_id)
        .bind(landlord_id)
        .bind(input.expense_date)
        .bind(input.category.as_str())
        .bind(&input.description)
        .bind(input.amount)
        .bind(&input.flat_number)
        .bind(input.tenant_id)
        .bind(recorded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create expense: {}", e)))?;

        timer.observe_duration();

        info!(expense_id = %expense.expense_id, amount = %expense.amount, "Expense recorded");

        Ok(expense)
    }

    /// List expenses for a landlord, newest first.
    #[instrument(skip(self), fields(landlord_id = %landlord_id))]
    pub async fn list_expenses(&self, landlord_id: Uuid) -> Result<Vec<Expense>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_expenses"])
            .start_timer();

        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT expense_id, landlord_id, expense_date, category, description,
                amount, flat_number, tenant_id, recorded_by, created_utc, updated_utc
            FROM expenses
            WHERE landlord_id = $1
            ORDER BY expense_date DESC, created_utc DESC
            "#,
        )
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list expenses: {}", e)))?;

        timer.observe_duration();

        Ok(expenses)
    }

    /// Delete an expense.
    #[instrument(skip(self), fields(landlord_id = %landlord_id, expense_id = %expense_id))]
    pub async fn delete_expense(
        &self,
        landlord_id: Uuid,
        expense_id: Uuid,
    ) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_expense"])
            .start_timer();

        let result = sqlx::query("DELETE FROM expenses WHERE landlord_id = $1 AND expense_id = $2")
            .bind(landlord_id)
            .bind(expense_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete expense: {}", e))
            })?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    // -------------------------------------------------------------------------
    // Note Operations
    // -------------------------------------------------------------------------

    /// Create a note.
    #[instrument(skip(self, input), fields(landlord_id = %landlord_id))]
    pub async fn create_note(
        &self,
        landlord_id: Uuid,
        recorded_by: Uuid,
        input: &CreateNote,
    ) -> Result<Note, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_note"])
            .start_timer();

        let note_id = Uuid::new_v4();
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (
                note_id, landlord_id, tenant_id, flat_number, title, content,
                is_important, recorded_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING note_id, landlord_id, tenant_id, flat_number, title, content,
                is_important, recorded_by, created_utc, updated_utc
            "#,
        )
        .bind(note_id)
        .bind(landlord_id)
        .bind(input.tenant_id)
        .bind(&input.flat_number)
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.is_important)
        .bind(recorded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create note: {}", e)))?;

        timer.observe_duration();

        info!(note_id = %note.note_id, "Note created");

        Ok(note)
    }

    /// List notes for a landlord, important first, then newest.
    #[instrument(skip(self), fields(landlord_id = %landlord_id))]
    pub async fn list_notes(&self, landlord_id: Uuid) -> Result<Vec<Note>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_notes"])
            .start_timer();

        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT note_id, landlord_id, tenant_id, flat_number, title, content,
                is_important, recorded_by, created_utc, updated_utc
            FROM notes
            WHERE landlord_id = $1
            ORDER BY is_important DESC, created_utc DESC
            "#,
        )
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list notes: {}", e)))?;

        timer.observe_duration();

        Ok(notes)
    }

    /// Delete a note.
    #[instrument(skip(self), fields(landlord_id = %landlord_id, note_id = %note_id))]
    pub async fn delete_note(&self, landlord_id: Uuid, note_id: Uuid) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_note"])
            .start_timer();

        let result = sqlx::query("DELETE FROM notes WHERE landlord_id = $1 AND note_id = $2")
            .bind(landlord_id)
            .bind(note_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to delete note: {}", e)))?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    // -------------------------------------------------------------------------
    // Dashboard Operations
    // -------------------------------------------------------------------------

    /// Aggregate the landlord dashboard for a reference period.
    #[instrument(skip(self), fields(landlord_id = %landlord_id, month = month, year = year))]
    pub async fn dashboard_summary(
        &self,
        landlord_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<DashboardSummary, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["dashboard_summary"])
            .start_timer();

        let current_month_income: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(total_amount), 0)
            FROM bills
            WHERE landlord_id = $1 AND year = $2 AND month = $3 AND payment_status = 'paid'
            "#,
        )
        .bind(landlord_id)
        .bind(year)
        .bind(month)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to sum month income: {}", e))
        })?;

        let all_time_income: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_amount), 0) FROM bills WHERE landlord_id = $1 AND payment_status = 'paid'",
        )
        .bind(landlord_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to sum income: {}", e)))?;

        let total_expenses: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE landlord_id = $1",
        )
        .bind(landlord_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to sum expenses: {}", e)))?;

        let overdue_amount: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_amount), 0) FROM bills WHERE landlord_id = $1 AND payment_status = 'overdue'",
        )
        .bind(landlord_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to sum overdue: {}", e)))?;

        let pending_bills: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM bills
            WHERE landlord_id = $1 AND payment_status IN ('pending', 'partial', 'overdue')
            "#,
        )
        .bind(landlord_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to count pending bills: {}", e))
        })?;

        let total_tenants: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tenants WHERE landlord_id = $1")
                .bind(landlord_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to count tenants: {}", e))
                })?;

        let active_tenants: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tenants WHERE landlord_id = $1 AND is_active = TRUE",
        )
        .bind(landlord_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to count active tenants: {}", e))
        })?;

        timer.observe_duration();

        Ok(DashboardSummary {
            current_month_income,
            all_time_income,
            total_expenses,
            net_earnings: all_time_income - total_expenses,
            total_tenants,
            active_tenants,
            pending_bills,
            overdue_amount,
        })
    }
}
