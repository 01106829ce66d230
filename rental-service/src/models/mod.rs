//! Domain models for rental-service.

mod bill;
mod dashboard;
mod expense;
mod meter_reading;
mod note;
mod tenant;

pub use bill::{Bill, BillLineItem, GenerateBill, NewBill, PaymentStatus};
pub use dashboard::DashboardSummary;
pub use expense::{CreateExpense, Expense, ExpenseCategory};
pub use meter_reading::{MeterReading, RecordMeterReading};
pub use note::{CreateNote, Note};
pub use tenant::{BhkType, CreateTenant, NewTenant, Tenant, TenantView, UpdateTenant};
