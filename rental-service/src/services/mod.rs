//! Service layer for rental-service.

pub mod billing;
pub mod database;
pub mod metrics;
pub mod vault;

pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
pub use vault::PiiVault;
