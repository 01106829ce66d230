use anyhow::{anyhow, Context, Result};
use dotenvy::dotenv;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, Secret};
use std::env;

use crate::services::vault;

#[derive(Clone, Debug)]
pub struct RentalConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub billing: BillingPolicy,
    pub encryption: EncryptionConfig,
    pub service_name: String,
    pub log_level: String,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Billing policy constants. Tenant-independent, configured per deployment,
/// never hardcoded in the billing engine.
#[derive(Clone, Debug)]
pub struct BillingPolicy {
    pub electricity_rate_per_unit: Decimal,
    pub default_water_charges: Decimal,
}

#[derive(Clone, Debug)]
pub struct EncryptionConfig {
    key: Secret<String>,
}

impl EncryptionConfig {
    /// Decode the configured key into raw AES-256 key material.
    pub fn key_bytes(&self) -> Result<[u8; 32]> {
        vault::decode_key(self.key.expose_secret())
            .map_err(|e| anyhow!("ENCRYPTION_KEY is invalid: {}", e))
    }
}

impl RentalConfig {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let host = env::var("RENTAL_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("RENTAL_SERVICE_PORT")
            .unwrap_or_else(|_| "3005".to_string())
            .parse()
            .context("RENTAL_SERVICE_PORT must be a valid port number")?;

        let db_url =
            env::var("DATABASE_URL").map_err(|_| anyhow!("DATABASE_URL must be set"))?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a number")?;
        let min_connections = env::var("DATABASE_MIN_CONNECTIONS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .context("DATABASE_MIN_CONNECTIONS must be a number")?;

        let electricity_rate_per_unit = env::var("BILLING_RATE_PER_UNIT")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<Decimal>()
            .context("BILLING_RATE_PER_UNIT must be a decimal amount")?;
        let default_water_charges = env::var("BILLING_WATER_CHARGES")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<Decimal>()
            .context("BILLING_WATER_CHARGES must be a decimal amount")?;

        // The key is mandatory and must decode to 32 bytes. A service that
        // cannot encrypt Aadhaar data must not start.
        let key = env::var("ENCRYPTION_KEY")
            .map_err(|_| anyhow!("ENCRYPTION_KEY must be set (64-character hex string)"))?;
        let encryption = EncryptionConfig {
            key: Secret::new(key),
        };
        encryption.key_bytes()?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                url: Secret::new(db_url),
                max_connections,
                min_connections,
            },
            billing: BillingPolicy {
                electricity_rate_per_unit,
                default_water_charges,
            },
            encryption,
            service_name: "rental-service".to_string(),
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bytes_rejects_short_key() {
        let encryption = EncryptionConfig {
            key: Secret::new("abcd".to_string()),
        };
        assert!(encryption.key_bytes().is_err());
    }

    #[test]
    fn key_bytes_rejects_non_hex_key() {
        let encryption = EncryptionConfig {
            key: Secret::new("zz".repeat(32)),
        };
        assert!(encryption.key_bytes().is_err());
    }

    #[test]
    fn key_bytes_accepts_64_hex_chars() {
        let encryption = EncryptionConfig {
            key: Secret::new("0f".repeat(32)),
        };
        assert_eq!(encryption.key_bytes().unwrap(), [0x0f; 32]);
    }
}
