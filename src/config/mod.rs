#[cfg(feature = "lambda")]
pub mod lambda;
pub mod local;

use crate::core::ConfigProvider;
use crate::domain::model::AddressKind;
use crate::utils::error::{EnrichError, Result};
use crate::utils::validation::{
    validate_aws_region, validate_object_key, validate_s3_bucket_name, Validate,
};
use std::env;

/// Explicit service configuration: dataset and audit-log locations plus the
/// backing-store coordinates. Constructed once and passed into components, so
/// nothing reads ambient process state after startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub s3_bucket: String,
    pub s3_region: String,
    pub shipping_dataset_key: String,
    pub billing_dataset_key: String,
    pub audit_log_key: String,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            s3_bucket: env::var("S3_BUCKET").map_err(|_| EnrichError::ConfigError {
                message: "S3_BUCKET environment variable is required".to_string(),
            })?,
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "ap-southeast-2".to_string()),
            shipping_dataset_key: env::var("SHIPPING_DATASET_KEY")
                .unwrap_or_else(|_| "shipping_details.csv".to_string()),
            billing_dataset_key: env::var("BILLING_DATASET_KEY")
                .unwrap_or_else(|_| "billing_details.csv".to_string()),
            audit_log_key: env::var("AUDIT_LOG_KEY")
                .unwrap_or_else(|_| "response_tracker.csv".to_string()),
        })
    }
}

impl ConfigProvider for ServiceConfig {
    fn dataset_key(&self, kind: AddressKind) -> &str {
        match kind {
            AddressKind::Shipping => &self.shipping_dataset_key,
            AddressKind::Billing => &self.billing_dataset_key,
        }
    }

    fn audit_log_key(&self) -> &str {
        &self.audit_log_key
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_s3_bucket_name("s3_bucket", &self.s3_bucket)?;
        validate_aws_region("s3_region", &self.s3_region)?;
        validate_object_key("shipping_dataset_key", &self.shipping_dataset_key)?;
        validate_object_key("billing_dataset_key", &self.billing_dataset_key)?;
        validate_object_key("audit_log_key", &self.audit_log_key)?;

        tracing::info!("✅ Service configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServiceConfig {
        ServiceConfig {
            s3_bucket: "shipping-details-test".to_string(),
            s3_region: "ap-southeast-2".to_string(),
            shipping_dataset_key: "shipping_details.csv".to_string(),
            billing_dataset_key: "billing_details.csv".to_string(),
            audit_log_key: "response_tracker.csv".to_string(),
        }
    }

    #[test]
    fn dataset_key_selects_per_kind() {
        let config = config();
        assert_eq!(config.dataset_key(AddressKind::Shipping), "shipping_details.csv");
        assert_eq!(config.dataset_key(AddressKind::Billing), "billing_details.csv");
        assert_eq!(config.audit_log_key(), "response_tracker.csv");
    }

    #[test]
    fn validation_catches_bad_bucket() {
        let mut config = config();
        config.s3_bucket = "NOT-VALID".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_accepts_defaults() {
        assert!(config().validate().is_ok());
    }
}
