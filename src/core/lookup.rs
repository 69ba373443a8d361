use crate::core::{Address, AddressKind, AddressSource, ConfigProvider, ReferenceRow, Storage};
use crate::utils::error::{EnrichError, Result};
use async_trait::async_trait;

/// Looks up customer addresses in CSV reference datasets held in blob storage.
/// Each [`AddressKind`] is backed by its own dataset; the whole blob is
/// fetched and scanned per resolution, first matching row wins.
pub struct CsvReferenceLookup<S: Storage> {
    storage: S,
    shipping_key: String,
    billing_key: String,
}

impl<S: Storage> CsvReferenceLookup<S> {
    pub fn new(storage: S, config: &impl ConfigProvider) -> Self {
        Self {
            storage,
            shipping_key: config.dataset_key(AddressKind::Shipping).to_string(),
            billing_key: config.dataset_key(AddressKind::Billing).to_string(),
        }
    }

    fn dataset_key(&self, kind: AddressKind) -> &str {
        match kind {
            AddressKind::Shipping => &self.shipping_key,
            AddressKind::Billing => &self.billing_key,
        }
    }
}

#[async_trait]
impl<S: Storage> AddressSource for CsvReferenceLookup<S> {
    async fn resolve(&self, customer_id: &str, kind: AddressKind) -> Result<Option<Address>> {
        let key = self.dataset_key(kind);

        tracing::debug!("Resolving {:?} address for customer {}", kind, customer_id);

        // A missing dataset is a store fault, not a lookup miss.
        let raw = self.storage.read_file(key).await?.ok_or_else(|| {
            EnrichError::StorageError {
                message: format!("Reference dataset '{}' does not exist", key),
            }
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(raw.as_slice());

        for row in reader.deserialize::<ReferenceRow>() {
            let row = row?;
            if row.customer_id.as_deref() == Some(customer_id) {
                tracing::debug!("Matched {:?} reference row for customer {}", kind, customer_id);
                return Ok(Some(row.into_address()));
            }
        }

        tracing::debug!("No {:?} reference row for customer {}", kind, customer_id);
        Ok(None)
    }
}
