use crate::domain::model::{Address, AddressKind, AuditRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Key/value blob store with whole-object get/put semantics. `Ok(None)` from
/// `read_file` means the object does not exist, which callers may treat as a
/// normal condition; every other failure is an error.
pub trait Storage: Send + Sync {
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn dataset_key(&self, kind: AddressKind) -> &str;
    fn audit_log_key(&self) -> &str;
}

/// Resolves a customer id against a reference dataset. `Ok(None)` is a normal
/// negative result, never a fault.
#[async_trait]
pub trait AddressSource: Send + Sync {
    async fn resolve(&self, customer_id: &str, kind: AddressKind) -> Result<Option<Address>>;
}

/// Append-only audit log capability.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn append(&self, record: &AuditRecord) -> Result<()>;
}
