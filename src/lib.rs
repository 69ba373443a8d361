pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "lambda")]
pub use crate::config::lambda::S3Storage;
pub use crate::config::{local::LocalStorage, ServiceConfig};

pub use crate::core::audit::CsvAuditLog;
pub use crate::core::enrich::Enricher;
pub use crate::core::lookup::CsvReferenceLookup;
pub use crate::core::service::{ApiResponse, EnrichmentService};
pub use crate::domain::model::{
    Address, AddressKind, AuditRecord, BatchOutcome, CustomerRecord, ReferenceRow,
};
pub use crate::domain::ports::{AddressSource, AuditSink, ConfigProvider, Storage};
pub use crate::utils::error::{EnrichError, Result};
