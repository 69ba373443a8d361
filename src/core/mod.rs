pub mod audit;
pub mod enrich;
pub mod lookup;
pub mod service;

pub use crate::domain::model::{
    Address, AddressKind, AuditRecord, BatchOutcome, CustomerRecord, ReferenceRow,
};
pub use crate::domain::ports::{AddressSource, AuditSink, ConfigProvider, Storage};
pub use crate::utils::error::Result;
