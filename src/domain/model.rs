use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel customer id written to the audit log when a record carried no id.
pub const UNKNOWN_CUSTOMER: &str = "unknown";

/// Sentinel customer id for batch-level audit records.
pub const BATCH_SENTINEL: &str = "N/A";

/// A postal address. Immutable once constructed; `line2` is the only field
/// that is genuinely optional and defaults to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Which reference dataset an address lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressKind {
    Shipping,
    Billing,
}

impl AddressKind {
    /// Resolution order within a single customer: billing first, then shipping.
    pub const ALL: [AddressKind; 2] = [AddressKind::Billing, AddressKind::Shipping];
}

/// One customer element of an enrichment batch. Address fields serialize
/// explicitly (absent or unmatched becomes `null` on the wire); everything the
/// core does not interpret (contact info, product list) flows through `extra`
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub shipping: Option<Address>,
    #[serde(default)]
    pub billing: Option<Address>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl CustomerRecord {
    /// Both address slots are populated, so no lookup is needed.
    pub fn fully_addressed(&self) -> bool {
        self.shipping.is_some() && self.billing.is_some()
    }
}

/// One row of a reference dataset CSV. Every field is optional so that sparse
/// rows decode instead of failing; missing values become empty strings when
/// the row is turned into an [`Address`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRow {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl ReferenceRow {
    pub fn into_address(self) -> Address {
        Address {
            line1: self.line1.unwrap_or_default(),
            line2: self.line2.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            postal_code: self.postal_code.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
        }
    }
}

/// One line of the append-only audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub customer_id: String,
    pub status: u16,
    pub message: String,
}

impl AuditRecord {
    /// Per-customer failure: missing mandatory id or an unmatched lookup.
    /// The two outcomes are deliberately indistinguishable in the log.
    pub fn failure(customer_id: &str) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            status: 400,
            message: "Mandatory fields are missing".to_string(),
        }
    }

    /// Emitted once per batch when every customer resolved cleanly.
    pub fn batch_success() -> Self {
        Self {
            customer_id: BATCH_SENTINEL.to_string(),
            status: 200,
            message: "Success".to_string(),
        }
    }

    /// Best-effort record written when a store fault aborts a batch.
    pub fn server_error() -> Self {
        Self {
            customer_id: BATCH_SENTINEL.to_string(),
            status: 500,
            message: "Internal server error".to_string(),
        }
    }
}

/// Result of enriching one batch: records in input order plus the flag that
/// decides whether a success audit record is emitted.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub records: Vec<CustomerRecord>,
    pub all_resolved: bool,
}
