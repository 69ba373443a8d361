use crate::core::audit::CsvAuditLog;
use crate::core::enrich::Enricher;
use crate::core::lookup::CsvReferenceLookup;
use crate::core::{AuditRecord, AuditSink, ConfigProvider, CustomerRecord, Storage};
use crate::domain::model::BATCH_SENTINEL;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Transport-agnostic response for the "enrich a batch" operation. The Lambda
/// adapter (or any other transport) maps this onto its own envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn invalid_format() -> Self {
        Self {
            status: 400,
            body: json!({ "status": 400, "message": "Invalid data format" }),
        }
    }

    fn internal_error() -> Self {
        Self {
            status: 500,
            body: json!({ "status": 500, "message": "Internal server error" }),
        }
    }
}

/// The inbound boundary of the service: validates the payload shape, hands
/// valid batches to the [`Enricher`], and maps outcomes to status codes.
pub struct EnrichmentService {
    enricher: Enricher,
    audit: Arc<dyn AuditSink>,
}

impl EnrichmentService {
    pub fn new(enricher: Enricher, audit: Arc<dyn AuditSink>) -> Self {
        Self { enricher, audit }
    }

    /// Wires the CSV lookup and audit log over one storage backend.
    pub fn from_config<S>(storage: S, config: &impl ConfigProvider) -> Self
    where
        S: Storage + Clone + 'static,
    {
        let source = Arc::new(CsvReferenceLookup::new(storage.clone(), config));
        let audit: Arc<dyn AuditSink> = Arc::new(CsvAuditLog::new(
            storage,
            config.audit_log_key().to_string(),
        ));
        let enricher = Enricher::new(source, Arc::clone(&audit));
        Self::new(enricher, audit)
    }

    /// Handles one enrichment request. Never fails: store faults come back as
    /// a 500-class response after the orchestrator's best-effort audit write.
    pub async fn handle(&self, payload: Value) -> ApiResponse {
        match self.try_handle(payload).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("Enrichment request failed: {}", err);
                ApiResponse::internal_error()
            }
        }
    }

    async fn try_handle(&self, payload: Value) -> crate::Result<ApiResponse> {
        let Some(batch) = parse_batch(&payload) else {
            tracing::warn!("Rejecting request: payload is not a customer batch");
            self.audit
                .append(&AuditRecord::failure(BATCH_SENTINEL))
                .await?;
            return Ok(ApiResponse::invalid_format());
        };

        let outcome = self.enricher.enrich(batch).await?;
        Ok(ApiResponse::ok(serde_json::to_value(outcome.records)?))
    }
}

/// Extracts the customer batch from the request payload. `None` means the
/// payload fails shape validation: no `data` array, an empty batch, or
/// elements that are not record skeletons.
fn parse_batch(payload: &Value) -> Option<Vec<CustomerRecord>> {
    let items = payload.get("data")?.as_array()?;
    if items.is_empty() {
        return None;
    }
    serde_json::from_value(Value::Array(items.clone())).ok()
}
