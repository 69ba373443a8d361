use crate::core::{AddressKind, AddressSource, AuditRecord, AuditSink, BatchOutcome, CustomerRecord};
use crate::domain::model::UNKNOWN_CUSTOMER;
use crate::utils::error::{EnrichError, Result};
use std::sync::Arc;

/// Enrichment orchestrator: fans a batch out into one resolution task per
/// customer, joins the results back in input order, and drives the audit
/// side effects.
pub struct Enricher {
    source: Arc<dyn AddressSource>,
    audit: Arc<dyn AuditSink>,
}

impl Enricher {
    pub fn new(source: Arc<dyn AddressSource>, audit: Arc<dyn AuditSink>) -> Self {
        Self { source, audit }
    }

    /// Enriches a batch of customer records. Per-customer failures (missing id,
    /// lookup miss) are recovered locally and audited inline; store faults
    /// abort the whole batch after a best-effort server-error audit record.
    pub async fn enrich(&self, batch: Vec<CustomerRecord>) -> Result<BatchOutcome> {
        tracing::info!("Enriching batch of {} customers", batch.len());

        let mut handles = Vec::with_capacity(batch.len());
        for customer in batch {
            let source = Arc::clone(&self.source);
            let audit = Arc::clone(&self.audit);
            handles.push(tokio::spawn(resolve_customer(source, audit, customer)));
        }

        // Join by index so output order always matches input order, and let
        // every task run to completion before deciding the batch outcome.
        let mut records = Vec::with_capacity(handles.len());
        let mut all_resolved = true;
        let mut fault: Option<EnrichError> = None;
        for handle in handles {
            let result = handle.await.unwrap_or_else(|join_err| {
                Err(EnrichError::ProcessingError {
                    message: format!("Resolution task failed: {}", join_err),
                })
            });
            match result {
                Ok((record, resolved)) => {
                    all_resolved &= resolved;
                    records.push(record);
                }
                Err(err) => {
                    if fault.is_none() {
                        fault = Some(err);
                    }
                }
            }
        }

        if let Some(err) = fault {
            return Err(self.fail_batch(err).await);
        }

        if all_resolved {
            if let Err(err) = self.audit.append(&AuditRecord::batch_success()).await {
                return Err(self.fail_batch(err).await);
            }
            tracing::info!("Batch resolved cleanly");
        } else {
            tracing::warn!("Batch completed with unresolved customers");
        }

        Ok(BatchOutcome {
            records,
            all_resolved,
        })
    }

    /// Records a server-error audit line for an aborted batch. The write is
    /// best effort: the store is likely the thing that just failed.
    async fn fail_batch(&self, err: EnrichError) -> EnrichError {
        tracing::error!("Aborting batch: {}", err);
        if let Err(audit_err) = self.audit.append(&AuditRecord::server_error()).await {
            tracing::warn!("Could not record batch fault in audit log: {}", audit_err);
        }
        err
    }
}

/// Resolves a single customer. Returns the (possibly enriched) record and
/// whether it reached the Resolved terminal state.
async fn resolve_customer(
    source: Arc<dyn AddressSource>,
    audit: Arc<dyn AuditSink>,
    mut customer: CustomerRecord,
) -> Result<(CustomerRecord, bool)> {
    let customer_id = match customer.customer_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            tracing::warn!("Customer record without mandatory id");
            audit.append(&AuditRecord::failure(UNKNOWN_CUSTOMER)).await?;
            return Ok((customer, false));
        }
    };

    // Lookup is skipped entirely when both addresses were supplied.
    if customer.fully_addressed() {
        return Ok((customer, true));
    }

    let mut resolved = true;
    for kind in AddressKind::ALL {
        let slot = match kind {
            AddressKind::Shipping => &mut customer.shipping,
            AddressKind::Billing => &mut customer.billing,
        };
        if slot.is_some() {
            continue;
        }

        match source.resolve(&customer_id, kind).await? {
            Some(address) => *slot = Some(address),
            None => {
                // The slot stays explicitly empty: on the wire this becomes
                // the null marker for "checked, none found". A miss is
                // audited exactly like a missing mandatory field.
                resolved = false;
                tracing::warn!("No {:?} address on file for customer {}", kind, customer_id);
                audit.append(&AuditRecord::failure(&customer_id)).await?;
            }
        }
    }

    Ok((customer, resolved))
}
