use crate::core::{AuditRecord, AuditSink, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

const AUDIT_HEADER: &str = "customerId,status,message\n";

/// Append-only audit log over a blob store that only supports whole-object
/// get/put. The store has no append API, so each append is a read-modify-write
/// of the full log; a writer gate serializes appends so that concurrent
/// resolutions within one batch cannot lose records. Races between separate
/// processes writing the same log are still possible.
pub struct CsvAuditLog<S: Storage> {
    storage: S,
    log_key: String,
    write_gate: Mutex<()>,
}

impl<S: Storage> CsvAuditLog<S> {
    pub fn new(storage: S, log_key: String) -> Self {
        Self {
            storage,
            log_key,
            write_gate: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<S: Storage> AuditSink for CsvAuditLog<S> {
    async fn append(&self, record: &AuditRecord) -> Result<()> {
        let _guard = self.write_gate.lock().await;

        // A log that does not exist yet is an empty log, created with its
        // header on first write. Any other read failure propagates.
        let existing = self.storage.read_file(&self.log_key).await?;
        let mut content = match existing {
            Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            None => String::new(),
        };

        if content.is_empty() {
            content.push_str(AUDIT_HEADER);
        }
        content.push_str(&format!(
            "{},{},{}\n",
            record.customer_id, record.status, record.message
        ));

        tracing::debug!(
            "Appending audit record for {} (status {})",
            record.customer_id,
            record.status
        );
        self.storage
            .write_file(&self.log_key, content.as_bytes())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EnrichError;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        fail_reads: bool,
    }

    impl MockStorage {
        fn new() -> Self {
            Self::default()
        }

        async fn get_text(&self, path: &str) -> Option<String> {
            let files = self.files.lock().await;
            files
                .get(path)
                .map(|d| String::from_utf8_lossy(d).into_owned())
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>> {
            if self.fail_reads {
                return Err(EnrichError::StorageError {
                    message: "simulated outage".to_string(),
                });
            }
            let files = self.files.lock().await;
            Ok(files.get(path).cloned())
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[tokio::test]
    async fn first_append_creates_log_with_header() {
        let storage = MockStorage::new();
        let log = CsvAuditLog::new(storage.clone(), "response_tracker.csv".to_string());

        log.append(&AuditRecord::failure("123")).await.unwrap();

        let content = storage.get_text("response_tracker.csv").await.unwrap();
        assert_eq!(
            content,
            "customerId,status,message\n123,400,Mandatory fields are missing\n"
        );
    }

    #[tokio::test]
    async fn later_appends_keep_existing_lines() {
        let storage = MockStorage::new();
        let log = CsvAuditLog::new(storage.clone(), "response_tracker.csv".to_string());

        log.append(&AuditRecord::failure("123")).await.unwrap();
        log.append(&AuditRecord::batch_success()).await.unwrap();

        let content = storage.get_text("response_tracker.csv").await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "customerId,status,message");
        assert_eq!(lines[1], "123,400,Mandatory fields are missing");
        assert_eq!(lines[2], "N/A,200,Success");
    }

    #[tokio::test]
    async fn concurrent_appends_lose_no_records() {
        let storage = MockStorage::new();
        let log = Arc::new(CsvAuditLog::new(
            storage.clone(),
            "response_tracker.csv".to_string(),
        ));

        let mut handles = Vec::new();
        for i in 0..8 {
            let log = Arc::clone(&log);
            handles.push(tokio::spawn(async move {
                log.append(&AuditRecord::failure(&format!("c{}", i))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let content = storage.get_text("response_tracker.csv").await.unwrap();
        // Header plus one line per append, in some interleaving.
        assert_eq!(content.lines().count(), 9);
        for i in 0..8 {
            assert!(content.contains(&format!("c{},400,", i)));
        }
    }

    #[tokio::test]
    async fn read_failures_other_than_missing_log_propagate() {
        let storage = MockStorage {
            fail_reads: true,
            ..MockStorage::default()
        };
        let log = CsvAuditLog::new(storage, "response_tracker.csv".to_string());

        let err = log.append(&AuditRecord::batch_success()).await.unwrap_err();
        assert!(matches!(err, EnrichError::StorageError { .. }));
    }
}
