use crate::core::Storage;
use crate::utils::error::{EnrichError, Result};
use aws_sdk_s3::Client as S3Client;

/// S3-backed storage for the deployed service. Whole-object get/put only; a
/// missing key reads as `None` so callers can treat absent datasets and an
/// uncreated audit log differently from real faults.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

impl Storage for S3Storage {
    async fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await;

        match resp {
            Ok(output) => {
                let data = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| EnrichError::StorageError {
                        message: format!("Failed to collect S3 object body for '{}': {}", path, e),
                    })?;
                Ok(Some(data.into_bytes().to_vec()))
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    Ok(None)
                } else {
                    Err(EnrichError::StorageError {
                        message: format!("Failed to read '{}' from S3: {}", path, service_err),
                    })
                }
            }
        }
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type("text/csv")
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|e| EnrichError::StorageError {
                message: format!("Failed to write '{}' to S3: {}", path, e),
            })?;

        Ok(())
    }
}
