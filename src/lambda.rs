#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use customer_enrich::config::lambda::S3Storage;
#[cfg(feature = "lambda")]
use customer_enrich::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use customer_enrich::{EnrichmentService, ServiceConfig};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<serde_json::Value>) -> Result<serde_json::Value, Error> {
    tracing::info!("Handling customer enrichment request");

    let config = ServiceConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .region(Region::new(config.s3_region.clone()))
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(s3_config);

    let storage = S3Storage::new(s3_client, config.s3_bucket.clone());
    let service = EnrichmentService::from_config(storage, &config);

    let response = service.handle(event.payload).await;
    tracing::info!("Request completed with status {}", response.status);

    Ok(serde_json::json!({
        "statusCode": response.status,
        "body": response.body,
    }))
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
